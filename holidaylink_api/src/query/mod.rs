mod params;
pub use self::params::{Params, EXPAND, LANGUAGE, PAGE};
