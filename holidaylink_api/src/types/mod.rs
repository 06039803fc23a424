mod action;
pub use self::action::{Action, ActionPayload, ActionStatus, ActionType, AmountUnit};

mod media_description;
pub use self::media_description::MediaDescription;

mod sea_lang;
pub use self::sea_lang::{SeaLang, SeaLangs};

mod accommodation_unit;
pub use self::accommodation_unit::{AccommodationUnit, AccommodationUnits};
