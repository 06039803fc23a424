//! Localized sea names.

use crate::query::{EXPAND, LANGUAGE, PAGE};
use crate::resource::{Collection, Resource};

/// One localized sea name, an element of [`SeaLangs`].
pub struct SeaLang;

impl Resource for SeaLang {
    const NAME: &'static str = "SeaLang";
    const PATH: &'static str = "sea-langs";
    const FIELDS: &'static [&'static str] = &["id", "sea_id", "language", "name"];
}

/// The `sea-langs` collection.
pub struct SeaLangs;

impl Resource for SeaLangs {
    const NAME: &'static str = "SeaLangs";
    const PATH: &'static str = "sea-langs";
    const FIELDS: &'static [&'static str] = &[];
}

impl Collection for SeaLangs {
    type Item = SeaLang;
    const COLLECTION_PARAMS: &'static [&'static str] = &[EXPAND, LANGUAGE, PAGE];
}
