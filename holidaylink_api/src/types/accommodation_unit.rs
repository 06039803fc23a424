//! Accommodation units, the targets of [`Action`](super::Action)s.

use crate::query::{EXPAND, LANGUAGE, PAGE};
use crate::resource::{Collection, Resource, Single};

/// One bookable unit (room, apartment, villa) of an accommodation.
pub struct AccommodationUnit;

impl Resource for AccommodationUnit {
    const NAME: &'static str = "AccommodationUnit";
    const PATH: &'static str = "accommodation-units";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "type",
        "accommodation",
        "capacity",
        "created_at",
        "updated_at",
    ];
}

impl Single for AccommodationUnit {}

/// The `accommodation-units` collection. Its ids are the valid values for
/// an action's `accommodation_unit_id`.
pub struct AccommodationUnits;

impl Resource for AccommodationUnits {
    const NAME: &'static str = "AccommodationUnits";
    const PATH: &'static str = "accommodation-units";
    const FIELDS: &'static [&'static str] = &[];
}

impl Collection for AccommodationUnits {
    type Item = AccommodationUnit;
    const COLLECTION_PARAMS: &'static [&'static str] = &[EXPAND, LANGUAGE, PAGE];
}
