//! Discount actions on accommodation units.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::resource::{Create, Delete, Resource, Single, Update};

/// The `actions` resource.
pub struct Action;

impl Resource for Action {
    const NAME: &'static str = "Action";
    const PATH: &'static str = "actions";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "status",
        "type",
        "amount",
        "accommodationUnit",
        "visible_from",
        "visible_to",
        "applicable_from",
        "applicable_to",
        "created_at",
        "updated_at",
    ];
}

impl Single for Action {}

impl Create for Action {
    const REQUIRED_FIELDS: &'static [&'static str] = &[
        "accommodation_unit_id",
        "status",
        "visible_from",
        "visible_to",
        "applicable_from",
        "applicable_to",
        "amount_value",
        "amount_unit",
    ];
    const WRITE_FIELDS: &'static [&'static str] = &[
        "accommodation_unit_id",
        "status",
        "type",
        "visible_from",
        "visible_to",
        "applicable_from",
        "applicable_to",
        "amount_value",
        "amount_unit",
    ];
}

impl Update for Action {}

impl Delete for Action {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Active,
    Disabled,
}

/// How `amount_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountUnit {
    Percentage,
    Absolute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Special,
    FirstMinute,
    LastMinute,
}

/// Typed write payload for [`Action`].
///
/// Every field is optional so the same struct serves partial updates;
/// unset fields are left out of the JSON body. Dates serialize as `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActionPayload {
    /// Id of an accommodation unit, see `AccommodationUnits`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accommodation_unit_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ActionStatus>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub action_type: Option<ActionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicable_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicable_to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_unit: Option<AmountUnit>,
}

impl ActionPayload {
    pub fn with_accommodation_unit_id(mut self, id: &str) -> Self {
        self.accommodation_unit_id = Some(id.to_string());
        self
    }

    pub fn with_status(mut self, status: ActionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_type(mut self, action_type: ActionType) -> Self {
        self.action_type = Some(action_type);
        self
    }

    pub fn with_visible(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.visible_from = Some(from);
        self.visible_to = Some(to);
        self
    }

    pub fn with_applicable(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.applicable_from = Some(from);
        self.applicable_to = Some(to);
        self
    }

    pub fn with_amount(mut self, value: &str, unit: AmountUnit) -> Self {
        self.amount_value = Some(value.to_string());
        self.amount_unit = Some(unit);
        self
    }
}
