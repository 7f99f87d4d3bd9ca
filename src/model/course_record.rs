use serde::{Deserialize, Serialize};

/// One scheduled section of a course: a lecture, tutorial, lab or exam slot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    /// Slot marker as printed on the page, one of `/1`, `/2`, `/3`, `/4`.
    pub session: String,
    pub name: String,
    pub time: String,
    pub location: String,
    #[serde(default)]
    pub professors: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cancelled: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseRecord {
    pub code: String,
    pub name: String,
    /// Kept as display text, the page mixes `3.00`, `3` and `0-3`.
    pub credits: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prereq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_note: Option<String>,
    #[serde(default)]
    pub times: Vec<TimeSlot>,
}
