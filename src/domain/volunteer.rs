use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct VolunteerId(i64);

impl VolunteerId {
    pub fn parse(id: i64) -> Result<Self, ValidationError> {
        if id <= 0 {
            return Err(ValidationError::new(format!(
                "Invalid volunteer ID: {id}"
            )));
        }
        Ok(Self(id))
    }

    pub fn value_of(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for VolunteerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerName(String);

impl VolunteerName {
    pub fn parse(name: String) -> Result<Self, ValidationError> {
        match name.trim().chars().count() {
            x if x < 1 => Err(ValidationError::new(
                "Volunteer name cannot be empty".to_string(),
            )),
            x if x > 255 => Err(ValidationError::new(
                "Max name length is 255 characters".to_string(),
            )),
            _ => Ok(Self(name.trim().to_owned())),
        }
    }
}

impl AsRef<String> for VolunteerName {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

/// Derived attendance figures. Only the recalculation engine produces
/// these; they are always a snapshot of a full recompute over the
/// volunteer's shift set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerStats {
    #[serde(rename = "reliabilityScore")]
    pub reliability_score: i32,
    #[serde(rename = "totalHours")]
    pub total_hours: i32,
    pub streak: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: VolunteerId,
    pub name: VolunteerName,
    #[serde(flatten)]
    pub stats: VolunteerStats,
    pub version: i32,
}
