use super::{clock_time, ValidationError, VolunteerId};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    #[serde(rename = "volunteerId")]
    pub volunteer_id: VolunteerId,
    pub date: ShiftDate,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    pub role: String,
    pub status: ShiftStatus,
    pub notes: String,
    pub version: i32,
}

impl Shift {
    /// Sort key for a volunteer's shift list: most recent date first, then
    /// parsed start time ascending, then id. Every store lists by this key.
    pub fn listing_key(&self) -> (Reverse<ShiftDate>, NaiveTime, ShiftId) {
        (
            Reverse(self.date),
            clock_time::sort_time(&self.start_time),
            self.id,
        )
    }

    /// Overwrites the editable fields. `id` and `volunteer_id` are fixed
    /// for the life of the shift; `version` is left for the CAS write.
    pub fn apply(&mut self, update: ShiftUpdate) {
        let ShiftUpdate {
            version: _,
            date,
            start_time,
            end_time,
            role,
            status,
            notes,
        } = update;

        if let Some(date) = date {
            self.date = date;
        }
        if let Some(start_time) = start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = end_time {
            self.end_time = end_time;
        }
        if let Some(role) = role {
            self.role = role;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(notes) = notes {
            self.notes = notes;
        }
    }
}

/// A shift as submitted by a scheduling caller, before it has an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewShift {
    #[serde(rename = "volunteerId")]
    pub volunteer_id: VolunteerId,
    pub date: ShiftDate,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    pub role: String,
    #[serde(default)]
    pub notes: String,
}

impl NewShift {
    pub fn new(
        volunteer_id: i64,
        date: &str,
        start_time: &str,
        end_time: &str,
        role: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            volunteer_id: VolunteerId::parse(volunteer_id)?,
            date: ShiftDate::parse(date)?,
            start_time: start_time.to_owned(),
            end_time: end_time.to_owned(),
            role: role.to_owned(),
            notes: String::new(),
        })
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = notes.to_owned();
        self
    }
}

/// Partial edit of a shift. `version` is the version the caller last
/// read; the write is rejected if the stored shift has moved on since.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftUpdate {
    pub version: i32,
    pub date: Option<ShiftDate>,
    #[serde(rename = "startTime")]
    pub start_time: Option<String>,
    #[serde(rename = "endTime")]
    pub end_time: Option<String>,
    pub role: Option<String>,
    pub status: Option<ShiftStatus>,
    pub notes: Option<String>,
}

impl ShiftUpdate {
    pub fn at_version(version: i32) -> Self {
        Self {
            version,
            ..Default::default()
        }
    }

    pub fn status(mut self, status: ShiftStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn times(mut self, start_time: &str, end_time: &str) -> Self {
        self.start_time = Some(start_time.to_owned());
        self.end_time = Some(end_time.to_owned());
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_owned());
        self
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ShiftId(i64);

impl ShiftId {
    pub fn parse(id: i64) -> Result<Self, ValidationError> {
        if id <= 0 {
            return Err(ValidationError::new(format!("Invalid shift ID: {id}")));
        }
        Ok(Self(id))
    }

    pub fn value_of(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ShiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Calendar date of a shift, exchanged as `YYYY-MM-DD`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ShiftDate(NaiveDate);

const DATE_FORMAT: &str = "%Y-%m-%d";

impl ShiftDate {
    pub fn parse(date: &str) -> Result<Self, ValidationError> {
        NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|e| {
                ValidationError::new(format!("Invalid shift date {date:?}: {e}"))
            })
    }

    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl AsRef<NaiveDate> for ShiftDate {
    fn as_ref(&self) -> &NaiveDate {
        &self.0
    }
}

impl TryFrom<String> for ShiftDate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ShiftDate> for String {
    fn from(date: ShiftDate) -> Self {
        date.to_string()
    }
}

impl fmt::Display for ShiftDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// Attendance outcome of a shift. Several spellings have been used for the
/// same outcome over time; they all map onto one variant here. Serialises
/// to the canonical name and deserialises through [`FromStr`], so both
/// accept the same spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    /// Not yet worked. Ignored by every aggregate.
    Scheduled,
    Completed,
    Late,
    Missed,
    /// Covered by someone else with at least 24 hours' notice.
    Covered,
    /// Covered with less than 24 hours' notice.
    #[serde(rename = "covered_less_24h")]
    CoveredLate,
    /// Covered with less than an hour's notice.
    #[serde(rename = "covered_less_1h")]
    CoveredLastMinute,
}

impl ShiftStatus {
    pub const ALL: [ShiftStatus; 7] = [
        ShiftStatus::Scheduled,
        ShiftStatus::Completed,
        ShiftStatus::Late,
        ShiftStatus::Missed,
        ShiftStatus::Covered,
        ShiftStatus::CoveredLate,
        ShiftStatus::CoveredLastMinute,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftStatus::Scheduled => "scheduled",
            ShiftStatus::Completed => "completed",
            ShiftStatus::Late => "late",
            ShiftStatus::Missed => "missed",
            ShiftStatus::Covered => "covered",
            ShiftStatus::CoveredLate => "covered_less_24h",
            ShiftStatus::CoveredLastMinute => "covered_less_1h",
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, ShiftStatus::Scheduled)
    }

    /// Whether the volunteer actually worked the shift.
    pub fn counts_toward_hours(&self) -> bool {
        matches!(self, ShiftStatus::Completed | ShiftStatus::Late)
    }
}

impl FromStr for ShiftStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scheduled" => Ok(ShiftStatus::Scheduled),
            "completed" | "all_good" => Ok(ShiftStatus::Completed),
            "late" => Ok(ShiftStatus::Late),
            "missed" | "no_show" => Ok(ShiftStatus::Missed),
            "covered" | "covered_24h" | "covered 24h" => Ok(ShiftStatus::Covered),
            "covered_less_24h" | "covered_late" | "covered late" | "covered <24h notice" => {
                Ok(ShiftStatus::CoveredLate)
            }
            "covered_less_1h" | "covered <1h notice" => Ok(ShiftStatus::CoveredLastMinute),
            _ => Err(ValidationError::new(format!(
                "Invalid shift status: {s:?}"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for ShiftStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let status = String::deserialize(deserializer)?;
        status.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
