use color_eyre::eyre::Report;
use thiserror::Error;

use super::{ShiftId, VolunteerId};

#[derive(Debug, Error)]
pub enum RotaError {
    #[error("Shift not found: {0}")]
    ShiftNotFound(ShiftId),
    #[error("Volunteer not found: {0}")]
    VolunteerNotFound(VolunteerId),
    #[error("Edit conflict on shift {0}, re-fetch and retry")]
    EditConflict(ShiftId),
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
    #[error("Validation error")]
    ValidationError(#[from] ValidationError),
}

impl RotaError {
    /// Caller-side errors are expected traffic; only storage failures are
    /// worth an ERROR log line.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, Self::UnexpectedError(_))
    }
}

#[derive(Debug, Error)]
#[error("Validation error: {0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: String) -> Self {
        Self(message)
    }

    pub fn as_ref(&self) -> &String {
        &self.0
    }
}
