use super::{
    NewShift, Shift, ShiftId, Volunteer, VolunteerId, VolunteerName, VolunteerStats,
};
use color_eyre::eyre::Report;
use thiserror::Error;

/// Persistence for individual shifts. Writes never trigger recalculation;
/// that is left to the caller.
#[async_trait::async_trait]
pub trait ShiftStore {
    /// Assigns an id and version 1.
    async fn add_shift(&mut self, shift: NewShift) -> Result<Shift, ShiftStoreError>;
    async fn get_shift(&self, id: &ShiftId) -> Result<Shift, ShiftStoreError>;
    /// Compare-and-swap on `shift.version`. On success the stored version
    /// is bumped and the stored record returned.
    async fn update_shift(&mut self, shift: &Shift) -> Result<Shift, ShiftStoreError>;
    /// Returns the removed record.
    async fn delete_shift(&mut self, id: &ShiftId) -> Result<Shift, ShiftStoreError>;
    /// Most recent date first, then start time ascending within a date.
    async fn get_shifts_for_volunteer(
        &self,
        volunteer_id: &VolunteerId,
    ) -> Result<Vec<Shift>, ShiftStoreError>;
}

#[derive(Debug, Error)]
pub enum ShiftStoreError {
    #[error("Shift not found")]
    ShiftNotFound,
    #[error("Volunteer not found")]
    VolunteerNotFound,
    #[error("Shift was modified by another caller")]
    EditConflict,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for ShiftStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::ShiftNotFound, Self::ShiftNotFound)
                | (Self::VolunteerNotFound, Self::VolunteerNotFound)
                | (Self::EditConflict, Self::EditConflict)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait::async_trait]
pub trait VolunteerStore {
    async fn add_volunteer(
        &mut self,
        name: VolunteerName,
    ) -> Result<Volunteer, VolunteerStoreError>;
    async fn get_volunteer(
        &self,
        id: &VolunteerId,
    ) -> Result<Volunteer, VolunteerStoreError>;
    async fn get_volunteer_ids(&self) -> Result<Vec<VolunteerId>, VolunteerStoreError>;
    /// Unconditional overwrite of the derived fields plus a version bump.
    async fn update_stats(
        &mut self,
        id: &VolunteerId,
        stats: VolunteerStats,
    ) -> Result<(), VolunteerStoreError>;
}

#[derive(Debug, Error)]
pub enum VolunteerStoreError {
    #[error("Volunteer not found")]
    VolunteerNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for VolunteerStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::VolunteerNotFound, Self::VolunteerNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}
