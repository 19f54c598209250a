//! Shift operations as seen by the application layer. Each mutation is
//! followed by an inline recalculation of the owning volunteer's stats.

use color_eyre::eyre::eyre;
use serde::Serialize;

use crate::{
    app_state::AppState,
    domain::{
        NewShift, RotaError, Shift, ShiftId, ShiftStoreError, ShiftUpdate, ValidationError,
        VolunteerId, VolunteerStats, VolunteerStoreError,
    },
    log_error_chain,
};

fn map_shift_store_error(e: ShiftStoreError, shift_id: Option<ShiftId>) -> RotaError {
    match (e, shift_id) {
        (ShiftStoreError::ShiftNotFound, Some(id)) => RotaError::ShiftNotFound(id),
        (ShiftStoreError::EditConflict, Some(id)) => RotaError::EditConflict(id),
        (e, _) => RotaError::UnexpectedError(eyre!(e)),
    }
}

#[tracing::instrument(name = "Create shift", skip_all)]
pub async fn create_shift(state: &AppState, new_shift: NewShift) -> Result<Shift, RotaError> {
    let volunteer_id = new_shift.volunteer_id;
    state
        .volunteer_store
        .read()
        .await
        .get_volunteer(&volunteer_id)
        .await
        .map_err(|e| match e {
            VolunteerStoreError::VolunteerNotFound => RotaError::VolunteerNotFound(volunteer_id),
            e => RotaError::UnexpectedError(eyre!(e)),
        })?;

    let shift = state
        .shift_store
        .write()
        .await
        .add_shift(new_shift)
        .await
        .map_err(|e| match e {
            // The volunteer can disappear between the check and the insert.
            ShiftStoreError::VolunteerNotFound => RotaError::VolunteerNotFound(volunteer_id),
            e => map_shift_store_error(e, None),
        })?;

    state.recalculation.recalculate(shift.volunteer_id).await?;
    Ok(shift)
}

/// Applies `update` on top of the stored shift. Rejected with
/// [`RotaError::EditConflict`] if `update.version` is no longer current,
/// and with [`RotaError::ValidationError`] if it could never have been.
#[tracing::instrument(name = "Update shift", skip_all, fields(shift_id = %shift_id))]
pub async fn update_shift(
    state: &AppState,
    shift_id: ShiftId,
    update: ShiftUpdate,
) -> Result<Shift, RotaError> {
    // Versions start at 1.
    if update.version < 1 {
        return Err(ValidationError::new(format!(
            "Invalid shift version: {}",
            update.version
        ))
        .into());
    }

    let mut shift = state
        .shift_store
        .read()
        .await
        .get_shift(&shift_id)
        .await
        .map_err(|e| map_shift_store_error(e, Some(shift_id)))?;

    shift.version = update.version;
    shift.apply(update);

    let updated = state
        .shift_store
        .write()
        .await
        .update_shift(&shift)
        .await
        .map_err(|e| map_shift_store_error(e, Some(shift_id)))?;

    state.recalculation.recalculate(updated.volunteer_id).await?;
    Ok(updated)
}

#[tracing::instrument(name = "Delete shift", skip_all, fields(shift_id = %shift_id))]
pub async fn delete_shift(state: &AppState, shift_id: ShiftId) -> Result<Shift, RotaError> {
    let deleted = state
        .shift_store
        .write()
        .await
        .delete_shift(&shift_id)
        .await
        .map_err(|e| map_shift_store_error(e, Some(shift_id)))?;

    state.recalculation.recalculate(deleted.volunteer_id).await?;
    Ok(deleted)
}

#[tracing::instrument(
    name = "List volunteer shifts",
    skip_all,
    fields(volunteer_id = %volunteer_id)
)]
pub async fn list_volunteer_shifts(
    state: &AppState,
    volunteer_id: VolunteerId,
) -> Result<Vec<Shift>, RotaError> {
    state
        .shift_store
        .read()
        .await
        .get_shifts_for_volunteer(&volunteer_id)
        .await
        .map_err(|e| map_shift_store_error(e, None))
}

pub async fn recalculate_volunteer_stats(
    state: &AppState,
    volunteer_id: VolunteerId,
) -> Result<VolunteerStats, RotaError> {
    state.recalculation.recalculate(volunteer_id).await
}

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct RecalculationSummary {
    pub recalculated: usize,
    pub failed: Vec<VolunteerId>,
}

/// Recalculates each listed volunteer, or every volunteer when `only` is
/// empty. Individual failures are logged and counted, not fatal.
#[tracing::instrument(name = "Recalculate volunteers", skip_all)]
pub async fn recalculate_all(
    state: &AppState,
    only: &[VolunteerId],
) -> Result<RecalculationSummary, RotaError> {
    let volunteer_ids = if only.is_empty() {
        state
            .volunteer_store
            .read()
            .await
            .get_volunteer_ids()
            .await
            .map_err(|e| RotaError::UnexpectedError(eyre!(e)))?
    } else {
        only.to_vec()
    };

    let mut summary = RecalculationSummary::default();
    for volunteer_id in volunteer_ids {
        match state.recalculation.recalculate(volunteer_id).await {
            Ok(_) => summary.recalculated += 1,
            Err(e) => {
                let level = if e.is_unexpected() {
                    tracing::Level::ERROR
                } else {
                    tracing::Level::WARN
                };
                log_error_chain(&e, level);
                summary.failed.push(volunteer_id);
            }
        }
    }

    tracing::info!(
        recalculated = summary.recalculated,
        failed = summary.failed.len(),
        "Recalculation finished"
    );
    Ok(summary)
}
