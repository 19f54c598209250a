//! Rebuilds a volunteer's derived attendance figures from their shift
//! history.
//!
//! Every call reads the full shift set and overwrites the stored aggregate.
//! Calls for the same volunteer are serialised so that the read and the
//! write of one recalculation cannot interleave with another's; calls for
//! different volunteers run concurrently.

use std::{collections::HashMap, sync::Arc};

use color_eyre::eyre::eyre;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::app_state::{ShiftStoreType, VolunteerStoreType};
use crate::domain::{compute_stats, RotaError, VolunteerId, VolunteerStats, VolunteerStoreError};

#[derive(Default)]
struct VolunteerLocks {
    locks: Mutex<HashMap<VolunteerId, Arc<Mutex<()>>>>,
}

impl VolunteerLocks {
    async fn acquire(&self, volunteer_id: VolunteerId) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .lock()
            .await
            .entry(volunteer_id)
            .or_default()
            .clone();
        lock.lock_owned().await
    }

    /// Drops the volunteer's entry once no caller holds or awaits it.
    async fn release(&self, volunteer_id: VolunteerId, guard: OwnedMutexGuard<()>) {
        drop(guard);
        let mut locks = self.locks.lock().await;
        if locks
            .get(&volunteer_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&volunteer_id);
        }
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }
}

pub struct RecalculationEngine {
    shift_store: ShiftStoreType,
    volunteer_store: VolunteerStoreType,
    locks: VolunteerLocks,
}

impl RecalculationEngine {
    pub fn new(shift_store: ShiftStoreType, volunteer_store: VolunteerStoreType) -> Self {
        Self {
            shift_store,
            volunteer_store,
            locks: VolunteerLocks::default(),
        }
    }

    /// Recomputes and stores `{reliability, hours, streak}` for one
    /// volunteer. If the shift history cannot be read nothing is written
    /// and the previous aggregate stays in place.
    #[tracing::instrument(
        name = "Recalculating volunteer stats",
        skip_all,
        fields(volunteer_id = %volunteer_id)
    )]
    pub async fn recalculate(
        &self,
        volunteer_id: VolunteerId,
    ) -> Result<VolunteerStats, RotaError> {
        let guard = self.locks.acquire(volunteer_id).await;
        let result = self.recalculate_locked(volunteer_id).await;
        self.locks.release(volunteer_id, guard).await;
        result
    }

    async fn recalculate_locked(
        &self,
        volunteer_id: VolunteerId,
    ) -> Result<VolunteerStats, RotaError> {
        let shifts = self
            .shift_store
            .read()
            .await
            .get_shifts_for_volunteer(&volunteer_id)
            .await
            .map_err(|e| RotaError::UnexpectedError(eyre!(e)))?;

        let report = compute_stats(&shifts);
        for (shift_id, malformed) in &report.malformed {
            tracing::warn!(
                shift_id = %shift_id,
                start_time = %malformed.start,
                end_time = %malformed.end,
                "Unreadable shift time, no hours counted"
            );
        }

        self.volunteer_store
            .write()
            .await
            .update_stats(&volunteer_id, report.stats)
            .await
            .map_err(|e| match e {
                VolunteerStoreError::VolunteerNotFound => {
                    RotaError::VolunteerNotFound(volunteer_id)
                }
                e => RotaError::UnexpectedError(eyre!(e)),
            })?;

        tracing::debug!(
            reliability_score = report.stats.reliability_score,
            total_hours = report.stats.total_hours,
            streak = report.stats.streak,
            shifts = shifts.len(),
            "Volunteer stats updated"
        );
        Ok(report.stats)
    }
}
