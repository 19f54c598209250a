use std::collections::HashMap;

use crate::domain::{
    NewShift, Shift, ShiftId, ShiftStatus, ShiftStore, ShiftStoreError,
    VolunteerId,
};

#[derive(Default)]
pub struct HashmapShiftStore {
    shifts: HashMap<ShiftId, Shift>,
    last_id: i64,
}

#[async_trait::async_trait]
impl ShiftStore for HashmapShiftStore {
    async fn add_shift(&mut self, shift: NewShift) -> Result<Shift, ShiftStoreError> {
        self.last_id += 1;
        let id = ShiftId::parse(self.last_id)
            .map_err(|e| ShiftStoreError::UnexpectedError(e.into()))?;

        let shift = Shift {
            id,
            volunteer_id: shift.volunteer_id,
            date: shift.date,
            start_time: shift.start_time,
            end_time: shift.end_time,
            role: shift.role,
            status: ShiftStatus::Scheduled,
            notes: shift.notes,
            version: 1,
        };
        self.shifts.insert(id, shift.clone());
        Ok(shift)
    }

    async fn get_shift(&self, id: &ShiftId) -> Result<Shift, ShiftStoreError> {
        self.shifts
            .get(id)
            .cloned()
            .ok_or(ShiftStoreError::ShiftNotFound)
    }

    async fn update_shift(&mut self, shift: &Shift) -> Result<Shift, ShiftStoreError> {
        let stored = self
            .shifts
            .get_mut(&shift.id)
            .ok_or(ShiftStoreError::ShiftNotFound)?;

        if stored.version != shift.version {
            return Err(ShiftStoreError::EditConflict);
        }

        *stored = Shift {
            volunteer_id: stored.volunteer_id,
            version: stored.version + 1,
            ..shift.clone()
        };
        Ok(stored.clone())
    }

    async fn delete_shift(&mut self, id: &ShiftId) -> Result<Shift, ShiftStoreError> {
        self.shifts.remove(id).ok_or(ShiftStoreError::ShiftNotFound)
    }

    async fn get_shifts_for_volunteer(
        &self,
        volunteer_id: &VolunteerId,
    ) -> Result<Vec<Shift>, ShiftStoreError> {
        let mut shifts: Vec<Shift> = self
            .shifts
            .values()
            .filter(|shift| &shift.volunteer_id == volunteer_id)
            .cloned()
            .collect();
        shifts.sort_by_key(Shift::listing_key);
        Ok(shifts)
    }
}
