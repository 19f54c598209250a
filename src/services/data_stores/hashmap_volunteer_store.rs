use std::collections::BTreeMap;

use crate::domain::{
    Volunteer, VolunteerId, VolunteerName, VolunteerStats, VolunteerStore,
    VolunteerStoreError,
};

#[derive(Default)]
pub struct HashmapVolunteerStore {
    volunteers: BTreeMap<VolunteerId, Volunteer>,
    last_id: i64,
}

#[async_trait::async_trait]
impl VolunteerStore for HashmapVolunteerStore {
    async fn add_volunteer(
        &mut self,
        name: VolunteerName,
    ) -> Result<Volunteer, VolunteerStoreError> {
        self.last_id += 1;
        let id = VolunteerId::parse(self.last_id)
            .map_err(|e| VolunteerStoreError::UnexpectedError(e.into()))?;

        let volunteer = Volunteer {
            id,
            name,
            stats: VolunteerStats::default(),
            version: 1,
        };
        self.volunteers.insert(id, volunteer.clone());
        Ok(volunteer)
    }

    async fn get_volunteer(
        &self,
        id: &VolunteerId,
    ) -> Result<Volunteer, VolunteerStoreError> {
        self.volunteers
            .get(id)
            .cloned()
            .ok_or(VolunteerStoreError::VolunteerNotFound)
    }

    async fn get_volunteer_ids(&self) -> Result<Vec<VolunteerId>, VolunteerStoreError> {
        Ok(self.volunteers.keys().copied().collect())
    }

    async fn update_stats(
        &mut self,
        id: &VolunteerId,
        stats: VolunteerStats,
    ) -> Result<(), VolunteerStoreError> {
        let volunteer = self
            .volunteers
            .get_mut(id)
            .ok_or(VolunteerStoreError::VolunteerNotFound)?;
        volunteer.stats = stats;
        volunteer.version += 1;
        Ok(())
    }
}
