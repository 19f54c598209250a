use fake::faker::name::en::Name;
use fake::Fake;
use std::sync::Arc;
use test_context::AsyncTestContext;
use tokio::sync::RwLock;
use volunteer_rota::{
    app_state::AppState,
    domain::{
        NewShift, Shift, ShiftStatus, ShiftUpdate, Volunteer, VolunteerId, VolunteerName,
        VolunteerStats, VolunteerStore,
    },
    services::{
        data_stores::{HashmapShiftStore, HashmapVolunteerStore},
        shifts::{create_shift, update_shift},
    },
};

pub struct TestApp {
    pub state: AppState,
    pub shift_store: Arc<RwLock<HashmapShiftStore>>,
    pub volunteer_store: Arc<RwLock<HashmapVolunteerStore>>,
}

impl TestApp {
    pub fn new() -> Self {
        let shift_store = Arc::new(RwLock::new(HashmapShiftStore::default()));
        let volunteer_store = Arc::new(RwLock::new(HashmapVolunteerStore::default()));
        let state = AppState::new(shift_store.clone(), volunteer_store.clone());

        Self {
            state,
            shift_store,
            volunteer_store,
        }
    }

    pub async fn add_volunteer(&self) -> Volunteer {
        let name = VolunteerName::parse(Name().fake()).expect("Failed to parse name");
        self.volunteer_store
            .write()
            .await
            .add_volunteer(name)
            .await
            .expect("Failed to add volunteer")
    }

    pub async fn schedule(
        &self,
        volunteer_id: VolunteerId,
        date: &str,
        start_time: &str,
        end_time: &str,
    ) -> Shift {
        let new_shift = NewShift::new(
            volunteer_id.value_of(),
            date,
            start_time,
            end_time,
            "cat care",
        )
        .expect("Failed to build shift");
        create_shift(&self.state, new_shift)
            .await
            .expect("Failed to create shift")
    }

    pub async fn resolve(&self, shift: &Shift, status: ShiftStatus) -> Shift {
        update_shift(
            &self.state,
            shift.id,
            ShiftUpdate::at_version(shift.version).status(status),
        )
        .await
        .expect("Failed to update shift")
    }

    /// Schedules a 09:00-13:00 shift and immediately records its outcome.
    pub async fn worked(
        &self,
        volunteer_id: VolunteerId,
        date: &str,
        status: ShiftStatus,
    ) -> Shift {
        let shift = self.schedule(volunteer_id, date, "09:00", "13:00").await;
        self.resolve(&shift, status).await
    }

    pub async fn stored_stats(&self, volunteer_id: VolunteerId) -> VolunteerStats {
        self.volunteer_store
            .read()
            .await
            .get_volunteer(&volunteer_id)
            .await
            .expect("Failed to get volunteer")
            .stats
    }
}

impl AsyncTestContext for TestApp {
    async fn setup() -> TestApp {
        TestApp::new()
    }

    async fn teardown(self) {}
}
