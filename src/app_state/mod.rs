use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{ShiftStore, VolunteerStore};
use crate::services::recalculation::RecalculationEngine;

pub type ShiftStoreType = Arc<RwLock<dyn ShiftStore + Send + Sync>>;
pub type VolunteerStoreType = Arc<RwLock<dyn VolunteerStore + Send + Sync>>;

#[derive(Clone)]
pub struct AppState {
    pub shift_store: ShiftStoreType,
    pub volunteer_store: VolunteerStoreType,
    pub recalculation: Arc<RecalculationEngine>,
}

impl AppState {
    pub fn new(
        shift_store: ShiftStoreType,
        volunteer_store: VolunteerStoreType,
    ) -> Self {
        let recalculation = Arc::new(RecalculationEngine::new(
            shift_store.clone(),
            volunteer_store.clone(),
        ));
        Self {
            shift_store,
            volunteer_store,
            recalculation,
        }
    }
}
