mod hashmap_shift_store;
mod hashmap_volunteer_store;
mod postgres_shift_store;
mod postgres_volunteer_store;

pub use hashmap_shift_store::*;
pub use hashmap_volunteer_store::*;
pub use postgres_shift_store::*;
pub use postgres_volunteer_store::*;
