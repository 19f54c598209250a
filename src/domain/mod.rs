pub mod clock_time;
mod data_stores;
mod error;
pub mod reliability;
mod shift;
mod stats;
pub mod streak;
mod volunteer;

pub use clock_time::MalformedTime;
pub use data_stores::*;
pub use error::*;
pub use shift::*;
pub use stats::*;
pub use volunteer::*;
