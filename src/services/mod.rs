pub mod data_stores;
pub mod recalculation;
pub mod shifts;
