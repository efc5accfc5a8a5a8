//! Balance records and extract loading

mod data;
pub mod loader;

pub use data::{AmountIndicator, BalanceRecord};
pub(crate) use data::normalize_code;
pub use loader::{load_extracts, load_records, load_records_from_reader, load_records_or_empty};
