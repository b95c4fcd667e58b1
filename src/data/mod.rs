//! Weather-record loading.
//!
//! Rows that cannot be turned into a `DataPoint` are excluded and reported;
//! they never abort the load.

mod loader;

pub use loader::{LoadReport, load_csv_path, load_or_empty, parse_records};
