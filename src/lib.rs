// Stock Registry - Core Library
// Loads the basic data of listed stocks, validates every row and reports
// the defects found

pub mod config;
pub mod eps;
pub mod errors;
pub mod logging;
pub mod reader;
pub mod registry;

// Re-export commonly used types
pub use config::{Config, RegistrySettings, DEFAULT_DATE_FORMAT};
pub use eps::{string_to_decimal, try_string_to_decimal};
pub use errors::RegistryErrors;
pub use logging::init_logging;
pub use reader::{read_rows, read_rows_from_reader, RawRow};
pub use registry::{LoadOutcome, Registry, StockRecord, ISIN_LENGTH, VALID_MONTHS_IN_REPORT};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
