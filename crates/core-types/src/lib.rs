pub mod enums;
pub mod error;
pub mod metrics;
pub mod table;

// Re-export the core types to provide a clean public API.
pub use enums::{Cadence, DeliveryWindow, Theme};
pub use error::CoreError;
pub use metrics::MetricSet;
pub use table::TimeSeriesTable;
