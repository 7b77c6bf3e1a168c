use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Timestamps must be strictly increasing (row {index} is {timestamp}, not after {previous})")]
    UnorderedTimestamps {
        index: usize,
        timestamp: NaiveDate,
        previous: NaiveDate,
    },
}
