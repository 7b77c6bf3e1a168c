use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// An ordered, per-period record set with fixed named numeric columns.
///
/// This is the single tabular currency of the whole system: the provider
/// adapter produces one per request (live, placeholder, or synthetic) and the
/// chart builder consumes it read-only. Rows are keyed by a strictly
/// increasing date axis; every column holds exactly one value per row, so
/// consumers never have to branch on missing fields. "No value" is encoded as
/// `f64::NAN`, never as an absent entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesTable {
    timestamps: Vec<NaiveDate>,
    columns: IndexMap<String, Vec<f64>>,
}

impl TimeSeriesTable {
    /// Creates a table over the given date axis.
    ///
    /// Returns an error if the timestamps are not strictly increasing; an
    /// empty axis is valid and yields an empty table.
    pub fn new(timestamps: Vec<NaiveDate>) -> Result<Self, CoreError> {
        for (index, window) in timestamps.windows(2).enumerate() {
            if window[1] <= window[0] {
                return Err(CoreError::UnorderedTimestamps {
                    index: index + 1,
                    timestamp: window[1],
                    previous: window[0],
                });
            }
        }
        Ok(Self {
            timestamps,
            columns: IndexMap::new(),
        })
    }

    /// A table with no rows and no columns.
    pub fn empty() -> Self {
        Self {
            timestamps: Vec::new(),
            columns: IndexMap::new(),
        }
    }

    /// Inserts (or replaces) a column, coercing it to the table's row count.
    ///
    /// A short vector is padded with `f64::NAN` and a long one is truncated,
    /// so the one-value-per-row invariant can never be violated by a caller.
    pub fn insert_column(&mut self, name: impl Into<String>, mut values: Vec<f64>) {
        values.resize(self.timestamps.len(), f64::NAN);
        self.columns.insert(name.into(), values);
    }

    /// Builder-style variant of [`insert_column`](Self::insert_column).
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.insert_column(name, values);
        self
    }

    /// Number of periods (rows) in the table.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[NaiveDate] {
        &self.timestamps
    }

    /// The values of a column, or `None` if no such column exists.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Sum of a column with NAN entries ignored; 0.0 for an absent column.
    pub fn column_sum(&self, name: &str) -> f64 {
        self.column(name)
            .map(|values| values.iter().filter(|v| v.is_finite()).sum())
            .unwrap_or(0.0)
    }

    /// A new table holding only the last `n` rows (all rows if `n >= len`).
    pub fn tail(&self, n: usize) -> Self {
        let skip = self.timestamps.len().saturating_sub(n);
        Self {
            timestamps: self.timestamps[skip..].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|(name, values)| (name.clone(), values[skip..].to_vec()))
                .collect(),
        }
    }
}
