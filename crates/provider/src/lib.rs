use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::Cadence;

use crate::error::ProviderError;
use crate::responses::{PriceBar, RawStatements};

pub mod adapter;
pub mod dates;
pub mod error;
pub mod http_source;
pub mod ratios;
pub mod responses;
pub mod snapshots;
pub mod statements;
pub mod synth;

// --- Public API ---
pub use adapter::{DashboardData, PRICE_COLUMNS};
pub use http_source::HttpMarketData;
pub use ratios::compute_ratios;
pub use snapshots::{
    latest_energy_metrics, market_share_snapshot, production_efficiency_metrics,
    sustainability_metrics,
};
pub use statements::{FinancialStatements, StatementKind};
pub use synth::{
    delivery_series, delivery_series_at, environmental_series, environmental_series_at,
    filter_delivery_window,
};

/// The generic, abstract interface to the external market data source.
/// This trait is the contract the adapter shapes data through, allowing the
/// underlying implementation (HTTP or mock) to be swapped out.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetches raw daily price bars for a ticker over a date range.
    async fn daily_prices(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, ProviderError>;

    /// Fetches the raw financial statements for a ticker at a cadence.
    async fn statements(
        &self,
        ticker: &str,
        cadence: Cadence,
    ) -> Result<RawStatements, ProviderError>;
}
