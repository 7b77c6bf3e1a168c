use core_types::Theme;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub provider: ProviderConfig,
    pub dashboard: DashboardConfig,
}

/// Where and what to fetch market data for.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the market data service.
    pub base_url: String,
    /// The company ticker the dashboard is built around (e.g., "TSLA").
    pub ticker: String,
    /// Competitor tickers plotted on the normalized comparison chart.
    #[serde(default)]
    pub competitors: Vec<String>,
}

/// Presentation defaults applied when the caller does not override them.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Default chart theme token.
    #[serde(default)]
    pub theme: Theme,
    /// How many days of price history to fetch by default.
    #[serde(default = "default_history_days")]
    pub history_days: u32,
}

fn default_history_days() -> u32 {
    // Five years, matching the dashboard's default date range.
    365 * 5
}
