use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Deserialize;

/// One daily price row as delivered by the source, already flattened.
///
/// Individual fields the source had no value for are `f64::NAN`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adjusted_close: f64,
    pub volume: f64,
}

/// One reported statement period: its end date plus line item -> value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStatementPeriod {
    pub period_end: NaiveDate,
    pub items: IndexMap<String, f64>,
}

/// The three statements for one ticker at one cadence, as reported.
///
/// Any of the vectors may be empty; the adapter substitutes a placeholder
/// table for an empty statement.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStatements {
    #[serde(default)]
    pub income: Vec<RawStatementPeriod>,
    #[serde(default)]
    pub balance_sheet: Vec<RawStatementPeriod>,
    #[serde(default)]
    pub cash_flow: Vec<RawStatementPeriod>,
}

// ---------------------------------------------------------------------------
// Wire format of the daily price endpoint (Yahoo-style chart document).
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub(crate) struct ChartEnvelope {
    pub chart: ChartNode,
}

#[derive(Deserialize)]
pub(crate) struct ChartNode {
    pub result: Option<Vec<ChartResult>>,
}

#[derive(Deserialize)]
pub(crate) struct ChartResult {
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: ChartIndicators,
}

#[derive(Deserialize)]
pub(crate) struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<QuoteBlock>,
    #[serde(default)]
    pub adjclose: Vec<AdjCloseBlock>,
}

// The source encodes a missing value as JSON null, hence Option<f64>.
#[derive(Deserialize, Default)]
pub(crate) struct QuoteBlock {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

#[derive(Deserialize, Default)]
pub(crate) struct AdjCloseBlock {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}
