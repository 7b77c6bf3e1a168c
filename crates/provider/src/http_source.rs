use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use core_types::Cadence;

use crate::MarketDataSource;
use crate::error::ProviderError;
use crate::responses::{ChartEnvelope, PriceBar, RawStatements};

/// A concrete [`MarketDataSource`] speaking the market data service's HTTP
/// API: a Yahoo-style chart document for daily prices and a plain JSON
/// statements document for fundamentals. Everything is public data, so no
/// request signing is involved.
#[derive(Clone)]
pub struct HttpMarketData {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMarketData {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl MarketDataSource for HttpMarketData {
    async fn daily_prices(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, ProviderError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, ticker);
        let envelope = self
            .client
            .get(&url)
            .query(&[
                ("period1", unix_seconds(start).to_string()),
                ("period2", unix_seconds(end).to_string()),
                ("interval", "1d".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<ChartEnvelope>()
            .await?;

        let result = envelope
            .chart
            .result
            .and_then(|mut results| if results.is_empty() { None } else { Some(results.remove(0)) })
            .ok_or(ProviderError::Empty)?;
        if result.timestamp.is_empty() {
            return Err(ProviderError::Empty);
        }

        let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
        let adjclose = result
            .indicators
            .adjclose
            .into_iter()
            .next()
            .unwrap_or_default();

        let bars = result
            .timestamp
            .iter()
            .enumerate()
            .map(|(i, unix)| {
                let date = Utc
                    .timestamp_opt(*unix, 0)
                    .single()
                    .map(|ts| ts.date_naive())
                    .ok_or_else(|| {
                        ProviderError::InvalidData(format!("invalid price timestamp: {unix}"))
                    })?;
                Ok(PriceBar {
                    date,
                    open: value_at(&quote.open, i),
                    high: value_at(&quote.high, i),
                    low: value_at(&quote.low, i),
                    close: value_at(&quote.close, i),
                    adjusted_close: value_at(&adjclose.adjclose, i),
                    volume: value_at(&quote.volume, i),
                })
            })
            .collect::<Result<Vec<PriceBar>, ProviderError>>()?;

        Ok(bars)
    }

    async fn statements(
        &self,
        ticker: &str,
        cadence: Cadence,
    ) -> Result<RawStatements, ProviderError> {
        let cadence = match cadence {
            Cadence::Quarterly => "quarterly",
            Cadence::Annual => "annual",
        };
        let url = format!("{}/v10/finance/statements/{}", self.base_url, ticker);
        let response = self
            .client
            .get(&url)
            .query(&[("cadence", cadence)])
            .send()
            .await?
            .error_for_status()?;

        let text = response.text().await?;
        serde_json::from_str::<RawStatements>(&text)
            .map_err(|e| ProviderError::Deserialization(e.to_string()))
    }
}

/// Midnight UTC of `date` as unix seconds.
fn unix_seconds(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or(0)
}

/// A possibly-null value at index `i`; missing entries become NAN.
fn value_at(values: &[Option<f64>], i: usize) -> f64 {
    values.get(i).copied().flatten().unwrap_or(f64::NAN)
}
