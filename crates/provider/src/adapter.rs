use chrono::{NaiveDate, Utc};
use core_types::{Cadence, CoreError, TimeSeriesTable};
use indexmap::IndexSet;
use tracing::warn;

use crate::MarketDataSource;
use crate::dates;
use crate::responses::{PriceBar, RawStatementPeriod};
use crate::statements::{FinancialStatements, StatementKind, placeholder_statement};

/// Price table column names, in display order.
pub const PRICE_COLUMNS: [&str; 6] = [
    "Open",
    "High",
    "Low",
    "Close",
    "AdjustedClose",
    "Volume",
];

/// Shapes raw market data into the well-formed tables the dashboard consumes.
///
/// This is the "never fail, always placeholder" boundary: apart from a
/// malformed date range, every operation returns a structurally valid table
/// even when the source is down or empty. Source failures are logged, not
/// propagated. The adapter holds no mutable state, so it is safe to share
/// across concurrent requests.
pub struct DashboardData<S> {
    source: S,
}

impl<S: MarketDataSource> DashboardData<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Daily price history for `ticker` over `[start, end]`.
    ///
    /// `start > end` is the one rejected input. On source failure or an empty
    /// result the table spans every calendar day in the range with all six
    /// price fields NAN.
    pub async fn price_history(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<TimeSeriesTable, CoreError> {
        if start > end {
            return Err(CoreError::InvalidDateRange { start, end });
        }

        let table = match self.source.daily_prices(ticker, start, end).await {
            Ok(bars) if !bars.is_empty() => shape_price_bars(bars),
            Ok(_) => {
                warn!(ticker, %start, %end, "price source returned no rows, substituting placeholder");
                None
            }
            Err(err) => {
                warn!(ticker, %start, %end, error = %err, "price source failed, substituting placeholder");
                None
            }
        };
        Ok(table.unwrap_or_else(|| placeholder_price_table(start, end)))
    }

    /// The three financial statements for `ticker` at `cadence`.
    ///
    /// Never fails: any statement the source cannot deliver is replaced by
    /// the zero-valued placeholder sized to the cadence.
    pub async fn financial_statements(
        &self,
        ticker: &str,
        cadence: Cadence,
    ) -> FinancialStatements {
        self.financial_statements_at(ticker, cadence, Utc::now().date_naive())
            .await
    }

    /// Statement fetch with an explicit "today" anchoring placeholder periods.
    pub async fn financial_statements_at(
        &self,
        ticker: &str,
        cadence: Cadence,
        today: NaiveDate,
    ) -> FinancialStatements {
        let raw = match self.source.statements(ticker, cadence).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(ticker, ?cadence, error = %err, "statement source failed, substituting placeholders");
                Default::default()
            }
        };

        let shape = |periods: &[RawStatementPeriod], kind: StatementKind| {
            shape_statement(periods)
                .unwrap_or_else(|| placeholder_statement(kind, cadence, today))
        };
        FinancialStatements {
            income: shape(&raw.income, StatementKind::Income),
            balance_sheet: shape(&raw.balance_sheet, StatementKind::Balance),
            cash_flow: shape(&raw.cash_flow, StatementKind::CashFlow),
        }
    }
}

/// Turns raw price bars into a table, sorting and de-duplicating by date so
/// the strictly-increasing axis invariant holds. `None` when nothing usable
/// remains.
fn shape_price_bars(mut bars: Vec<PriceBar>) -> Option<TimeSeriesTable> {
    bars.sort_by_key(|bar| bar.date);
    bars.dedup_by_key(|bar| bar.date);

    let axis: Vec<NaiveDate> = bars.iter().map(|bar| bar.date).collect();
    let mut table = TimeSeriesTable::new(axis).ok()?;
    table.insert_column("Open", bars.iter().map(|b| b.open).collect());
    table.insert_column("High", bars.iter().map(|b| b.high).collect());
    table.insert_column("Low", bars.iter().map(|b| b.low).collect());
    table.insert_column("Close", bars.iter().map(|b| b.close).collect());
    table.insert_column("AdjustedClose", bars.iter().map(|b| b.adjusted_close).collect());
    table.insert_column("Volume", bars.iter().map(|b| b.volume).collect());
    Some(table)
}

/// One NAN row per calendar day in the requested range.
fn placeholder_price_table(start: NaiveDate, end: NaiveDate) -> TimeSeriesTable {
    let axis = dates::calendar_days(start, end);
    let rows = axis.len();
    let mut table = TimeSeriesTable::new(axis).unwrap_or_else(|_| TimeSeriesTable::empty());
    for column in PRICE_COLUMNS {
        table.insert_column(column, vec![f64::NAN; rows]);
    }
    table
}

/// Shapes reported statement periods into a table: ascending period axis,
/// one column per line item in first-seen order, NAN where a period lacks an
/// item. `None` for an empty or unusable statement.
fn shape_statement(periods: &[RawStatementPeriod]) -> Option<TimeSeriesTable> {
    if periods.is_empty() {
        return None;
    }
    let mut periods: Vec<&RawStatementPeriod> = periods.iter().collect();
    periods.sort_by_key(|p| p.period_end);
    periods.dedup_by_key(|p| p.period_end);

    let axis: Vec<NaiveDate> = periods.iter().map(|p| p.period_end).collect();
    let mut table = TimeSeriesTable::new(axis).ok()?;

    let mut items: IndexSet<&str> = IndexSet::new();
    for period in &periods {
        items.extend(period.items.keys().map(String::as_str));
    }
    for item in items {
        let values = periods
            .iter()
            .map(|p| p.items.get(item).copied().unwrap_or(f64::NAN))
            .collect();
        table.insert_column(item, values);
    }
    Some(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::responses::RawStatements;
    use async_trait::async_trait;
    use indexmap::IndexMap;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    /// A source that always fails, standing in for an unreachable service.
    struct DownSource;

    #[async_trait]
    impl MarketDataSource for DownSource {
        async fn daily_prices(
            &self,
            _ticker: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<PriceBar>, ProviderError> {
            Err(ProviderError::Empty)
        }

        async fn statements(
            &self,
            _ticker: &str,
            _cadence: Cadence,
        ) -> Result<RawStatements, ProviderError> {
            Err(ProviderError::Empty)
        }
    }

    /// A source with canned answers.
    struct CannedSource {
        bars: Vec<PriceBar>,
        statements: RawStatements,
    }

    #[async_trait]
    impl MarketDataSource for CannedSource {
        async fn daily_prices(
            &self,
            _ticker: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<PriceBar>, ProviderError> {
            Ok(self.bars.clone())
        }

        async fn statements(
            &self,
            _ticker: &str,
            _cadence: Cadence,
        ) -> Result<RawStatements, ProviderError> {
            Ok(self.statements.clone())
        }
    }

    fn bar(date: NaiveDate, close: f64) -> PriceBar {
        PriceBar {
            date,
            open: close - 1.0,
            high: close + 1.0,
            low: close - 2.0,
            close,
            adjusted_close: close,
            volume: 1_000.0,
        }
    }

    #[tokio::test]
    async fn rejects_inverted_date_range() {
        let adapter = DashboardData::new(DownSource);
        let result = adapter
            .price_history("TSLA", d(2024, 2, 1), d(2024, 1, 1))
            .await;
        assert!(matches!(result, Err(CoreError::InvalidDateRange { .. })));
    }

    #[tokio::test]
    async fn down_source_yields_one_nan_row_per_calendar_day() {
        let adapter = DashboardData::new(DownSource);
        let table = adapter
            .price_history("TSLA", d(2024, 1, 1), d(2024, 1, 31))
            .await
            .unwrap();
        assert_eq!(table.len(), 31);
        for column in PRICE_COLUMNS {
            assert!(
                table.column(column).unwrap().iter().all(|v| v.is_nan()),
                "{column} should be all NAN"
            );
        }
    }

    #[tokio::test]
    async fn live_bars_are_sorted_and_deduplicated() {
        let source = CannedSource {
            bars: vec![
                bar(d(2024, 1, 3), 12.0),
                bar(d(2024, 1, 2), 11.0),
                bar(d(2024, 1, 2), 99.0),
                bar(d(2024, 1, 4), 13.0),
            ],
            statements: RawStatements::default(),
        };
        let table = DashboardData::new(source)
            .price_history("TSLA", d(2024, 1, 1), d(2024, 1, 5))
            .await
            .unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.timestamps(),
            &[d(2024, 1, 2), d(2024, 1, 3), d(2024, 1, 4)]
        );
        assert_eq!(table.column("Close").unwrap(), &[11.0, 12.0, 13.0]);
    }

    #[tokio::test]
    async fn down_source_yields_placeholder_statements() {
        let adapter = DashboardData::new(DownSource);
        let today = d(2024, 5, 1);

        let quarterly = adapter
            .financial_statements_at("TSLA", Cadence::Quarterly, today)
            .await;
        assert_eq!(quarterly.income.len(), 8);
        assert_eq!(quarterly.balance_sheet.len(), 8);
        assert_eq!(quarterly.cash_flow.len(), 8);
        assert!(
            quarterly
                .income
                .column("Total Revenue")
                .unwrap()
                .iter()
                .all(|v| *v == 0.0)
        );

        let annual = adapter
            .financial_statements_at("TSLA", Cadence::Annual, today)
            .await;
        assert_eq!(annual.income.len(), 5);
        assert_eq!(annual.cash_flow.len(), 5);
    }

    #[tokio::test]
    async fn reported_statements_are_shaped_not_replaced() {
        let mut items = IndexMap::new();
        items.insert("Total Revenue".to_string(), 100.0);
        let statements = RawStatements {
            income: vec![
                RawStatementPeriod {
                    period_end: d(2024, 3, 31),
                    items: items.clone(),
                },
                RawStatementPeriod {
                    period_end: d(2023, 12, 31),
                    items,
                },
            ],
            balance_sheet: Vec::new(),
            cash_flow: Vec::new(),
        };
        let adapter = DashboardData::new(CannedSource {
            bars: Vec::new(),
            statements,
        });

        let shaped = adapter
            .financial_statements_at("TSLA", Cadence::Quarterly, d(2024, 5, 1))
            .await;
        // Reported income survives, in ascending period order.
        assert_eq!(shaped.income.len(), 2);
        assert_eq!(shaped.income.timestamps()[0], d(2023, 12, 31));
        assert_eq!(shaped.income.column("Total Revenue").unwrap(), &[100.0, 100.0]);
        // The empty statements fall back to the 8-period placeholder.
        assert_eq!(shaped.balance_sheet.len(), 8);
        assert_eq!(shaped.cash_flow.len(), 8);
    }
}
