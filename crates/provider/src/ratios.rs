use chrono::NaiveDate;
use core_types::TimeSeriesTable;

use crate::statements::FinancialStatements;

/// Derives the margin and return ratios from a set of statements.
///
/// Pure: the same statements always produce the same table. One row per
/// income-statement period, each ratio in percent. A ratio whose line item is
/// missing, or whose division is undefined (0/0, x/0), comes out as 0.0 so
/// callers never special-case absent ratios.
pub fn compute_ratios(statements: &FinancialStatements) -> TimeSeriesTable {
    let income = &statements.income;
    let balance = &statements.balance_sheet;
    let periods = income.len();

    let revenue = income.column("Total Revenue");
    let mut table = TimeSeriesTable::new(income.timestamps().to_vec())
        .unwrap_or_else(|_| TimeSeriesTable::empty());

    table.insert_column(
        "Gross Margin",
        percent_ratio(income.column("Gross Profit"), revenue, periods),
    );
    table.insert_column(
        "Operating Margin",
        percent_ratio(income.column("Operating Income"), revenue, periods),
    );
    table.insert_column(
        "Net Profit Margin",
        percent_ratio(income.column("Net Income"), revenue, periods),
    );
    // The balance sheet may report a different period axis than the income
    // statement, so equity is re-indexed by period date before dividing.
    let equity = align_column(balance, income.timestamps(), "Total Stockholder Equity");
    table.insert_column(
        "Return on Equity",
        percent_ratio(income.column("Net Income"), equity.as_deref(), periods),
    );
    table
}

/// The values of `name` in `source`, re-indexed onto `axis` by matching
/// period dates. Periods `source` does not report come out NAN; `None` when
/// the column itself is absent.
fn align_column(source: &TimeSeriesTable, axis: &[NaiveDate], name: &str) -> Option<Vec<f64>> {
    let values = source.column(name)?;
    Some(
        axis.iter()
            .map(|date| {
                source
                    .timestamps()
                    .iter()
                    .position(|t| t == date)
                    .map(|i| values[i])
                    .unwrap_or(f64::NAN)
            })
            .collect(),
    )
}

/// numerator / denominator * 100 per period, with every non-finite result
/// (missing column, NAN input, zero denominator) normalized to 0.0.
fn percent_ratio(
    numerator: Option<&[f64]>,
    denominator: Option<&[f64]>,
    periods: usize,
) -> Vec<f64> {
    let (Some(numerator), Some(denominator)) = (numerator, denominator) else {
        return vec![0.0; periods];
    };
    (0..periods)
        .map(|i| {
            let value = match (numerator.get(i), denominator.get(i)) {
                (Some(n), Some(d)) => n / d * 100.0,
                _ => 0.0,
            };
            if value.is_finite() { value } else { 0.0 }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements::{StatementKind, placeholder_statement};
    use chrono::NaiveDate;
    use core_types::Cadence;

    fn axis(n: usize) -> Vec<NaiveDate> {
        (1..=n as u32)
            .map(|m| NaiveDate::from_ymd_opt(2024, m, 1).unwrap())
            .collect()
    }

    fn statements_with(income: TimeSeriesTable, balance: TimeSeriesTable) -> FinancialStatements {
        FinancialStatements {
            income,
            balance_sheet: balance,
            cash_flow: TimeSeriesTable::empty(),
        }
    }

    #[test]
    fn derives_margins_and_roe_in_percent() {
        let income = TimeSeriesTable::new(axis(2))
            .unwrap()
            .with_column("Total Revenue", vec![200.0, 400.0])
            .with_column("Gross Profit", vec![50.0, 100.0])
            .with_column("Operating Income", vec![20.0, 40.0])
            .with_column("Net Income", vec![10.0, 20.0]);
        let balance = TimeSeriesTable::new(axis(2))
            .unwrap()
            .with_column("Total Stockholder Equity", vec![100.0, 200.0]);

        let ratios = compute_ratios(&statements_with(income, balance));
        assert_eq!(ratios.column("Gross Margin").unwrap(), &[25.0, 25.0]);
        assert_eq!(ratios.column("Operating Margin").unwrap(), &[10.0, 10.0]);
        assert_eq!(ratios.column("Net Profit Margin").unwrap(), &[5.0, 5.0]);
        assert_eq!(ratios.column("Return on Equity").unwrap(), &[10.0, 10.0]);
    }

    #[test]
    fn is_pure() {
        let income = TimeSeriesTable::new(axis(3))
            .unwrap()
            .with_column("Total Revenue", vec![1.0, 2.0, 3.0])
            .with_column("Gross Profit", vec![0.5, 1.0, 1.5]);
        let statements = statements_with(income, TimeSeriesTable::empty());
        assert_eq!(compute_ratios(&statements), compute_ratios(&statements));
    }

    #[test]
    fn roe_pairs_equity_by_period_date_not_position() {
        // The balance sheet reports one extra, earlier period than the income
        // statement; pairing by position would shift every equity value.
        let q = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let income = TimeSeriesTable::new(vec![q(2024, 3, 31), q(2024, 6, 30)])
            .unwrap()
            .with_column("Net Income", vec![100.0, 200.0]);
        let balance =
            TimeSeriesTable::new(vec![q(2023, 12, 31), q(2024, 3, 31), q(2024, 6, 30)])
                .unwrap()
                .with_column("Total Stockholder Equity", vec![500.0, 1_000.0, 2_000.0]);

        let ratios = compute_ratios(&statements_with(income, balance));
        assert_eq!(ratios.column("Return on Equity").unwrap(), &[10.0, 10.0]);
    }

    #[test]
    fn income_periods_without_a_balance_report_get_zero_roe() {
        let q = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let income = TimeSeriesTable::new(vec![q(2024, 3, 31), q(2024, 6, 30)])
            .unwrap()
            .with_column("Net Income", vec![100.0, 200.0]);
        let balance = TimeSeriesTable::new(vec![q(2024, 6, 30)])
            .unwrap()
            .with_column("Total Stockholder Equity", vec![2_000.0]);

        let ratios = compute_ratios(&statements_with(income, balance));
        assert_eq!(ratios.column("Return on Equity").unwrap(), &[0.0, 10.0]);
    }

    #[test]
    fn missing_revenue_zeroes_every_margin() {
        let income = TimeSeriesTable::new(axis(4))
            .unwrap()
            .with_column("Gross Profit", vec![1.0, 2.0, 3.0, 4.0])
            .with_column("Operating Income", vec![1.0, 2.0, 3.0, 4.0])
            .with_column("Net Income", vec![1.0, 2.0, 3.0, 4.0]);
        let ratios = compute_ratios(&statements_with(income, TimeSeriesTable::empty()));
        for name in ["Gross Margin", "Operating Margin", "Net Profit Margin"] {
            assert_eq!(ratios.column(name).unwrap(), &[0.0; 4]);
        }
    }

    #[test]
    fn zero_denominators_normalize_to_zero() {
        // The all-zero placeholder statements are the canonical 0/0 case.
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let statements = FinancialStatements {
            income: placeholder_statement(StatementKind::Income, Cadence::Quarterly, today),
            balance_sheet: placeholder_statement(StatementKind::Balance, Cadence::Quarterly, today),
            cash_flow: placeholder_statement(StatementKind::CashFlow, Cadence::Quarterly, today),
        };
        let ratios = compute_ratios(&statements);
        assert_eq!(ratios.len(), 8);
        for name in ratios.column_names().collect::<Vec<_>>() {
            assert!(ratios.column(name).unwrap().iter().all(|v| *v == 0.0));
        }
    }
}
