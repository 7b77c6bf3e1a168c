use chrono::NaiveDate;
use core_types::{Cadence, TimeSeriesTable};

use crate::dates;

/// The three shaped statement tables for one ticker at one cadence.
///
/// Every table is guaranteed non-empty: a statement the source could not
/// deliver is replaced by the deterministic placeholder below.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialStatements {
    pub income: TimeSeriesTable,
    pub balance_sheet: TimeSeriesTable,
    pub cash_flow: TimeSeriesTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Income,
    Balance,
    CashFlow,
}

impl StatementKind {
    /// The fixed line items a placeholder statement of this kind carries.
    pub fn line_items(&self) -> &'static [&'static str] {
        match self {
            StatementKind::Income => &[
                "Total Revenue",
                "Cost Of Revenue",
                "Gross Profit",
                "Operating Expense",
                "Operating Income",
                "Net Income",
            ],
            StatementKind::Balance => &[
                "Total Assets",
                "Total Liabilities",
                "Total Stockholder Equity",
                "Cash And Cash Equivalents",
                "Short Term Investments",
                "Inventory",
            ],
            StatementKind::CashFlow => &[
                "Operating Cash Flow",
                "Capital Expenditure",
                "Free Cash Flow",
                "Dividend Payout",
                "Cash From Financing",
                "Cash From Investment",
            ],
        }
    }
}

/// Builds the zero-valued placeholder table for a statement the source could
/// not deliver: 8 quarter ends or 5 year ends, the last one on or before
/// `today`, every line item 0.
pub fn placeholder_statement(
    kind: StatementKind,
    cadence: Cadence,
    today: NaiveDate,
) -> TimeSeriesTable {
    let periods = cadence.placeholder_periods();
    let axis = match cadence {
        Cadence::Quarterly => dates::trailing_quarter_ends(today, periods),
        Cadence::Annual => dates::trailing_year_ends(today, periods),
    };
    // The axis is ascending by construction.
    let mut table = TimeSeriesTable::new(axis).unwrap_or_else(|_| TimeSeriesTable::empty());
    for item in kind.line_items() {
        table.insert_column(*item, vec![0.0; periods]);
    }
    table
}
