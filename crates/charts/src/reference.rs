//! Constant reference tables the chart builders plot against.

/// Industry-average sustainability scores, aligned by category name with the
/// company scores on the radar chart.
const INDUSTRY_AVERAGE: &[(&str, f64)] = &[
    ("Renewable Energy Use", 50.0),
    ("Water Recycling", 40.0),
    ("Waste Reduction", 35.0),
    ("Battery Recycling", 30.0),
    ("Carbon Footprint Reduction", 45.0),
    ("Sustainable Materials", 30.0),
];

/// Approximate share of global sales by country, percent.
pub const REGIONAL_SALES: &[(&str, f64)] = &[
    ("USA", 40.0),
    ("China", 25.0),
    ("Germany", 7.0),
    ("Canada", 5.0),
    ("Norway", 4.0),
    ("Netherlands", 3.0),
    ("United Kingdom", 3.0),
    ("France", 3.0),
    ("Australia", 2.0),
    ("Japan", 2.0),
    ("South Korea", 2.0),
    ("Brazil", 1.0),
    ("Mexico", 1.0),
    ("India", 1.0),
    ("United Arab Emirates", 1.0),
];

/// Competitive positioning metrics per ticker. Market Cap and R&D Spending
/// are in $B, the rest in percent.
const COMPETITIVE_METRICS: &[(&str, &[(&str, f64)])] = &[
    ("Market Cap", &[
        ("TSLA", 650.0),
        ("F", 52.0),
        ("GM", 55.0),
        ("VWAGY", 70.0),
        ("TM", 240.0),
        ("XPEV", 12.0),
        ("NIO", 15.0),
    ]),
    ("Revenue Growth", &[
        ("TSLA", 25.0),
        ("F", 5.0),
        ("GM", 2.0),
        ("VWAGY", 4.0),
        ("TM", 3.0),
        ("XPEV", 40.0),
        ("NIO", 45.0),
    ]),
    ("Profit Margin", &[
        ("TSLA", 12.0),
        ("F", 5.0),
        ("GM", 6.0),
        ("VWAGY", 7.0),
        ("TM", 8.0),
        ("XPEV", -25.0),
        ("NIO", -30.0),
    ]),
    ("R&D Spending", &[
        ("TSLA", 20.0),
        ("F", 8.0),
        ("GM", 9.0),
        ("VWAGY", 15.0),
        ("TM", 12.0),
        ("XPEV", 30.0),
        ("NIO", 35.0),
    ]),
];

/// Tickers on the competitive matrix, in display order.
pub const COMPETITIVE_COMPANIES: &[&str] =
    &["TSLA", "F", "GM", "VWAGY", "TM", "XPEV", "NIO"];

/// A company's value for a competitive metric, `None` when either the metric
/// or the company is not in the table.
pub fn competitive_metric(metric: &str, company: &str) -> Option<f64> {
    COMPETITIVE_METRICS
        .iter()
        .find(|(name, _)| *name == metric)
        .and_then(|(_, rows)| rows.iter().find(|(c, _)| *c == company))
        .map(|(_, value)| *value)
}

/// The industry-average score for a sustainability category; 0 for a
/// category we have no baseline for.
pub fn industry_average(category: &str) -> f64 {
    INDUSTRY_AVERAGE
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, score)| *score)
        .unwrap_or(0.0)
}
