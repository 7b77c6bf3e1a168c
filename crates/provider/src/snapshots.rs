use core_types::{MetricSet, TimeSeriesTable};

/// Global EV market share by manufacturer, percent, for the years we have
/// published figures for. Each year's values sum to 100.
const MARKET_SHARE_BY_YEAR: &[(i32, &[(&str, f64)])] = &[
    (2018, &[
        ("Tesla", 12.0),
        ("BAIC", 8.0),
        ("BYD", 7.0),
        ("BMW", 6.0),
        ("Nissan", 6.0),
        ("Volkswagen", 5.0),
        ("Hyundai-Kia", 4.0),
        ("Others", 52.0),
    ]),
    (2019, &[
        ("Tesla", 16.0),
        ("BAIC", 7.0),
        ("BYD", 7.0),
        ("Volkswagen", 7.0),
        ("BMW", 5.0),
        ("Nissan", 5.0),
        ("Hyundai-Kia", 5.0),
        ("Others", 48.0),
    ]),
    (2020, &[
        ("Tesla", 18.0),
        ("Volkswagen", 8.0),
        ("SAIC", 7.0),
        ("BYD", 6.0),
        ("BMW", 5.0),
        ("Hyundai-Kia", 5.0),
        ("Nissan", 4.0),
        ("Others", 47.0),
    ]),
    (2021, &[
        ("Tesla", 21.0),
        ("Volkswagen", 11.0),
        ("SAIC", 8.0),
        ("BYD", 7.0),
        ("Hyundai-Kia", 6.0),
        ("BMW", 5.0),
        ("Stellantis", 5.0),
        ("Others", 37.0),
    ]),
    (2022, &[
        ("Tesla", 23.0),
        ("BYD", 11.0),
        ("Volkswagen", 10.0),
        ("SAIC", 7.0),
        ("Hyundai-Kia", 7.0),
        ("Stellantis", 6.0),
        ("BMW", 5.0),
        ("Others", 31.0),
    ]),
    (2023, &[
        ("Tesla", 19.0),
        ("BYD", 17.0),
        ("Volkswagen", 9.0),
        ("SAIC", 8.0),
        ("Hyundai-Kia", 7.0),
        ("Stellantis", 6.0),
        ("BMW", 5.0),
        ("Others", 29.0),
    ]),
];

/// Market share snapshot for `year`, falling back to the most recent known
/// year when the requested one is absent.
pub fn market_share_snapshot(year: i32) -> MetricSet {
    let shares = MARKET_SHARE_BY_YEAR
        .iter()
        .find(|(known, _)| *known == year)
        .or_else(|| MARKET_SHARE_BY_YEAR.last())
        .map(|(_, shares)| *shares)
        .unwrap_or(&[]);
    MetricSet::from_pairs(shares.iter().copied())
}

/// Sustainability scores (percent of target) for the radar display.
pub fn sustainability_metrics() -> MetricSet {
    MetricSet::from_pairs([
        ("Renewable Energy Use", 85.0),
        ("Water Recycling", 70.0),
        ("Waste Reduction", 65.0),
        ("Battery Recycling", 90.0),
        ("Carbon Footprint Reduction", 75.0),
        ("Sustainable Materials", 60.0),
    ])
}

/// Production efficiency snapshot: current values plus percent change.
pub fn production_efficiency_metrics() -> MetricSet {
    MetricSet::from_pairs([
        ("Production Rate (vehicles/week)", 12_000.0),
        ("Production Rate Change (%)", 15.0),
        ("Factory Utilization (%)", 85.0),
        ("Utilization Change (%)", 5.0),
        ("Production Cost ($/vehicle)", 36_000.0),
        ("Cost Change (%)", -8.0),
    ])
}

/// Latest energy metrics plus rounded year-over-year growth, extracted from
/// the environmental series. With fewer than two years of data the growth
/// figures are 0.
pub fn latest_energy_metrics(environmental: &TimeSeriesTable) -> MetricSet {
    let mut metrics = MetricSet::new();
    let rows = environmental.len();
    if rows == 0 {
        return metrics;
    }
    let fields = [
        ("Solar Deployment (MW)", "Solar Growth (%)"),
        ("Energy Storage (MWh)", "Storage Growth (%)"),
        ("Supercharger Stations", "Supercharger Growth (%)"),
    ];
    for (field, growth_name) in fields {
        let Some(values) = environmental.column(field) else {
            continue;
        };
        let latest = values[rows - 1];
        let previous = if rows > 1 { values[rows - 2] } else { latest };
        let growth = if previous != 0.0 {
            ((latest / previous) - 1.0) * 100.0
        } else {
            0.0
        };
        metrics.insert(field, latest);
        metrics.insert(growth_name, growth.round());
    }
    metrics
}
