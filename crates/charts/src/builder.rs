use chrono::Datelike;
use core_types::{Cadence, MetricSet, Theme, TimeSeriesTable};
use tracing::debug;

use crate::model::{ChartKind, ChartSpec, Series};
use crate::{palette, reference};

/// Stock price history: close line plus volume bars on a secondary axis,
/// with 50- and 200-day moving averages overlaid.
pub fn price_history(table: &TimeSeriesTable, theme: Theme) -> ChartSpec {
    let close = metric_or_placeholder(table, "Close");
    let volume = metric_or_placeholder(table, "Volume");
    let ma_50 = rolling_mean(&close, 50);
    let ma_200 = rolling_mean(&close, 200);

    ChartSpec::new(ChartKind::Line, "Stock Price History", theme, date_labels(table))
        .series(Series::new("Stock Price", close).color(palette::ACCENT_RED))
        .series(
            Series::new("Volume", volume)
                .color(palette::VOLUME_GRAY)
                .bars()
                .secondary_axis(),
        )
        .series(Series::new("50-Day MA", ma_50).color(palette::ACCENT_BLUE))
        .series(Series::new("200-Day MA", ma_200).color(palette::ACCENT_PURPLE))
        .x_label("Date")
        .y_label("Stock Price ($)")
        .secondary_y_label("Volume")
}

/// Grouped bars across the selected statement line items.
pub fn financial_metrics(
    table: &TimeSeriesTable,
    metrics: &[&str],
    cadence: Cadence,
    theme: Theme,
) -> ChartSpec {
    let title = format!("{} Financial Metrics", cadence.label());
    let mut spec = ChartSpec::new(ChartKind::Bar, &title, theme, period_labels(table, cadence))
        .y_label("USD (Millions)");
    for (i, metric) in metrics.iter().enumerate() {
        let values = metric_or_placeholder(table, metric);
        spec = spec.series(
            Series::new(metric, values)
                .color(palette::METRIC_CYCLE[i % palette::METRIC_CYCLE.len()])
                .bars(),
        );
    }
    spec
}

/// Margin and return-on-equity trend lines.
pub fn ratio_trends(table: &TimeSeriesTable, theme: Theme) -> ChartSpec {
    let ratios = [
        "Gross Margin",
        "Operating Margin",
        "Net Profit Margin",
        "Return on Equity",
    ];
    let mut spec = ChartSpec::new(
        ChartKind::Line,
        "Financial Ratio Trends",
        theme,
        date_labels(table),
    )
    .y_label("Percentage (%)");
    for (i, ratio) in ratios.iter().enumerate() {
        spec = spec.series(
            Series::new(ratio, metric_or_placeholder(table, ratio))
                .color(palette::METRIC_CYCLE[i % palette::METRIC_CYCLE.len()]),
        );
    }
    spec
}

/// Quarterly vehicle deliveries: total plus the model-family lines, with the
/// newest model added once it exists in the data.
pub fn delivery_trends(table: &TimeSeriesTable, theme: Theme) -> ChartSpec {
    let mut spec = ChartSpec::new(
        ChartKind::Line,
        "Quarterly Vehicle Deliveries",
        theme,
        period_labels(table, Cadence::Quarterly),
    )
    .x_label("Quarter")
    .y_label("Vehicles Delivered")
    .series(
        Series::new("Total Deliveries", metric_or_placeholder(table, "Total Deliveries"))
            .color(palette::BRAND_RED),
    )
    .series(
        Series::new("Model 3/Y", metric_or_placeholder(table, "Model 3/Y"))
            .color(palette::SKY_BLUE),
    )
    .series(
        Series::new("Model S/X", metric_or_placeholder(table, "Model S/X"))
            .color(palette::VIOLET),
    );
    if table.has_column("Cybertruck") {
        spec = spec.series(
            Series::new("Cybertruck", metric_or_placeholder(table, "Cybertruck"))
                .color(palette::ACCENT_GREEN),
        );
    }
    spec
}

/// Pie of delivery totals by individual model over the table's window. The
/// newest model only gets a slice once it has shipped anything.
pub fn model_mix(table: &TimeSeriesTable, theme: Theme) -> ChartSpec {
    let mut slices: Vec<(&str, f64)> = ["Model 3", "Model Y", "Model S", "Model X"]
        .iter()
        .map(|model| (*model, table.column_sum(model)))
        .collect();
    let cybertruck = table.column_sum("Cybertruck");
    if cybertruck > 0.0 {
        slices.push(("Cybertruck", cybertruck));
    }

    let categories = slices.iter().map(|(name, _)| name.to_string()).collect();
    let values = slices.iter().map(|(_, total)| *total).collect();
    let mut spec = ChartSpec::new(
        ChartKind::Pie,
        "Vehicle Delivery Breakdown by Model",
        theme,
        categories,
    )
    .series(Series::new("Deliveries", values));
    spec.slice_colors = slices
        .iter()
        .map(|(name, _)| palette::model_color(name).to_string())
        .collect();
    spec
}

/// Pie of manufacturer market share for one year.
pub fn market_share(snapshot: &MetricSet, year: i32, theme: Theme) -> ChartSpec {
    let title = format!("Global EV Market Share {year}");
    let categories: Vec<String> = snapshot.names().map(str::to_string).collect();
    let values: Vec<f64> = snapshot.iter().map(|(_, share)| share).collect();
    let mut spec = ChartSpec::new(ChartKind::Pie, &title, theme, categories)
        .series(Series::new("Market Share", values));
    spec.slice_colors = snapshot
        .names()
        .map(|name| palette::manufacturer_color(name).to_string())
        .collect();
    spec
}

/// Radar of sustainability scores against the constant industry baseline.
/// Both series share the category axis, so the renderer can overlay them.
pub fn sustainability_radar(metrics: &MetricSet, theme: Theme) -> ChartSpec {
    let categories: Vec<String> = metrics.names().map(str::to_string).collect();
    let scores: Vec<f64> = metrics.iter().map(|(_, score)| score).collect();
    let baseline: Vec<f64> = metrics
        .names()
        .map(reference::industry_average)
        .collect();

    ChartSpec::new(
        ChartKind::Radar,
        "Sustainability Performance (% of Target)",
        theme,
        categories,
    )
    .series(Series::new("Sustainability Score", scores).color(palette::ACCENT_GREEN))
    .series(Series::new("Industry Average", baseline).color(palette::NEUTRAL_GRAY))
}

/// Choropleth of the static regional sales distribution. The series color
/// carries the sequential color-scale token the renderer applies.
pub fn regional_sales(theme: Theme) -> ChartSpec {
    let categories = reference::REGIONAL_SALES
        .iter()
        .map(|(country, _)| country.to_string())
        .collect();
    let values = reference::REGIONAL_SALES
        .iter()
        .map(|(_, share)| *share)
        .collect();
    ChartSpec::new(
        ChartKind::Choropleth,
        "Global Sales Distribution",
        theme,
        categories,
    )
    .series(Series::new("Sales %", values).color("Reds"))
}

/// Multi-ticker stock performance, each close series indexed to 100 on its
/// first traded day. The first entry is the primary ticker and keeps the
/// brand color; a ticker whose close series has no usable base value is
/// skipped, the way an empty provider frame would be.
pub fn normalized_comparison(
    tables: &[(&str, &TimeSeriesTable)],
    theme: Theme,
) -> ChartSpec {
    let categories = tables
        .first()
        .map(|(_, table)| date_labels(table))
        .unwrap_or_default();
    let mut spec = ChartSpec::new(
        ChartKind::Line,
        "Normalized Stock Performance Comparison (First Day = 100)",
        theme,
        categories,
    )
    .x_label("Date")
    .y_label("Indexed Close");

    for (i, (ticker, table)) in tables.iter().enumerate() {
        let Some(values) = normalize_to_first(table.column("Close")) else {
            debug!(ticker = *ticker, "no usable close series, skipping comparison line");
            continue;
        };
        let color = if i == 0 {
            palette::BRAND_RED
        } else {
            palette::COMPARISON_CYCLE[(i - 1) % palette::COMPARISON_CYCLE.len()]
        };
        spec = spec.series(Series::new(ticker, values).color(color));
    }
    spec
}

/// Bubble chart of competitive positioning: one point per company with the
/// chosen metrics on the axes and market cap as the bubble size. Companies
/// missing either metric are left off the chart.
pub fn competitive_matrix(x_metric: &str, y_metric: &str, theme: Theme) -> ChartSpec {
    let mut companies = Vec::new();
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let mut sizes = Vec::new();
    for company in reference::COMPETITIVE_COMPANIES {
        let (Some(x), Some(y)) = (
            reference::competitive_metric(x_metric, company),
            reference::competitive_metric(y_metric, company),
        ) else {
            continue;
        };
        companies.push(company.to_string());
        xs.push(x);
        ys.push(y);
        sizes.push(reference::competitive_metric("Market Cap", company).unwrap_or(0.0));
    }

    let title = format!("Competitive Analysis: {x_metric} vs {y_metric}");
    ChartSpec::new(ChartKind::Bubble, &title, theme, companies)
        .x_label(x_metric)
        .y_label(y_metric)
        .series(Series::new(x_metric, xs))
        .series(Series::new(y_metric, ys))
        .series(Series::new("Market Cap ($B)", sizes))
}

/// Annual carbon offset bars with the cumulative total as a line.
pub fn carbon_offset(table: &TimeSeriesTable, theme: Theme) -> ChartSpec {
    let offsets = metric_or_placeholder(table, "Carbon Offset (Mt CO2)");
    let mut running = 0.0;
    let cumulative: Vec<f64> = offsets
        .iter()
        .map(|v| {
            if v.is_finite() {
                running += v;
            }
            running
        })
        .collect();

    ChartSpec::new(
        ChartKind::Line,
        "Estimated Carbon Offset",
        theme,
        year_labels(table),
    )
    .x_label("Year")
    .y_label("Million Metric Tons CO2")
    .series(Series::new("Carbon Offset", offsets).color(palette::ACCENT_GREEN).bars())
    .series(Series::new("Cumulative Offset", cumulative).color(palette::BRAND_RED))
}

/// Solar deployment and energy storage on independent axes.
pub fn energy_production(table: &TimeSeriesTable, theme: Theme) -> ChartSpec {
    ChartSpec::new(ChartKind::Line, "Energy Production", theme, year_labels(table))
        .x_label("Year")
        .y_label("Solar Deployment (MW)")
        .secondary_y_label("Energy Storage (MWh)")
        .series(
            Series::new(
                "Solar Deployment (MW)",
                metric_or_placeholder(table, "Solar Deployment (MW)"),
            )
            .color(palette::GOLD),
        )
        .series(
            Series::new(
                "Energy Storage (MWh)",
                metric_or_placeholder(table, "Energy Storage (MWh)"),
            )
            .color(palette::STEEL_BLUE)
            .secondary_axis(),
        )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The values of a requested metric, or the placeholder linear series when
/// the table has no such column. Mirrors the adapter's never-fail policy so a
/// bad metric name degrades to a visible-but-wrong line instead of an error.
fn metric_or_placeholder(table: &TimeSeriesTable, name: &str) -> Vec<f64> {
    match table.column(name) {
        Some(values) => values.to_vec(),
        None => {
            debug!(metric = name, "metric absent from table, substituting placeholder series");
            placeholder_series(table.len())
        }
    }
}

/// 1000, 2000, 3000, ... — obviously synthetic, same length as the axis.
fn placeholder_series(len: usize) -> Vec<f64> {
    (1..=len).map(|i| 1_000.0 * i as f64).collect()
}

/// Rescales a close series so its first usable value becomes 100. `None`
/// when the column is absent or never finite and nonzero.
fn normalize_to_first(values: Option<&[f64]>) -> Option<Vec<f64>> {
    let values = values?;
    let base = values.iter().copied().find(|v| v.is_finite() && *v != 0.0)?;
    Some(values.iter().map(|v| v / base * 100.0).collect())
}

/// Trailing mean over `window` points; NAN until the window fills, and NAN
/// wherever the window contains a NAN input.
fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            if i + 1 < window {
                f64::NAN
            } else {
                let slice = &values[i + 1 - window..=i];
                slice.iter().sum::<f64>() / window as f64
            }
        })
        .collect()
}

fn date_labels(table: &TimeSeriesTable) -> Vec<String> {
    table
        .timestamps()
        .iter()
        .map(|date| date.format("%Y-%m-%d").to_string())
        .collect()
}

fn year_labels(table: &TimeSeriesTable) -> Vec<String> {
    table
        .timestamps()
        .iter()
        .map(|date| date.year().to_string())
        .collect()
}

/// Fiscal period labels: "Q1 2024" at quarterly cadence, "FY 2024" at annual.
fn period_labels(table: &TimeSeriesTable, cadence: Cadence) -> Vec<String> {
    table
        .timestamps()
        .iter()
        .map(|date| match cadence {
            Cadence::Quarterly => format!("Q{} {}", (date.month0() / 3) + 1, date.year()),
            Cadence::Annual => format!("FY {}", date.year()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn quarterly_table(n: usize) -> TimeSeriesTable {
        let axis: Vec<NaiveDate> = (0..n)
            .map(|i| {
                NaiveDate::from_ymd_opt(2023 + i as i32 / 4, ((i % 4) as u32) * 3 + 1, 1).unwrap()
            })
            .collect();
        TimeSeriesTable::new(axis).unwrap()
    }

    #[test]
    fn absent_metric_gets_placeholder_series() {
        let table = quarterly_table(8).with_column("Total Revenue", vec![1.0; 8]);
        let spec = financial_metrics(
            &table,
            &["Total Revenue", "No Such Metric"],
            Cadence::Quarterly,
            Theme::Default,
        );

        assert_eq!(spec.series.len(), 2);
        for series in &spec.series {
            assert_eq!(series.values.len(), spec.categories.len());
        }
        assert_eq!(
            spec.series[1].values,
            vec![1000.0, 2000.0, 3000.0, 4000.0, 5000.0, 6000.0, 7000.0, 8000.0]
        );
    }

    #[test]
    fn builders_are_pure() {
        let table = quarterly_table(8)
            .with_column("Gross Margin", vec![25.0; 8])
            .with_column("Operating Margin", vec![11.0; 8])
            .with_column("Net Profit Margin", vec![9.0; 8])
            .with_column("Return on Equity", vec![13.0; 8]);
        assert_eq!(
            ratio_trends(&table, Theme::Dark),
            ratio_trends(&table, Theme::Dark)
        );
    }

    #[test]
    fn price_history_has_dual_axis_and_moving_averages() {
        let axis: Vec<NaiveDate> = (0..60)
            .map(|i| NaiveDate::from_num_days_from_ce_opt(738000 + i).unwrap())
            .collect();
        let closes: Vec<f64> = (0..60).map(|i| i as f64).collect();
        let table = TimeSeriesTable::new(axis)
            .unwrap()
            .with_column("Close", closes)
            .with_column("Volume", vec![5.0; 60]);

        let spec = price_history(&table, Theme::Default);
        assert_eq!(spec.kind, ChartKind::Line);
        let volume = &spec.series[1];
        assert_eq!(volume.trace, crate::model::TraceKind::Bar);
        assert_eq!(volume.axis, crate::model::AxisSide::Secondary);

        let ma_50 = &spec.series[2];
        assert!(ma_50.values[48].is_nan());
        // Mean of 0..=49 is 24.5.
        assert_eq!(ma_50.values[49], 24.5);
        // 200-day window never fills on 60 rows.
        assert!(spec.series[3].values.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn model_mix_skips_unshipped_models() {
        let table = quarterly_table(4)
            .with_column("Model 3", vec![10.0; 4])
            .with_column("Model Y", vec![20.0; 4])
            .with_column("Model S", vec![3.0; 4])
            .with_column("Model X", vec![4.0; 4])
            .with_column("Cybertruck", vec![0.0; 4]);

        let spec = model_mix(&table, Theme::Default);
        assert_eq!(spec.kind, ChartKind::Pie);
        assert_eq!(spec.categories.len(), 4);
        assert!(!spec.categories.iter().any(|c| c == "Cybertruck"));
        assert_eq!(spec.series[0].values, vec![40.0, 80.0, 12.0, 16.0]);
        assert_eq!(spec.slice_colors.len(), 4);
    }

    #[test]
    fn radar_aligns_baseline_with_score_axis() {
        let metrics = MetricSet::from_pairs([
            ("Renewable Energy Use", 85.0),
            ("Water Recycling", 70.0),
            ("Never Heard Of It", 10.0),
        ]);
        let spec = sustainability_radar(&metrics, Theme::Light);
        assert_eq!(spec.kind, ChartKind::Radar);
        assert_eq!(spec.series.len(), 2);
        assert_eq!(spec.series[0].values.len(), spec.categories.len());
        assert_eq!(spec.series[1].values, vec![50.0, 40.0, 0.0]);
    }

    #[test]
    fn comparison_indexes_each_ticker_to_its_own_first_close() {
        let primary = quarterly_table(3).with_column("Close", vec![10.0, 20.0, 30.0]);
        let rival = quarterly_table(3).with_column("Close", vec![50.0, 25.0, 75.0]);
        let dead = quarterly_table(3).with_column("Close", vec![f64::NAN; 3]);

        let spec = normalized_comparison(
            &[("TSLA", &primary), ("F", &rival), ("GM", &dead)],
            Theme::Dark,
        );
        assert_eq!(spec.series.len(), 2);
        assert_eq!(spec.series[0].values, vec![100.0, 200.0, 300.0]);
        assert_eq!(spec.series[0].color.as_deref(), Some(palette::BRAND_RED));
        assert_eq!(spec.series[1].values, vec![100.0, 50.0, 150.0]);
        assert_eq!(spec.series[1].name, "F");
    }

    #[test]
    fn comparison_base_skips_leading_nan_closes() {
        let table = quarterly_table(3).with_column("Close", vec![f64::NAN, 40.0, 60.0]);
        let spec = normalized_comparison(&[("TSLA", &table)], Theme::Default);
        assert!(spec.series[0].values[0].is_nan());
        assert_eq!(spec.series[0].values[1], 100.0);
        assert_eq!(spec.series[0].values[2], 150.0);
    }

    #[test]
    fn competitive_matrix_carries_xy_and_size_per_company() {
        let spec = competitive_matrix("Revenue Growth", "Profit Margin", Theme::Default);
        assert_eq!(spec.kind, ChartKind::Bubble);
        assert_eq!(spec.categories.len(), 7);
        assert_eq!(spec.categories[0], "TSLA");
        assert_eq!(spec.series.len(), 3);
        assert_eq!(spec.series[0].values[0], 25.0);
        assert_eq!(spec.series[1].values[0], 12.0);
        assert_eq!(spec.series[2].values[0], 650.0);
        // Every series stays aligned with the company axis.
        for series in &spec.series {
            assert_eq!(series.values.len(), spec.categories.len());
        }
    }

    #[test]
    fn competitive_matrix_drops_companies_missing_a_metric() {
        let spec = competitive_matrix("Revenue Growth", "No Such Metric", Theme::Default);
        assert!(spec.categories.is_empty());
        assert!(spec.series.iter().all(|s| s.values.is_empty()));
    }

    #[test]
    fn carbon_offset_accumulates() {
        let axis: Vec<NaiveDate> = (2018..2021)
            .map(|y| NaiveDate::from_ymd_opt(y, 12, 31).unwrap())
            .collect();
        let table = TimeSeriesTable::new(axis)
            .unwrap()
            .with_column("Carbon Offset (Mt CO2)", vec![1.0, 2.0, 3.0]);
        let spec = carbon_offset(&table, Theme::Default);
        assert_eq!(spec.categories, vec!["2018", "2019", "2020"]);
        assert_eq!(spec.series[1].values, vec![1.0, 3.0, 6.0]);
    }

    #[test]
    fn period_labels_follow_cadence() {
        let table = quarterly_table(5);
        assert_eq!(
            period_labels(&table, Cadence::Quarterly)[..2],
            ["Q1 2023".to_string(), "Q2 2023".to_string()]
        );
        assert_eq!(period_labels(&table, Cadence::Annual)[0], "FY 2023");
    }
}
