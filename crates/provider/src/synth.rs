use chrono::{NaiveDate, Utc};
use core_types::{DeliveryWindow, TimeSeriesTable};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::dates;

// Delivery growth model: base volume in 2019-Q1, then a per-quarter growth
// factor drawn from a fixed-seed normal distribution. The seed is part of the
// contract: callers cache and test against the exact trajectory.
const DELIVERY_SEED: u64 = 42;
const BASE_DELIVERIES: f64 = 63_000.0;
const GROWTH_MEAN: f64 = 1.10;
const GROWTH_STD_DEV: f64 = 0.05;

// Mix percentages, linearly interpolated across the full history.
const MODEL_3Y_SHARE: (f64, f64) = (0.75, 0.95);
const MODEL_3_SHARE_OF_3Y: (f64, f64) = (0.80, 0.45);
const MODEL_S_SHARE_OF_SX: (f64, f64) = (0.60, 0.50);

// Cybertruck ships nothing before 2023-Q4, then ramps front-loaded:
// 2 000 in its first quarter, 10 000 more each quarter after that.
const CYBERTRUCK_FIRST_QUARTER: (i32, u32) = (2023, 4);
const CYBERTRUCK_FIRST_VOLUME: f64 = 2_000.0;
const CYBERTRUCK_QUARTERLY_STEP: f64 = 10_000.0;

/// Deterministic quarterly delivery series from 2019-Q1 to the current
/// quarter. See [`delivery_series_at`] for the exact model.
pub fn delivery_series() -> TimeSeriesTable {
    delivery_series_at(Utc::now().date_naive())
}

/// The delivery series anchored at an explicit "today".
///
/// Identical `today` values yield bit-identical tables. All columns hold
/// whole vehicles, and the splits are exact by construction:
/// `Model 3/Y + Model S/X == Total Deliveries` and each family's two models
/// sum back to the family column.
pub fn delivery_series_at(today: NaiveDate) -> TimeSeriesTable {
    let axis = delivery_quarters(today);
    let n = axis.len();
    let mut table = TimeSeriesTable::new(axis.clone()).unwrap_or_else(|_| TimeSeriesTable::empty());
    if n == 0 {
        return table;
    }

    let mut rng = StdRng::seed_from_u64(DELIVERY_SEED);
    let growth = Normal::new(GROWTH_MEAN, GROWTH_STD_DEV)
        .map(|dist| (0..n).map(|_| dist.sample(&mut rng)).collect::<Vec<f64>>())
        .unwrap_or_else(|_| vec![GROWTH_MEAN; n]);

    let mut total = Vec::with_capacity(n);
    total.push(BASE_DELIVERIES);
    for i in 1..n {
        total.push(total[i - 1] * growth[i]);
    }
    let total: Vec<f64> = total.into_iter().map(f64::trunc).collect();

    // Family split, then per-family model split. Complements are computed by
    // subtraction after truncation so each level sums exactly.
    let share_3y = linspace(MODEL_3Y_SHARE.0, MODEL_3Y_SHARE.1, n);
    let model_3y: Vec<f64> = total
        .iter()
        .zip(&share_3y)
        .map(|(t, share)| (t * share).trunc())
        .collect();
    let model_sx: Vec<f64> = total.iter().zip(&model_3y).map(|(t, m)| t - m).collect();

    let share_3 = linspace(MODEL_3_SHARE_OF_3Y.0, MODEL_3_SHARE_OF_3Y.1, n);
    let model_3: Vec<f64> = model_3y
        .iter()
        .zip(&share_3)
        .map(|(family, share)| (family * share).trunc())
        .collect();
    let model_y: Vec<f64> = model_3y.iter().zip(&model_3).map(|(f, m)| f - m).collect();

    let share_s = linspace(MODEL_S_SHARE_OF_SX.0, MODEL_S_SHARE_OF_SX.1, n);
    let model_s: Vec<f64> = model_sx
        .iter()
        .zip(&share_s)
        .map(|(family, share)| (family * share).trunc())
        .collect();
    let model_x: Vec<f64> = model_sx.iter().zip(&model_s).map(|(f, m)| f - m).collect();

    let cybertruck = cybertruck_ramp(&axis);

    table.insert_column("Total Deliveries", total);
    table.insert_column("Model 3/Y", model_3y);
    table.insert_column("Model S/X", model_sx);
    table.insert_column("Model 3", model_3);
    table.insert_column("Model Y", model_y);
    table.insert_column("Model S", model_s);
    table.insert_column("Model X", model_x);
    table.insert_column("Cybertruck", cybertruck);
    table
}

/// Deterministic yearly environmental series from 2018 to the current year.
pub fn environmental_series() -> TimeSeriesTable {
    environmental_series_at(Utc::now().date_naive())
}

/// The environmental series anchored at an explicit "today".
///
/// Each field follows an independent compound growth model from a fixed base.
pub fn environmental_series_at(today: NaiveDate) -> TimeSeriesTable {
    let axis = dates::year_ends_through(2018, today);
    let n = axis.len();
    let mut table = TimeSeriesTable::new(axis).unwrap_or_else(|_| TimeSeriesTable::empty());

    // (name, base, annual growth factor, whole-unit field)
    let models: [(&str, f64, f64, bool); 4] = [
        ("Carbon Offset (Mt CO2)", 3.5, 1.40, false),
        ("Solar Deployment (MW)", 200.0, 1.30, true),
        ("Energy Storage (MWh)", 1_000.0, 1.50, true),
        ("Supercharger Stations", 1_100.0, 1.35, true),
    ];
    for (name, base, growth, whole) in models {
        let mut values = Vec::with_capacity(n);
        let mut value = base;
        for _ in 0..n {
            values.push(if whole {
                value.trunc()
            } else {
                (value * 100.0).round() / 100.0
            });
            value *= growth;
        }
        table.insert_column(name, values);
    }
    table
}

/// Restricts a delivery table to the requested display window.
pub fn filter_delivery_window(table: &TimeSeriesTable, window: DeliveryWindow) -> TimeSeriesTable {
    match window {
        DeliveryWindow::LastQuarter => table.tail(1),
        DeliveryWindow::LastYear => table.tail(4),
        DeliveryWindow::AllTime => table.clone(),
    }
}

/// Quarter-end axis from 2019-Q1 through the current quarter, mirroring the
/// period count rule `(years since 2019) * 4 + completed quarters`.
fn delivery_quarters(today: NaiveDate) -> Vec<NaiveDate> {
    use chrono::Datelike;
    let count = (today.year() - 2019) * 4 + (today.month() / 3) as i32;
    if count <= 0 {
        return Vec::new();
    }
    dates::quarter_ends_from(2019, 1, count as usize)
}

fn cybertruck_ramp(axis: &[NaiveDate]) -> Vec<f64> {
    let start = dates::quarter_end(CYBERTRUCK_FIRST_QUARTER.0, CYBERTRUCK_FIRST_QUARTER.1);
    let mut shipped = 0u32;
    axis.iter()
        .map(|quarter| {
            if *quarter < start {
                0.0
            } else {
                let volume = if shipped == 0 {
                    CYBERTRUCK_FIRST_VOLUME
                } else {
                    CYBERTRUCK_QUARTERLY_STEP * shipped as f64
                };
                shipped += 1;
                volume
            }
        })
        .collect()
}

/// `n` evenly spaced values from `start` to `end` inclusive.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}
