use anyhow::Context;
use charts::ChartSpec;
use chrono::{Duration, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use core_types::{Cadence, DeliveryWindow, MetricSet, Theme, TimeSeriesTable};
use provider::{DashboardData, HttpMarketData};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// The main entry point for the voltboard dashboard data pump.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if present.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Dump(args) => handle_dump(args).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Produces the full set of dashboard chart specifications as JSON files,
/// ready for the presentation layer to render.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, shape, and write every chart spec to a directory.
    Dump(DumpArgs),
}

#[derive(Parser)]
struct DumpArgs {
    /// Start of the price history range (format: YYYY-MM-DD).
    /// Defaults to the configured history span ending today.
    #[arg(long)]
    from: Option<NaiveDate>,

    /// End of the price history range (format: YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Statement cadence for the financial charts.
    #[arg(long, value_enum, default_value = "quarterly")]
    cadence: CadenceArg,

    /// Market share snapshot year.
    #[arg(long, default_value_t = 2023)]
    share_year: i32,

    /// Output directory for the chart spec JSON files.
    #[arg(long, default_value = "out")]
    out: PathBuf,
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum CadenceArg {
    Quarterly,
    Annual,
}

impl From<CadenceArg> for Cadence {
    fn from(arg: CadenceArg) -> Self {
        match arg {
            CadenceArg::Quarterly => Cadence::Quarterly,
            CadenceArg::Annual => Cadence::Annual,
        }
    }
}

// ==============================================================================
// Dump Command Logic
// ==============================================================================

/// Orchestrates one full dashboard refresh: fetch, shape, build, write.
async fn handle_dump(args: DumpArgs) -> anyhow::Result<()> {
    let config = configuration::load_config().context("failed to load config.toml")?;
    let theme: Theme = config.dashboard.theme;
    let ticker = config.provider.ticker.clone();

    let today = Utc::now().date_naive();
    let to = args.to.unwrap_or(today);
    let from = args
        .from
        .unwrap_or(to - Duration::days(config.dashboard.history_days as i64));
    let cadence: Cadence = args.cadence.into();

    tracing::info!(%ticker, %from, %to, "building dashboard chart specs");

    let adapter = DashboardData::new(HttpMarketData::new(&config.provider.base_url));

    // Market data. Competitor histories feed the comparison chart; a dead
    // ticker degrades to a placeholder table and is skipped by the builder.
    let prices = adapter.price_history(&ticker, from, to).await?;
    let mut comparison: Vec<(String, TimeSeriesTable)> = vec![(ticker.clone(), prices.clone())];
    for competitor in &config.provider.competitors {
        let history = adapter.price_history(competitor, from, to).await?;
        comparison.push((competitor.clone(), history));
    }
    let statements = adapter.financial_statements(&ticker, cadence).await;
    let ratios = provider::compute_ratios(&statements);

    // Synthetic and snapshot data.
    let deliveries = provider::delivery_series();
    let recent_deliveries = provider::filter_delivery_window(&deliveries, DeliveryWindow::LastYear);
    let environmental = provider::environmental_series();
    let share = provider::market_share_snapshot(args.share_year);
    let sustainability = provider::sustainability_metrics();

    let key_metrics = ["Total Revenue", "Gross Profit", "Operating Income", "Net Income"];
    let comparison_refs: Vec<(&str, &TimeSeriesTable)> = comparison
        .iter()
        .map(|(name, table)| (name.as_str(), table))
        .collect();
    let specs: Vec<(&str, ChartSpec)> = vec![
        ("price_history", charts::price_history(&prices, theme)),
        (
            "stock_comparison",
            charts::normalized_comparison(&comparison_refs, theme),
        ),
        (
            "competitive_matrix",
            charts::competitive_matrix("Revenue Growth", "Profit Margin", theme),
        ),
        (
            "financial_metrics",
            charts::financial_metrics(&statements.income, &key_metrics, cadence, theme),
        ),
        ("ratio_trends", charts::ratio_trends(&ratios, theme)),
        ("delivery_trends", charts::delivery_trends(&deliveries, theme)),
        ("model_mix", charts::model_mix(&recent_deliveries, theme)),
        (
            "market_share",
            charts::market_share(&share, args.share_year, theme),
        ),
        (
            "sustainability_radar",
            charts::sustainability_radar(&sustainability, theme),
        ),
        ("regional_sales", charts::regional_sales(theme)),
        ("carbon_offset", charts::carbon_offset(&environmental, theme)),
        (
            "energy_production",
            charts::energy_production(&environmental, theme),
        ),
    ];

    write_specs(&args.out, &specs)?;

    // Stat-card snapshots ride along as plain metric dumps.
    write_metrics(
        &args.out,
        "production_efficiency",
        &provider::production_efficiency_metrics(),
    )?;
    write_metrics(
        &args.out,
        "energy_metrics",
        &provider::latest_energy_metrics(&environmental),
    )?;

    tracing::info!(count = specs.len(), out = %args.out.display(), "chart specs written");
    Ok(())
}

fn write_specs(out: &Path, specs: &[(&str, ChartSpec)]) -> anyhow::Result<()> {
    std::fs::create_dir_all(out)
        .with_context(|| format!("failed to create output directory {}", out.display()))?;
    for (name, spec) in specs {
        let path = out.join(format!("{name}.json"));
        let json = serde_json::to_string_pretty(spec)
            .with_context(|| format!("failed to serialize {name}"))?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}

fn write_metrics(out: &Path, name: &str, metrics: &MetricSet) -> anyhow::Result<()> {
    std::fs::create_dir_all(out)
        .with_context(|| format!("failed to create output directory {}", out.display()))?;
    let path = out.join(format!("{name}.json"));
    let json = serde_json::to_string_pretty(metrics)
        .with_context(|| format!("failed to serialize {name}"))?;
    std::fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))
}
