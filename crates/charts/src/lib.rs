pub mod builder;
pub mod model;
pub mod palette;
pub mod reference;

// Re-export the chart API to provide a clean public surface.
pub use builder::{
    carbon_offset, competitive_matrix, delivery_trends, energy_production, financial_metrics,
    market_share, model_mix, normalized_comparison, price_history, ratio_trends, regional_sales,
    sustainability_radar,
};
pub use model::{AxisSide, ChartKind, ChartSpec, Series, TraceKind};
