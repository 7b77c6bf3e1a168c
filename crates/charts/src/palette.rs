//! The dashboard's fixed colors. Kept in one place so the builders stay free
//! of scattered literals.

pub const ACCENT_RED: &str = "#FF3A33";
pub const ACCENT_BLUE: &str = "#22BBFF";
pub const ACCENT_PURPLE: &str = "#9B59FF";
pub const ACCENT_GREEN: &str = "#27AE60";

pub const BRAND_RED: &str = "#E31937";
pub const SKY_BLUE: &str = "#1C9BF0";
pub const VIOLET: &str = "#8E44AD";
pub const GOLD: &str = "#F1C40F";
pub const STEEL_BLUE: &str = "#3498DB";
pub const AMBER: &str = "#E67E22";
pub const NEUTRAL_GRAY: &str = "#95A5A6";
pub const VOLUME_GRAY: &str = "rgba(180, 180, 180, 0.4)";

/// Cycled through grouped metric series.
pub const METRIC_CYCLE: [&str; 4] = [ACCENT_RED, ACCENT_BLUE, ACCENT_PURPLE, ACCENT_GREEN];

/// Cycled through competitor lines on the normalized comparison chart; the
/// primary ticker always gets [`BRAND_RED`].
pub const COMPARISON_CYCLE: [&str; 6] =
    [SKY_BLUE, ACCENT_GREEN, VIOLET, GOLD, AMBER, STEEL_BLUE];

const MODEL_COLORS: &[(&str, &str)] = &[
    ("Model 3", SKY_BLUE),
    ("Model Y", ACCENT_GREEN),
    ("Model S", BRAND_RED),
    ("Model X", VIOLET),
    ("Cybertruck", GOLD),
];

const MANUFACTURER_COLORS: &[(&str, &str)] = &[
    ("Tesla", BRAND_RED),
    ("BYD", SKY_BLUE),
    ("Volkswagen", ACCENT_GREEN),
    ("SAIC", VIOLET),
    ("BMW", GOLD),
    ("Hyundai-Kia", AMBER),
    ("Nissan", STEEL_BLUE),
    ("BAIC", "#9B59B6"),
    ("Stellantis", "#2ECC71"),
    ("Others", NEUTRAL_GRAY),
];

pub fn model_color(model: &str) -> &'static str {
    lookup(MODEL_COLORS, model)
}

pub fn manufacturer_color(manufacturer: &str) -> &'static str {
    lookup(MANUFACTURER_COLORS, manufacturer)
}

fn lookup(table: &'static [(&str, &str)], key: &str) -> &'static str {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, color)| *color)
        .unwrap_or(NEUTRAL_GRAY)
}
