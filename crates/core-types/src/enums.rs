use serde::{Deserialize, Serialize};

/// The reporting frequency of a financial statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Quarterly,
    Annual,
}

impl Cadence {
    /// Number of periods a placeholder statement table is sized to when the
    /// provider has nothing for us.
    pub fn placeholder_periods(&self) -> usize {
        match self {
            Cadence::Quarterly => 8,
            Cadence::Annual => 5,
        }
    }

    /// Human-readable label used in chart titles.
    pub fn label(&self) -> &'static str {
        match self {
            Cadence::Quarterly => "Quarterly",
            Cadence::Annual => "Annual",
        }
    }
}

/// The visual theme token handed verbatim to the external renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    #[default]
    Default,
    Light,
}

impl Theme {
    /// The token the renderer recognizes.
    pub fn token(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Default => "default",
            Theme::Light => "light",
        }
    }
}

/// How much delivery history a view wants to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryWindow {
    LastQuarter,
    LastYear,
    AllTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_tokens_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(
            serde_json::to_string(&Theme::Default).unwrap(),
            "\"default\""
        );
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
    }

    #[test]
    fn placeholder_periods_match_cadence() {
        assert_eq!(Cadence::Quarterly.placeholder_periods(), 8);
        assert_eq!(Cadence::Annual.placeholder_periods(), 5);
    }
}
