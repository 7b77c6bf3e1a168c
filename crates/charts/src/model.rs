use core_types::Theme;
use serde::{Deserialize, Serialize};

/// The overall shape of a visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Radar,
    Bubble,
    Choropleth,
}

/// How a single series is drawn inside a line/bar chart. Mixed charts (price
/// line over volume bars) set this per series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    #[default]
    Line,
    Bar,
}

/// Which y axis a series is plotted against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisSide {
    #[default]
    Primary,
    Secondary,
}

/// One named data series, aligned index-for-index to the chart's category
/// axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
    /// Hex color (or rgba/scale token) applied to the whole trace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub trace: TraceKind,
    #[serde(default)]
    pub axis: AxisSide,
}

impl Series {
    pub fn new(name: &str, values: Vec<f64>) -> Self {
        Self {
            name: name.to_string(),
            values,
            color: None,
            trace: TraceKind::Line,
            axis: AxisSide::Primary,
        }
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn bars(mut self) -> Self {
        self.trace = TraceKind::Bar;
        self
    }

    pub fn secondary_axis(mut self) -> Self {
        self.axis = AxisSide::Secondary;
        self
    }
}

/// A declarative, renderer-agnostic chart description.
///
/// Built fresh by every builder call and never mutated afterwards; the
/// external renderer consumes it as JSON and applies the theme token
/// verbatim. For pie and choropleth charts `categories` carry the slice
/// labels / country names and `slice_colors`, when present, color them
/// one-to-one. For bubble charts `categories` carry the point labels and the
/// three series are the x metric, y metric, and bubble size, in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub theme: Theme,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_y_label: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slice_colors: Vec<String>,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: &str, theme: Theme, categories: Vec<String>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            theme,
            categories,
            series: Vec::new(),
            x_label: None,
            y_label: None,
            secondary_y_label: None,
            slice_colors: Vec::new(),
        }
    }

    pub fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn x_label(mut self, label: &str) -> Self {
        self.x_label = Some(label.to_string());
        self
    }

    pub fn y_label(mut self, label: &str) -> Self {
        self.y_label = Some(label.to_string());
        self
    }

    pub fn secondary_y_label(mut self, label: &str) -> Self {
        self.secondary_y_label = Some(label.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_lowercase_tokens() {
        let spec = ChartSpec::new(
            ChartKind::Line,
            "t",
            Theme::Dark,
            vec!["a".to_string()],
        )
        .series(Series::new("s", vec![1.0]).bars().secondary_axis());

        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["kind"], "line");
        assert_eq!(json["theme"], "dark");
        assert_eq!(json["series"][0]["trace"], "bar");
        assert_eq!(json["series"][0]["axis"], "secondary");
        // Unset layout fields stay off the wire.
        assert!(json.get("x_label").is_none());
    }
}
