//! Bar chart descriptions and renderers.
//!
//! A [`BarChart`] is a pure, serializable description of what to draw:
//! labeled values plus title, axis labels, color, and canvas size. Rendering
//! is a separate, swappable step — [`render`] dispatches to a standalone SVG
//! document or fixed-width terminal rows, both produced as plain strings
//! with no display side effects.

mod svg;
mod text;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single labeled bar.
///
/// # Examples
///
/// ```
/// use gitfame_chart::Bar;
///
/// let bar = Bar {
///     label: "alice".into(),
///     value: 42,
/// };
/// assert_eq!(bar.value, 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    /// Category label shown under the bar.
    pub label: String,
    /// Bar magnitude.
    pub value: u64,
}

/// A renderable bar chart description.
///
/// # Examples
///
/// ```
/// use gitfame_chart::{BarChart, ChartColor};
///
/// let mut chart = BarChart::new("Commits per Author", "Authors", "Number of Commits", ChartColor::Blue);
/// chart.push("alice", 3);
/// chart.push("bob", 1);
/// assert_eq!(chart.max_value(), 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChart {
    /// Chart title.
    pub title: String,
    /// Horizontal axis label.
    pub x_label: String,
    /// Vertical axis label.
    pub y_label: String,
    /// Bar fill color.
    pub color: ChartColor,
    /// Canvas width in pixels (SVG renderer only).
    pub width: u32,
    /// Canvas height in pixels (SVG renderer only).
    pub height: u32,
    /// Bars in display order.
    pub bars: Vec<Bar>,
}

impl BarChart {
    /// Create an empty chart with the default 1000x500 canvas.
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        color: ChartColor,
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            color,
            width: 1000,
            height: 500,
            bars: Vec::new(),
        }
    }

    /// Set the canvas size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Append one bar.
    pub fn push(&mut self, label: impl Into<String>, value: u64) {
        self.bars.push(Bar {
            label: label.into(),
            value,
        });
    }

    /// Keep only the first `n` bars; 0 keeps everything.
    ///
    /// Callers feed bars already ordered by magnitude, so this truncates to
    /// the top entries.
    pub fn keep_top(&mut self, n: usize) {
        if n > 0 && self.bars.len() > n {
            self.bars.truncate(n);
        }
    }

    /// Largest bar value, or 0 for an empty chart.
    pub fn max_value(&self) -> u64 {
        self.bars.iter().map(|b| b.value).max().unwrap_or(0)
    }

    /// Whether the chart has no bars.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Named bar colors, matching the color names accepted in `.gitfame.toml`.
///
/// # Examples
///
/// ```
/// use gitfame_chart::ChartColor;
///
/// let color: ChartColor = "green".parse().unwrap();
/// assert_eq!(color, ChartColor::Green);
/// assert_eq!(color.fill(), "#2ca02c");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartColor {
    /// Default commits-chart color.
    #[default]
    Blue,
    /// Default ownership-chart color.
    Green,
    Orange,
    Red,
    Purple,
    Gray,
}

impl ChartColor {
    /// Hex fill value for SVG output.
    pub fn fill(self) -> &'static str {
        match self {
            ChartColor::Blue => "#1f77b4",
            ChartColor::Green => "#2ca02c",
            ChartColor::Orange => "#ff7f0e",
            ChartColor::Red => "#d62728",
            ChartColor::Purple => "#9467bd",
            ChartColor::Gray => "#7f7f7f",
        }
    }
}

impl fmt::Display for ChartColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartColor::Blue => "blue",
            ChartColor::Green => "green",
            ChartColor::Orange => "orange",
            ChartColor::Red => "red",
            ChartColor::Purple => "purple",
            ChartColor::Gray => "gray",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ChartColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blue" => Ok(ChartColor::Blue),
            "green" => Ok(ChartColor::Green),
            "orange" => Ok(ChartColor::Orange),
            "red" => Ok(ChartColor::Red),
            "purple" => Ok(ChartColor::Purple),
            "gray" | "grey" => Ok(ChartColor::Gray),
            other => Err(format!("unknown chart color: {other}")),
        }
    }
}

/// Supported chart renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFormat {
    /// Standalone SVG document.
    Svg,
    /// Fixed-width terminal rows.
    Text,
}

impl fmt::Display for ChartFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartFormat::Svg => write!(f, "svg"),
            ChartFormat::Text => write!(f, "text"),
        }
    }
}

impl FromStr for ChartFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "svg" => Ok(ChartFormat::Svg),
            "text" | "txt" | "terminal" => Ok(ChartFormat::Text),
            other => Err(format!("unknown chart format: {other}")),
        }
    }
}

/// Render a chart in the given format.
///
/// # Examples
///
/// ```
/// use gitfame_chart::{render, BarChart, ChartColor, ChartFormat};
///
/// let mut chart = BarChart::new("Commits per Author", "Authors", "Commits", ChartColor::Blue);
/// chart.push("alice", 3);
/// let svg = render(&chart, ChartFormat::Svg);
/// assert!(svg.starts_with("<svg"));
/// ```
pub fn render(chart: &BarChart, format: ChartFormat) -> String {
    match format {
        ChartFormat::Svg => svg::render(chart),
        ChartFormat::Text => text::render(chart),
    }
}

/// Recommended file extension for a chart format.
pub fn file_extension(format: ChartFormat) -> &'static str {
    match format {
        ChartFormat::Svg => "svg",
        ChartFormat::Text => "txt",
    }
}
