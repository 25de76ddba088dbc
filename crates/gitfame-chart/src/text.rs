//! Fixed-width terminal bar chart renderer.

use std::fmt::Write;

use crate::BarChart;

const BAR_WIDTH: usize = 40;

/// Render the chart as aligned terminal rows.
pub(crate) fn render(chart: &BarChart) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", chart.title);
    let _ = writeln!(out, "{:-<72}", "");

    if chart.is_empty() {
        let _ = writeln!(out, "  no data");
        return out;
    }

    let max = chart.max_value().max(1);
    let label_w = chart
        .bars
        .iter()
        .map(|b| b.label.chars().count())
        .max()
        .unwrap_or(0);
    let value_w = max.to_string().len();

    for bar in &chart.bars {
        let mut len = (bar.value as f64 / max as f64 * BAR_WIDTH as f64).round() as usize;
        if bar.value > 0 {
            len = len.max(1);
        }
        let _ = writeln!(
            out,
            "  {:<label_w$}  {:>value_w$}  {}",
            bar.label,
            bar.value,
            "\u{2588}".repeat(len),
        );
    }

    out
}
