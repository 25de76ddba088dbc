//! Standalone SVG bar chart renderer.

use chrono::Local;

use crate::BarChart;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 110.0;
const BAR_OPACITY: f64 = 0.7;
const Y_TICKS: u32 = 4;

/// Render the chart as a self-contained SVG document.
pub(crate) fn render(chart: &BarChart) -> String {
    let width = f64::from(chart.width);
    let height = f64::from(chart.height);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" \
         viewBox=\"0 0 {w} {h}\" font-family=\"sans-serif\">\n",
        w = chart.width,
        h = chart.height,
    ));
    svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");

    // Title
    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"28\" text-anchor=\"middle\" font-size=\"17\" font-weight=\"bold\">{}</text>\n",
        width / 2.0,
        escape(&chart.title),
    ));

    if chart.is_empty() {
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"13\" fill=\"#666666\">no data</text>\n",
            width / 2.0,
            height / 2.0,
        ));
        svg.push_str("</svg>\n");
        return svg;
    }

    let plot_w = width - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = height - MARGIN_TOP - MARGIN_BOTTOM;
    let base_y = MARGIN_TOP + plot_h;
    let max = chart.max_value().max(1) as f64;

    // Horizontal gridlines and y-axis tick values
    for tick in 0..=Y_TICKS {
        let value = max * f64::from(tick) / f64::from(Y_TICKS);
        let y = base_y - plot_h * f64::from(tick) / f64::from(Y_TICKS);
        if tick > 0 {
            svg.push_str(&format!(
                "<line x1=\"{:.1}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"#dddddd\"/>\n",
                MARGIN_LEFT,
                MARGIN_LEFT + plot_w,
            ));
        }
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"11\" fill=\"#333333\">{:.0}</text>\n",
            MARGIN_LEFT - 8.0,
            y + 4.0,
            value,
        ));
    }

    // Bars, value labels, rotated category labels
    let band = plot_w / chart.bars.len() as f64;
    let bar_w = band * 0.7;
    for (i, bar) in chart.bars.iter().enumerate() {
        let x = MARGIN_LEFT + band * i as f64 + band * 0.15;
        let bar_h = plot_h * bar.value as f64 / max;
        let y = base_y - bar_h;
        let center = x + bar_w / 2.0;

        svg.push_str(&format!(
            "<rect x=\"{x:.1}\" y=\"{y:.1}\" width=\"{bar_w:.1}\" height=\"{bar_h:.1}\" \
             fill=\"{}\" fill-opacity=\"{BAR_OPACITY}\"/>\n",
            chart.color.fill(),
        ));
        svg.push_str(&format!(
            "<text x=\"{center:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"11\">{}</text>\n",
            y - 4.0,
            bar.value,
        ));
        svg.push_str(&format!(
            "<text x=\"{center:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"11\" \
             transform=\"rotate(-45 {center:.1} {:.1})\">{}</text>\n",
            base_y + 16.0,
            base_y + 16.0,
            escape(&bar.label),
        ));
    }

    // Axes
    svg.push_str(&format!(
        "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{base_y:.1}\" stroke=\"#333333\"/>\n",
        MARGIN_LEFT, MARGIN_TOP, MARGIN_LEFT,
    ));
    svg.push_str(&format!(
        "<line x1=\"{:.1}\" y1=\"{base_y:.1}\" x2=\"{:.1}\" y2=\"{base_y:.1}\" stroke=\"#333333\"/>\n",
        MARGIN_LEFT,
        MARGIN_LEFT + plot_w,
    ));

    // Axis labels
    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"13\">{}</text>\n",
        MARGIN_LEFT + plot_w / 2.0,
        height - 12.0,
        escape(&chart.x_label),
    ));
    svg.push_str(&format!(
        "<text x=\"18\" y=\"{mid:.1}\" text-anchor=\"middle\" font-size=\"13\" \
         transform=\"rotate(-90 18 {mid:.1})\">{}</text>\n",
        escape(&chart.y_label),
        mid = MARGIN_TOP + plot_h / 2.0,
    ));

    // Generated-at footer
    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"9\" fill=\"#999999\">generated {}</text>\n",
        width - 6.0,
        height - 6.0,
        Local::now().format("%Y-%m-%d %H:%M"),
    ));

    svg.push_str("</svg>\n");
    svg
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChartColor;

    fn sample() -> BarChart {
        let mut chart = BarChart::new(
            "Commits per Author",
            "Authors",
            "Number of Commits",
            ChartColor::Blue,
        );
        chart.push("alice", 3);
        chart.push("bob", 1);
        chart
    }

    #[test]
    fn renders_one_rect_per_bar() {
        let svg = render(&sample());
        assert_eq!(svg.matches("<rect").count(), 3); // background + 2 bars
        assert!(svg.contains("fill=\"#1f77b4\""));
        assert!(svg.contains("fill-opacity=\"0.7\""));
    }

    #[test]
    fn includes_title_and_axis_labels() {
        let svg = render(&sample());
        assert!(svg.contains("Commits per Author"));
        assert!(svg.contains("Authors"));
        assert!(svg.contains("Number of Commits"));
    }

    #[test]
    fn escapes_markup_in_labels() {
        let mut chart = sample();
        chart.push("bots <ci&cd>", 2);
        let svg = render(&chart);
        assert!(svg.contains("bots &lt;ci&amp;cd&gt;"));
        assert!(!svg.contains("<ci&cd>"));
    }

    #[test]
    fn empty_chart_renders_placeholder() {
        let chart = BarChart::new("t", "x", "y", ChartColor::Green);
        let svg = render(&chart);
        assert!(svg.contains("no data"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn tallest_bar_spans_the_plot_height() {
        let svg = render(&sample());
        // plot height = 500 - 50 - 110 = 340; the max bar uses all of it
        assert!(svg.contains("height=\"340.0\""));
    }
}
