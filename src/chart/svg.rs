use crate::chart::geometry::{
    best_so_far, max_cost, max_len, path_data, series_points, value_at, ChartLayout,
};
use crate::gateway::CostPoint;

pub const TRADITIONAL_COLOR: &str = "#ef4444";
pub const HYBRID_COLOR: &str = "#3b82f6";
const GRID_COLOR: &str = "#eee";
const AXIS_COLOR: &str = "#666";

/// Renders the convergence comparison figure as an SVG document: shared
/// axes, both cost polylines, the derived best-so-far overlays (dashed), a
/// legend, and - when a hover index is supplied - the inspection overlay
/// with per-series readouts.
pub fn render_chart_svg(
    traditional: &[CostPoint],
    hybrid: &[CostPoint],
    hover: Option<usize>,
) -> String {
    let layout = ChartLayout::default();
    let shared_len = max_len(traditional, hybrid);
    let peak = max_cost(traditional, hybrid);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" \
         font-family=\"sans-serif\" style=\"background:#fff\">\n",
        layout.width, layout.height
    ));
    svg.push_str(&format!(
        "<text x=\"{}\" y=\"15\" text-anchor=\"middle\" font-weight=\"bold\">Cost Convergence Comparison</text>\n",
        layout.width / 2.0
    ));

    // Horizontal gridlines with y-axis labels, five intervals.
    for tick in 0..=5 {
        let y = layout.height
            - layout.margin_bottom
            - (tick as f64 / 5.0) * layout.plot_height();
        svg.push_str(&format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\"/>\n",
            layout.margin_left,
            y,
            layout.width - layout.margin_right,
            y,
            GRID_COLOR
        ));
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" text-anchor=\"end\" font-size=\"10\" fill=\"#6b7280\">{:.0}</text>\n",
            layout.margin_left - 8.0,
            y + 4.0,
            (tick as f64 / 5.0) * peak
        ));
    }

    // Axes and axis labels.
    svg.push_str(&format!(
        "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\"/>\n",
        layout.margin_left,
        layout.height - layout.margin_bottom,
        layout.width - layout.margin_right,
        layout.height - layout.margin_bottom,
        AXIS_COLOR
    ));
    svg.push_str(&format!(
        "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\"/>\n",
        layout.margin_left,
        layout.margin_top,
        layout.margin_left,
        layout.height - layout.margin_bottom,
        AXIS_COLOR
    ));
    svg.push_str(&format!(
        "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"13\">Iteration</text>\n",
        layout.width / 2.0,
        layout.height - 10.0
    ));
    svg.push_str(&format!(
        "<text x=\"10\" y=\"{y}\" text-anchor=\"middle\" font-size=\"13\" transform=\"rotate(-90 10 {y})\">Cost</text>\n",
        y = layout.height / 2.0
    ));

    // Each series draws through its own points only; a shorter series'
    // polyline simply ends before the right edge.
    for (history, color) in [(traditional, TRADITIONAL_COLOR), (hybrid, HYBRID_COLOR)] {
        let line = series_points(&layout, history.iter().map(|p| p.cost), shared_len, peak);
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\"/>\n",
            path_data(&line),
            color
        ));
        let best = series_points(&layout, best_so_far(history).into_iter(), shared_len, peak);
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\" stroke-dasharray=\"4 4\"/>\n",
            path_data(&best),
            color
        ));
    }

    // Legend.
    let legend = [
        ("Traditional SA", TRADITIONAL_COLOR, false),
        ("Hybrid SA", HYBRID_COLOR, false),
        ("Traditional Best", TRADITIONAL_COLOR, true),
        ("Hybrid Best", HYBRID_COLOR, true),
    ];
    for (row, (label, color, dashed)) in legend.iter().enumerate() {
        let y = 30.0 + row as f64 * 15.0;
        let swatch = if *dashed {
            format!(
                "<rect x=\"{}\" y=\"{}\" width=\"15\" height=\"3\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\" stroke-dasharray=\"4 4\"/>",
                layout.width - 150.0,
                y,
                color
            )
        } else {
            format!(
                "<rect x=\"{}\" y=\"{}\" width=\"15\" height=\"3\" fill=\"{}\"/>",
                layout.width - 150.0,
                y,
                color
            )
        };
        svg.push_str(&swatch);
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" font-size=\"11\">{}</text>\n",
            layout.width - 130.0,
            y + 5.0,
            label
        ));
    }

    if let Some(index) = hover {
        svg.push_str(&render_hover(&layout, traditional, hybrid, shared_len, peak, index));
    }

    svg.push_str("</svg>\n");
    svg
}

fn render_hover(
    layout: &ChartLayout,
    traditional: &[CostPoint],
    hybrid: &[CostPoint],
    shared_len: usize,
    peak: f64,
    index: usize,
) -> String {
    let x = layout.x_scale(index, shared_len);
    let mut overlay = format!(
        "<line x1=\"{x}\" y1=\"{}\" x2=\"{x}\" y2=\"{}\" stroke=\"#888\" stroke-dasharray=\"3 3\"/>\n",
        layout.margin_top,
        layout.height - layout.margin_bottom,
    );

    // Readouts clamp to each series' own range: past a shorter series' end
    // its marker stays frozen on the final value.
    let traditional_value = value_at(traditional, index);
    let hybrid_value = value_at(hybrid, index);
    for (value, color) in [
        (traditional_value, TRADITIONAL_COLOR),
        (hybrid_value, HYBRID_COLOR),
    ] {
        if let Some(value) = value {
            overlay.push_str(&format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"4\" fill=\"{}\"/>\n",
                x,
                layout.y_scale(value, peak),
                color
            ));
        }
    }

    let tooltip_x = (x + 10.0).min(layout.width - 180.0);
    overlay.push_str(&format!(
        "<g transform=\"translate({},{})\">\n",
        tooltip_x,
        layout.margin_top + 10.0
    ));
    overlay.push_str("<rect width=\"170\" height=\"48\" rx=\"6\" fill=\"#ffffff\" stroke=\"#ddd\"/>\n");
    overlay.push_str(&format!(
        "<text x=\"8\" y=\"18\" font-size=\"12\" fill=\"#1f2937\">Iter: {}</text>\n",
        index
    ));
    if let Some(value) = traditional_value {
        overlay.push_str(&format!(
            "<text x=\"8\" y=\"34\" font-size=\"12\" fill=\"{}\">Trad: {:.2}</text>\n",
            TRADITIONAL_COLOR, value
        ));
    }
    if let Some(value) = hybrid_value {
        overlay.push_str(&format!(
            "<text x=\"90\" y=\"34\" font-size=\"12\" fill=\"{}\">Hybrid: {:.2}</text>\n",
            HYBRID_COLOR, value
        ));
    }
    overlay.push_str("</g>\n");
    overlay
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(costs: &[f64]) -> Vec<CostPoint> {
        costs.iter().map(|&cost| CostPoint { cost }).collect()
    }

    #[test]
    fn renders_both_series_and_best_overlays() {
        let svg = render_chart_svg(
            &points(&[100.0, 80.0, 90.0]),
            &points(&[120.0, 70.0]),
            None,
        );
        assert_eq!(svg.matches("<path ").count(), 4);
        assert!(svg.matches(TRADITIONAL_COLOR).count() >= 2);
        assert!(svg.contains("stroke-dasharray=\"4 4\""));
        assert!(svg.contains("Cost Convergence Comparison"));
        assert!(svg.contains("Traditional Best"));
        assert!(!svg.contains("Iter:"));
    }

    #[test]
    fn shorter_series_path_has_fewer_segments() {
        let svg = render_chart_svg(
            &points(&[100.0, 80.0, 90.0, 85.0]),
            &points(&[120.0, 70.0]),
            None,
        );
        // First path is the traditional polyline (3 line commands), third
        // occurrence of "L" density belongs to hybrid (1 line command).
        let paths: Vec<&str> = svg
            .match_indices("<path d=\"")
            .map(|(start, _)| {
                let rest = &svg[start + 9..];
                &rest[..rest.find('"').unwrap()]
            })
            .collect();
        assert_eq!(paths[0].matches('L').count(), 3);
        assert_eq!(paths[2].matches('L').count(), 1);
    }

    #[test]
    fn hover_overlay_freezes_short_series_readout() {
        let layout = ChartLayout::default();
        let traditional = points(&[100.0, 80.0]);
        let hybrid = points(&[120.0, 110.0, 105.0, 95.0]);
        let svg = render_chart_svg(&traditional, &hybrid, Some(3));
        assert!(svg.contains("Iter: 3"));
        // Traditional readout frozen at its final value.
        assert!(svg.contains("Trad: 80.00"));
        assert!(svg.contains("Hybrid: 95.00"));
        let peak = max_cost(&traditional, &hybrid);
        let frozen_y = layout.y_scale(80.0, peak);
        assert!(svg.contains(&format!("cy=\"{}\"", frozen_y)));
    }
}
