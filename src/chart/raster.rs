use image::{Rgb, RgbImage};

use crate::chart::geometry::{best_so_far, max_cost, max_len, series_points, ChartLayout};
use crate::gateway::CostPoint;

/// Fixed supersampling factor for raster capture.
pub const CAPTURE_SCALE: u32 = 2;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const GRID: Rgb<u8> = Rgb([238, 238, 238]);
const AXIS: Rgb<u8> = Rgb([102, 102, 102]);
const TRADITIONAL: Rgb<u8> = Rgb([239, 68, 68]);
const HYBRID: Rgb<u8> = Rgb([59, 130, 246]);

/// Rasterizes the convergence figure into an RGB bitmap at `scale` times the
/// chart layout size: gridlines, axes, both cost polylines and the dashed
/// best-so-far overlays, plus the legend swatches. Labels stay in the vector
/// rendering path; the bitmap carries strokes and fills only.
pub fn render_chart_bitmap(
    traditional: &[CostPoint],
    hybrid: &[CostPoint],
    scale: u32,
) -> RgbImage {
    let layout = ChartLayout::default();
    let scale = scale.max(1);
    let s = scale as f64;
    let mut img = RgbImage::from_pixel(
        (layout.width * s) as u32,
        (layout.height * s) as u32,
        WHITE,
    );

    // Horizontal gridlines, five intervals.
    for tick in 0..=5 {
        let y = layout.height - layout.margin_bottom - (tick as f64 / 5.0) * layout.plot_height();
        draw_segment(
            &mut img,
            (layout.margin_left * s, y * s),
            ((layout.width - layout.margin_right) * s, y * s),
            GRID,
            false,
            scale,
        );
    }

    // Axes.
    let baseline = (layout.height - layout.margin_bottom) * s;
    draw_segment(
        &mut img,
        (layout.margin_left * s, baseline),
        ((layout.width - layout.margin_right) * s, baseline),
        AXIS,
        false,
        scale,
    );
    draw_segment(
        &mut img,
        (layout.margin_left * s, layout.margin_top * s),
        (layout.margin_left * s, baseline),
        AXIS,
        false,
        scale,
    );

    let shared_len = max_len(traditional, hybrid);
    let peak = max_cost(traditional, hybrid);

    for (history, color) in [(traditional, TRADITIONAL), (hybrid, HYBRID)] {
        let line = series_points(&layout, history.iter().map(|p| p.cost), shared_len, peak);
        draw_polyline(&mut img, &line, color, false, scale, s);
        let best = series_points(&layout, best_so_far(history).into_iter(), shared_len, peak);
        draw_polyline(&mut img, &best, color, true, scale, s);
    }

    // Legend swatches (text lives in the SVG path only).
    for (row, color) in [TRADITIONAL, HYBRID, TRADITIONAL, HYBRID].into_iter().enumerate() {
        let y = (30.0 + row as f64 * 15.0) * s;
        fill_rect(
            &mut img,
            ((layout.width - 150.0) * s) as i64,
            y as i64,
            (15.0 * s) as i64,
            (3.0 * s) as i64,
            color,
        );
    }

    img
}

fn draw_polyline(
    img: &mut RgbImage,
    points: &[(f64, f64)],
    color: Rgb<u8>,
    dashed: bool,
    thickness: u32,
    s: f64,
) {
    for pair in points.windows(2) {
        draw_segment(
            img,
            (pair[0].0 * s, pair[0].1 * s),
            (pair[1].0 * s, pair[1].1 * s),
            color,
            dashed,
            thickness,
        );
    }
    if points.len() == 1 {
        plot_thick(img, (points[0].0 * s) as i64, (points[0].1 * s) as i64, color, thickness);
    }
}

/// Plots a straight stroke by stepping along its longer axis. Dashed strokes
/// skip alternating runs of four layout pixels.
fn draw_segment(
    img: &mut RgbImage,
    from: (f64, f64),
    to: (f64, f64),
    color: Rgb<u8>,
    dashed: bool,
    thickness: u32,
) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let steps = dx.abs().max(dy.abs()).ceil() as i64;
    let dash_run = (4 * thickness.max(1)) as i64;
    for step in 0..=steps.max(1) {
        if dashed && (step / dash_run) % 2 == 1 {
            continue;
        }
        let t = step as f64 / steps.max(1) as f64;
        let x = (from.0 + dx * t).round() as i64;
        let y = (from.1 + dy * t).round() as i64;
        plot_thick(img, x, y, color, thickness);
    }
}

fn plot_thick(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>, thickness: u32) {
    let t = thickness.max(1) as i64;
    fill_rect(img, x, y, t, t, color);
}

fn fill_rect(img: &mut RgbImage, x: i64, y: i64, w: i64, h: i64, color: Rgb<u8>) {
    for py in y..y + h {
        for px in x..x + w {
            if px >= 0 && py >= 0 && (px as u32) < img.width() && (py as u32) < img.height() {
                img.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(costs: &[f64]) -> Vec<CostPoint> {
        costs.iter().map(|&cost| CostPoint { cost }).collect()
    }

    #[test]
    fn bitmap_matches_layout_times_scale() {
        let img = render_chart_bitmap(&points(&[100.0]), &points(&[90.0]), CAPTURE_SCALE);
        assert_eq!(img.width(), 1600);
        assert_eq!(img.height(), 800);
        // Corner stays background white.
        assert_eq!(*img.get_pixel(0, 0), WHITE);
    }

    #[test]
    fn axes_and_series_leave_their_colors() {
        let img = render_chart_bitmap(
            &points(&[100.0, 80.0, 90.0]),
            &points(&[120.0, 70.0]),
            CAPTURE_SCALE,
        );
        // Bottom axis runs along y = (height - margin_bottom) * scale.
        assert_eq!(*img.get_pixel(600, 720), AXIS);
        let mut seen_traditional = false;
        let mut seen_hybrid = false;
        for pixel in img.pixels() {
            seen_traditional |= *pixel == TRADITIONAL;
            seen_hybrid |= *pixel == HYBRID;
        }
        assert!(seen_traditional);
        assert!(seen_hybrid);
    }

    #[test]
    fn scale_floor_is_one() {
        let img = render_chart_bitmap(&points(&[10.0]), &points(&[5.0]), 0);
        assert_eq!(img.width(), 800);
        assert_eq!(img.height(), 400);
    }
}
