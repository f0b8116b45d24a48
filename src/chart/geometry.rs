use std::time::{Duration, Instant};

use crate::gateway::CostPoint;

/// Fixed chart dimensions, shared by the SVG and raster renderers.
#[derive(Debug, Clone, Copy)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        ChartLayout {
            width: 800.0,
            height: 400.0,
            margin_top: 20.0,
            margin_right: 30.0,
            margin_bottom: 40.0,
            margin_left: 60.0,
        }
    }
}

impl ChartLayout {
    pub fn plot_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.margin_top - self.margin_bottom
    }

    /// Horizontal scale over the shared axis. `max_len` spans both series;
    /// the divisor is `max_len` itself, so the last index of the longer
    /// series lands one step short of the right edge.
    pub fn x_scale(&self, index: usize, max_len: usize) -> f64 {
        self.margin_left + (index as f64 / max_len.max(1) as f64) * self.plot_width()
    }

    /// Vertical scale. An all-zero history would divide by zero, so the
    /// denominator is floored at 1.0; costs then sit on the baseline.
    pub fn y_scale(&self, cost: f64, max_cost: f64) -> f64 {
        let denominator = if max_cost > 0.0 { max_cost } else { 1.0 };
        self.height - self.margin_bottom - (cost / denominator) * self.plot_height()
    }

    /// Converts a pointer x position (pixels) into a shared-axis index:
    /// clamped fraction of the plot area, rounded onto 0..max_len-1.
    pub fn pointer_index(&self, x: f64, max_len: usize) -> usize {
        let t = ((x - self.margin_left) / self.plot_width()).clamp(0.0, 1.0);
        (t * (max_len.max(1) - 1) as f64).round() as usize
    }
}

/// Shared horizontal extent of the two histories. Scales the axis only;
/// neither series is ever padded to this length.
pub fn max_len(a: &[CostPoint], b: &[CostPoint]) -> usize {
    a.len().max(b.len())
}

/// Global cost maximum across both histories.
pub fn max_cost(a: &[CostPoint], b: &[CostPoint]) -> f64 {
    a.iter()
        .chain(b.iter())
        .map(|p| p.cost)
        .fold(0.0, f64::max)
}

/// Running minimum of a cost history. Non-increasing by construction, no
/// matter how the history itself fluctuates.
pub fn best_so_far(history: &[CostPoint]) -> Vec<f64> {
    let mut best = f64::INFINITY;
    history
        .iter()
        .map(|p| {
            best = best.min(p.cost);
            best
        })
        .collect()
}

/// Reads the series value shown for a shared-axis index. The index clamps to
/// the series' own range, so once the pointer passes a shorter series' end
/// the readout freezes at its final value. Empty series have no readout.
pub fn value_at(history: &[CostPoint], index: usize) -> Option<f64> {
    if history.is_empty() {
        return None;
    }
    Some(history[index.min(history.len() - 1)].cost)
}

/// Scaled points of a series polyline, through its own indices only.
pub fn series_points(
    layout: &ChartLayout,
    costs: impl Iterator<Item = f64>,
    max_len: usize,
    max_cost: f64,
) -> Vec<(f64, f64)> {
    costs
        .enumerate()
        .map(|(i, cost)| (layout.x_scale(i, max_len), layout.y_scale(cost, max_cost)))
        .collect()
}

/// SVG-style path data ("M x,y L x,y ...") for a point sequence.
pub fn path_data(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, (x, y))| format!("{}{},{}", if i == 0 { "M" } else { "L" }, x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Gate for pointer-move recomputation. Raw movement events arrive far
/// faster than the tooltip needs; moves inside the interval are dropped.
/// The caller supplies the clock so the gate is testable.
#[derive(Debug)]
pub struct HoverDebouncer {
    min_interval: Duration,
    last: Option<Instant>,
}

impl HoverDebouncer {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(50);

    pub fn new(min_interval: Duration) -> Self {
        HoverDebouncer {
            min_interval,
            last: None,
        }
    }

    /// Returns true when this movement event should recompute hover state.
    pub fn accept(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.min_interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Pointer left the plot; the next move always passes.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for HoverDebouncer {
    fn default() -> Self {
        HoverDebouncer::new(HoverDebouncer::DEFAULT_INTERVAL)
    }
}
