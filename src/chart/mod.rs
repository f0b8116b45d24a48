pub mod geometry;
pub mod raster;
pub mod svg;

pub use geometry::{best_so_far, max_cost, max_len, value_at, ChartLayout, HoverDebouncer};
pub use raster::{render_chart_bitmap, CAPTURE_SCALE};
pub use svg::render_chart_svg;
