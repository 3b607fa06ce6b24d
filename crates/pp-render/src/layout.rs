//! Splitting a drawing area into a ratio-weighted grid.

use plotters::coord::Shift;
use plotters::prelude::*;
use pp_preset::GridLayout;

/// Inner cut positions (in pixels) dividing `total` into `parts` segments.
/// Ratios are relative weights; missing, short or all-zero ratios fall back
/// to even spacing.
pub fn breakpoints(total: u32, parts: usize, ratios: Option<&[u32]>) -> Vec<i32> {
    if parts <= 1 {
        return Vec::new();
    }
    let weights: Vec<f64> = match ratios {
        Some(r) if r.len() == parts && r.iter().any(|w| *w > 0) => {
            r.iter().map(|w| f64::from(*w)).collect()
        }
        _ => vec![1.0; parts],
    };
    let sum: f64 = weights.iter().sum();
    let mut acc = 0.0;
    weights[..parts - 1]
        .iter()
        .map(|w| {
            acc += w;
            (f64::from(total) * acc / sum).round() as i32
        })
        .collect()
}

/// Cells of `grid` in row-major order.
pub fn split_grid<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    grid: &GridLayout,
) -> Vec<DrawingArea<DB, Shift>> {
    let (width, height) = area.dim_in_pixel();
    let xs = breakpoints(width, grid.cols.max(1), grid.width_ratios.as_deref());
    let ys = breakpoints(height, grid.rows.max(1), grid.height_ratios.as_deref());
    area.split_by_breakpoints(xs, ys)
}
