//! Default renderer: draws each frame with plotters, SVG for `.svg`
//! outputs and a bitmap otherwise.

use crate::color::{Gradient, series_palette};
use crate::layout::split_grid;
use crate::request::{AxisPanel, FrameRequest};
use crate::{RenderResult, Renderer, backend};
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use pp_preset::{AxisSettings, PlotType, TickSpec};
use std::ops::Range;

const MIN_WIDTH: u32 = 200;
const MIN_HEIGHT: u32 = 150;
const GRADIENT_STEPS: usize = 200;
/// Default view of a phase plot: dihedral angles in degrees.
const PHASE_BOUNDS: (f64, f64) = (-180.0, 180.0);

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

#[derive(Debug, Clone, Copy)]
pub struct PlottersRenderer {
    text: bool,
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlottersRenderer {
    pub fn new() -> Self {
        Self { text: true }
    }

    /// Draws only the data: no titles, captions, mesh or legends, so no
    /// font has to be loaded.
    pub fn without_text() -> Self {
        Self { text: false }
    }
}

impl Renderer for PlottersRenderer {
    fn render_frame(&mut self, request: &FrameRequest<'_>) -> RenderResult<()> {
        let size = (
            request.layout.width_px.max(MIN_WIDTH),
            request.layout.height_px.max(MIN_HEIGHT),
        );
        if request.is_svg() {
            let root = SVGBackend::new(&request.output, size).into_drawing_area();
            draw_figure(&root, request, self.text)?;
            root.present().map_err(backend)?;
        } else {
            let root = BitMapBackend::new(&request.output, size).into_drawing_area();
            draw_figure(&root, request, self.text)?;
            root.present().map_err(backend)?;
        }
        tracing::info!(path = %request.output.display(), frame = request.frame, "figure written");
        Ok(())
    }
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    request: &FrameRequest<'_>,
    text: bool,
) -> RenderResult<()> {
    root.fill(&WHITE).map_err(backend)?;
    let body = with_title(root, titled(&request.title, text), 24.0)?;
    let cells = split_grid(&body, &request.layout.grid);

    // Cells past the declared count stay blank.
    for (panel, cell) in request.subfigures.iter().zip(&cells) {
        let area = with_title(cell, titled(&panel.title, text), 18.0)?;
        let slots = split_grid(&area, &panel.layout.grid);
        for (axis, slot) in panel.axes.iter().zip(&slots) {
            tracing::debug!(axis = %axis.settings.name, plot = axis.settings.plot_type.tag(), "drawing axis");
            match axis.settings.plot_type {
                PlotType::Line => draw_line(slot, axis, text)?,
                PlotType::Scatter => draw_scatter(slot, axis, text)?,
                PlotType::Ramachandran => draw_phase(slot, axis, request.frame, text)?,
                PlotType::Gradient => draw_gradient(slot, axis, text)?,
            }
        }
    }
    Ok(())
}

fn titled(title: &str, text: bool) -> &str {
    if text { title } else { "" }
}

fn with_title<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    size: f64,
) -> RenderResult<DrawingArea<DB, Shift>> {
    if title.is_empty() {
        return Ok(area.margin(0, 0, 0, 0));
    }
    area.titled(title, ("sans-serif", size)).map_err(backend)
}

/// Builds the chart and, when text is drawn, its captioned mesh.
fn build_chart<'a, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    panel: &AxisPanel<'_>,
    x: Range<f64>,
    y: Range<f64>,
    text: bool,
    with_y_axis: bool,
) -> RenderResult<Chart<'a, DB>> {
    let mut builder = ChartBuilder::on(area);
    builder.margin(8);
    if text {
        builder.x_label_area_size(30).y_label_area_size(45);
        if !panel.title.is_empty() {
            builder.caption(panel.title.as_str(), ("sans-serif", 16));
        }
    }
    let mut chart = builder.build_cartesian_2d(x, y).map_err(backend)?;
    if text {
        draw_mesh(&mut chart, panel.settings, with_y_axis)?;
    }
    Ok(chart)
}

fn draw_mesh<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    settings: &AxisSettings,
    with_y_axis: bool,
) -> RenderResult<()> {
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(settings.x_title.as_str())
        .light_line_style(RGBColor(0xd9, 0xd9, 0xd9));
    if let Some(ticks) = settings.x_ticks {
        mesh.x_labels(label_count(ticks));
    }
    if let Some(lines) = light_lines(settings.x_ticks, settings.x_ticks_minor) {
        mesh.x_max_light_lines(lines);
    }
    if with_y_axis {
        mesh.y_desc(settings.y_title.as_str());
        if let Some(ticks) = settings.y_ticks {
            mesh.y_labels(label_count(ticks));
        }
        if let Some(lines) = light_lines(settings.y_ticks, settings.y_ticks_minor) {
            mesh.y_max_light_lines(lines);
        }
    } else {
        mesh.disable_y_mesh().disable_y_axis();
    }
    mesh.draw().map_err(backend)
}

fn label_count(ticks: TickSpec) -> usize {
    if ticks.step == 0.0 {
        return 10;
    }
    (((ticks.end - ticks.start) / ticks.step).abs().floor() as usize + 1).clamp(1, 50)
}

/// Minor grid lines between two major labels.
fn light_lines(major: Option<TickSpec>, minor: Option<TickSpec>) -> Option<usize> {
    let minor = minor?;
    let major_step = major.map_or(minor.step * 5.0, |m| m.step);
    if minor.step == 0.0 {
        return None;
    }
    Some(((major_step / minor.step).abs().round() as usize).max(1))
}

/// Data extent, padded when empty or flat.
fn span(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if lo > hi {
        (0.0, 1.0)
    } else if lo == hi {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

fn axis_range(limit: Option<(f64, f64)>, data: impl FnOnce() -> (f64, f64)) -> Range<f64> {
    match limit {
        Some((lo, hi)) if lo != hi => lo..hi,
        _ => {
            let (lo, hi) = data();
            lo..hi
        }
    }
}

fn point_cloud(
    points: &[(f64, f64)],
    gradient: Gradient,
) -> impl Iterator<Item = Circle<(f64, f64), i32>> + '_ {
    let n = points.len().max(1) as f64;
    points
        .iter()
        .enumerate()
        .map(move |(i, p)| Circle::new(*p, 2, gradient.at(1.0 - i as f64 / n).filled()))
}

fn draw_line<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &AxisPanel<'_>,
    text: bool,
) -> RenderResult<()> {
    let settings = panel.settings;
    let series: Vec<(&str, Vec<(f64, f64)>)> = panel
        .table
        .variables()
        .into_iter()
        .map(|name| {
            let points = panel
                .table
                .points(name)
                .filter_map(|(x, v)| v.component(0).map(|y| (x, y)))
                .collect();
            (name, points)
        })
        .collect();

    let x = axis_range(settings.x_limit, || {
        span(series.iter().flat_map(|(_, p)| p.iter().map(|pt| pt.0)))
    });
    let y = axis_range(settings.y_limit, || {
        span(series.iter().flat_map(|(_, p)| p.iter().map(|pt| pt.1)))
    });
    let mut chart = build_chart(area, panel, x, y, text, true)?;

    let palette = series_palette(&settings.palette)?;
    for (k, (name, points)) in series.iter().enumerate() {
        let color = palette[k % palette.len()];
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
            .map_err(backend)?
            .label(*name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }
    if text && !series.is_empty() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(backend)?;
    }
    Ok(())
}

/// Every tuple component against the index, all in the axis' first gradient.
fn draw_scatter<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &AxisPanel<'_>,
    text: bool,
) -> RenderResult<()> {
    let settings = panel.settings;
    let mut layers: Vec<Vec<(f64, f64)>> = Vec::new();
    for name in panel.table.variables() {
        let rows: Vec<_> = panel.table.points(name).collect();
        let width = rows.iter().map(|(_, v)| v.components().len()).max().unwrap_or(0);
        for c in 0..width {
            layers.push(
                rows.iter()
                    .filter_map(|(x, v)| v.component(c).map(|y| (*x, y)))
                    .collect(),
            );
        }
    }

    let x = axis_range(settings.x_limit, || span(layers.iter().flatten().map(|p| p.0)));
    let y = axis_range(settings.y_limit, || span(layers.iter().flatten().map(|p| p.1)));
    let mut chart = build_chart(area, panel, x, y, text, true)?;

    let gradient = Gradient::for_series(&settings.colors, 0);
    for layer in &layers {
        chart.draw_series(point_cloud(layer, gradient)).map_err(backend)?;
    }
    Ok(())
}

/// One (x, y) angle pair per row for the current frame, one gradient per
/// variable.
fn draw_phase<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &AxisPanel<'_>,
    frame: i64,
    text: bool,
) -> RenderResult<()> {
    let settings = panel.settings;
    let clouds: Vec<Vec<(f64, f64)>> = match panel.phase_components(frame) {
        Some((a, b)) => panel
            .table
            .variables()
            .into_iter()
            .map(|name| {
                panel
                    .table
                    .points(name)
                    .filter_map(|(_, v)| Some((v.component(a)?, v.component(b)?)))
                    .collect()
            })
            .collect(),
        None => {
            tracing::warn!(axis = %settings.name, frame, "frame is before the index offset, nothing to draw");
            Vec::new()
        }
    };

    let x = axis_range(settings.x_limit, || PHASE_BOUNDS);
    let y = axis_range(settings.y_limit, || PHASE_BOUNDS);
    let mut chart = build_chart(area, panel, x, y, text, true)?;

    for (k, cloud) in clouds.iter().enumerate() {
        let gradient = Gradient::for_series(&settings.colors, k);
        chart.draw_series(point_cloud(cloud, gradient)).map_err(backend)?;
    }
    Ok(())
}

/// Colour bar for the frame gradient used by the point plots.
fn draw_gradient<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &AxisPanel<'_>,
    text: bool,
) -> RenderResult<()> {
    let mut chart = build_chart(area, panel, 2.0..1000.0, 0.0..1.0, text, false)?;

    let gradient = Gradient::for_series(&panel.settings.colors, 0);
    let step = 998.0 / GRADIENT_STEPS as f64;
    chart
        .draw_series((0..GRADIENT_STEPS).map(|i| {
            let x0 = 2.0 + i as f64 * step;
            let t = 1.0 - i as f64 / GRADIENT_STEPS as f64;
            Rectangle::new([(x0, 0.0), (x0 + step, 1.0)], gradient.at(t).filled())
        }))
        .map_err(backend)?;
    Ok(())
}
