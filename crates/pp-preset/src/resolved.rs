//! Typed views of presets, consumed by data ingestion and rendering.

use crate::preset::Preset;
use crate::schema::PresetKind;
use crate::{PresetError, PresetResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotType {
    Line,
    Scatter,
    Ramachandran,
    Gradient,
}

impl PlotType {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "line" => Some(PlotType::Line),
            "scatter" => Some(PlotType::Scatter),
            "Ramachandran" => Some(PlotType::Ramachandran),
            "gradient" => Some(PlotType::Gradient),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            PlotType::Line => "line",
            PlotType::Scatter => "scatter",
            PlotType::Ramachandran => "Ramachandran",
            PlotType::Gradient => "gradient",
        }
    }
}

/// A rows x cols grid with `count` occupied cells, filled row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    pub count: usize,
    pub width_ratios: Option<Vec<u32>>,
    pub height_ratios: Option<Vec<u32>>,
}

impl GridLayout {
    fn from_preset(preset: &Preset, count_field: &str) -> PresetResult<Self> {
        let rows = usize_field(preset, "rows")?;
        let cols = usize_field(preset, "cols")?;
        let count = match preset.int(count_field) {
            Some(_) => usize_field(preset, count_field)?,
            // An overflowing grid is reported by the capacity check.
            None => rows.saturating_mul(cols),
        };
        Ok(Self {
            rows,
            cols,
            count,
            width_ratios: ratio_field(preset, "widthRatios")?,
            height_ratios: ratio_field(preset, "heightRatios")?,
        })
    }

    /// Number of cells, or `None` when rows x cols does not fit in a `usize`.
    pub fn capacity(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FigureLayout {
    pub name: String,
    pub grid: GridLayout,
    pub width_px: u32,
    pub height_px: u32,
}

impl FigureLayout {
    pub fn from_preset(preset: &Preset) -> PresetResult<Self> {
        expect_kind(preset, PresetKind::Figure)?;
        Ok(Self {
            name: preset.name().to_string(),
            grid: GridLayout::from_preset(preset, "numSubFigures")?,
            width_px: u32_field(preset, "width")?,
            height_px: u32_field(preset, "height")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubplotLayout {
    pub name: String,
    pub grid: GridLayout,
    pub share_x: bool,
    pub share_y: bool,
}

impl SubplotLayout {
    pub fn from_preset(preset: &Preset) -> PresetResult<Self> {
        expect_kind(preset, PresetKind::Subplot)?;
        Ok(Self {
            name: preset.name().to_string(),
            grid: GridLayout::from_preset(preset, "numSubPlots")?,
            share_x: preset.flag("shareX"),
            share_y: preset.flag("shareY"),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSpec {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

/// Frame range of a phase plot: one image per value in `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseRange {
    pub start: i64,
    pub end: i64,
    pub index_offset: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisSettings {
    pub name: String,
    pub plot_type: PlotType,
    pub num_plots: usize,
    pub x_title: String,
    pub y_title: String,
    /// Moving-average window, when the line plot asks for one.
    pub moving_average: Option<usize>,
    pub palette: Vec<String>,
    pub colors: Vec<String>,
    pub x_limit: Option<(f64, f64)>,
    pub x_ticks: Option<TickSpec>,
    pub x_ticks_minor: Option<TickSpec>,
    pub x_scale: f64,
    pub x_offset: f64,
    pub y_limit: Option<(f64, f64)>,
    pub y_ticks: Option<TickSpec>,
    pub y_ticks_minor: Option<TickSpec>,
    pub y_scale: f64,
    pub y_offset: f64,
    pub transform_components: bool,
    pub phase: Option<PhaseRange>,
}

impl AxisSettings {
    pub fn from_preset(preset: &Preset) -> PresetResult<Self> {
        expect_kind(preset, PresetKind::Axis)?;
        let plot_type = PlotType::from_tag(preset.text("type")).ok_or_else(|| integrity(
            preset,
            "type",
            format!("is not a plot type: {:?}", preset.text("type")),
        ))?;
        let moving_average = (plot_type == PlotType::Line && preset.flag("movAvg"))
            .then(|| usize_field(preset, "movAvgFr"))
            .transpose()?;
        let phase = (plot_type == PlotType::Ramachandran).then(|| PhaseRange {
            start: preset.int("startNs").unwrap_or(0),
            end: preset.int("endNs").unwrap_or(0),
            index_offset: preset.int("indexOffset").unwrap_or(0),
        });
        Ok(Self {
            name: preset.name().to_string(),
            plot_type,
            num_plots: usize_field(preset, "numPlots")?,
            x_title: preset.text("xAxisTitle").to_string(),
            y_title: preset.text("yAxisTitle").to_string(),
            moving_average,
            palette: preset.texts("palette").to_vec(),
            colors: preset.texts("color").to_vec(),
            x_limit: pair(preset, "xLimit"),
            x_ticks: ticks(preset, "xTicks"),
            x_ticks_minor: ticks(preset, "xTicksMinor"),
            x_scale: preset.int("xScale").map_or(1.0, |v| v as f64),
            x_offset: preset.int("xOffset").map_or(0.0, |v| v as f64),
            y_limit: pair(preset, "yLimit"),
            y_ticks: ticks(preset, "yTicks"),
            y_ticks_minor: ticks(preset, "yTicksMinor"),
            y_scale: preset.int("yScale").map_or(1.0, |v| v as f64),
            y_offset: preset.int("yOffset").map_or(0.0, |v| v as f64),
            transform_components: preset.flag("applyTransformToComponents"),
            phase,
        })
    }
}

fn integrity(preset: &Preset, field: &str, reason: String) -> PresetError {
    PresetError::Integrity {
        kind: preset.kind(),
        preset: preset.name().to_string(),
        field: field.to_string(),
        reason,
    }
}

fn expect_kind(preset: &Preset, kind: PresetKind) -> PresetResult<()> {
    if preset.kind() == kind {
        Ok(())
    } else {
        Err(PresetError::WrongKind {
            expected: kind,
            found: preset.kind(),
            preset: preset.name().to_string(),
        })
    }
}

fn usize_field(preset: &Preset, field: &str) -> PresetResult<usize> {
    let raw = preset.int(field).unwrap_or(0);
    usize::try_from(raw).map_err(|_| integrity(preset, field, format!("must not be negative ({raw})")))
}

fn u32_field(preset: &Preset, field: &str) -> PresetResult<u32> {
    let raw = preset.int(field).unwrap_or(0);
    u32::try_from(raw).map_err(|_| integrity(preset, field, format!("is out of range ({raw})")))
}

fn ratio_field(preset: &Preset, field: &str) -> PresetResult<Option<Vec<u32>>> {
    let Some(raw) = preset.ints(field) else {
        return Ok(None);
    };
    raw.iter()
        .map(|r| {
            u32::try_from(*r)
                .map_err(|_| integrity(preset, field, format!("entry {r} is out of range")))
        })
        .collect::<PresetResult<Vec<u32>>>()
        .map(Some)
}

fn pair(preset: &Preset, field: &str) -> Option<(f64, f64)> {
    match preset.ints(field)? {
        [lo, hi] => Some((*lo as f64, *hi as f64)),
        _ => None,
    }
}

fn ticks(preset: &Preset, field: &str) -> Option<TickSpec> {
    match preset.ints(field)? {
        [start, end, step] => Some(TickSpec {
            start: *start as f64,
            end: *end as f64,
            step: *step as f64,
        }),
        _ => None,
    }
}
