//! The Figure -> Subplot -> Axis preset tree and its structural checks.

use crate::preset::Preset;
use crate::resolved::{AxisSettings, FigureLayout, GridLayout, PhaseRange, SubplotLayout};
use crate::schema::PresetKind;
use crate::PresetResult;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    #[error("{context}: expected a {expected} preset, found a {found} preset")]
    WrongKind {
        context: String,
        expected: PresetKind,
        found: PresetKind,
    },

    #[error("{context}: declares {declared} {what} but {supplied} were supplied")]
    CountMismatch {
        context: String,
        what: &'static str,
        declared: usize,
        supplied: usize,
    },

    #[error("{context}: {count} {what} do not fit in a {rows}x{cols} grid")]
    CapacityExceeded {
        context: String,
        what: &'static str,
        count: usize,
        rows: usize,
        cols: usize,
    },

    #[error("{context}: a {rows}x{cols} grid of {what} is too large")]
    GridTooLarge {
        context: String,
        what: &'static str,
        rows: usize,
        cols: usize,
    },

    #[error("{context}: {field} has {found} entries, expected {expected}")]
    RatioLength {
        context: String,
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{context}: mandatory fields not set: {}", .fields.join(", "))]
    Incomplete {
        context: String,
        fields: Vec<&'static str>,
    },

    #[error("{context}: moving average window must be at least 1")]
    InvalidWindow { context: String },

    #[error("{context}: frame range {start}..{end} is empty")]
    EmptyPhaseRange { context: String, start: i64, end: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisNode {
    pub preset: Preset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubplotNode {
    pub preset: Preset,
    pub axes: Vec<AxisNode>,
}

/// Root of a preset tree: one figure owning its subfigures, each owning
/// its axis slots.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureNode {
    pub preset: Preset,
    pub subplots: Vec<SubplotNode>,
}

fn context(preset: &Preset, path: &str) -> String {
    format!("{} preset '{}' ({path})", preset.kind(), preset.name())
}

fn check_kind(preset: &Preset, expected: PresetKind, path: &str) -> Result<(), StructureError> {
    if preset.kind() == expected {
        Ok(())
    } else {
        Err(StructureError::WrongKind {
            context: context(preset, path),
            expected,
            found: preset.kind(),
        })
    }
}

fn check_complete(preset: &Preset, path: &str) -> Result<(), StructureError> {
    let fields = preset.missing_mandatory();
    if fields.is_empty() {
        Ok(())
    } else {
        Err(StructureError::Incomplete {
            context: context(preset, path),
            fields,
        })
    }
}

fn check_grid(
    grid: &GridLayout,
    supplied: usize,
    what: &'static str,
    ctx: &str,
) -> Result<(), StructureError> {
    let Some(capacity) = grid.capacity() else {
        return Err(StructureError::GridTooLarge {
            context: ctx.to_string(),
            what,
            rows: grid.rows,
            cols: grid.cols,
        });
    };
    if grid.count > capacity {
        return Err(StructureError::CapacityExceeded {
            context: ctx.to_string(),
            what,
            count: grid.count,
            rows: grid.rows,
            cols: grid.cols,
        });
    }
    if grid.count != supplied {
        return Err(StructureError::CountMismatch {
            context: ctx.to_string(),
            what,
            declared: grid.count,
            supplied,
        });
    }
    let ratio_checks = [
        ("widthRatios", &grid.width_ratios, grid.cols),
        ("heightRatios", &grid.height_ratios, grid.rows),
    ];
    for (field, ratios, expected) in ratio_checks {
        if let Some(ratios) = ratios
            && ratios.len() != expected
        {
            return Err(StructureError::RatioLength {
                context: ctx.to_string(),
                field,
                expected,
                found: ratios.len(),
            });
        }
    }
    Ok(())
}

/// Fully typed tree, produced once the structure is known to be consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFigure {
    pub layout: FigureLayout,
    pub subfigures: Vec<ResolvedSubfigure>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSubfigure {
    pub layout: SubplotLayout,
    pub axes: Vec<AxisSettings>,
}

impl FigureNode {
    pub fn new(preset: Preset) -> Self {
        Self {
            preset,
            subplots: Vec::new(),
        }
    }

    /// Checks the whole tree before any data is read: preset kinds, declared
    /// versus supplied counts, grid capacity, ratio lengths, mandatory
    /// fields, moving-average windows and phase-plot frame ranges.
    pub fn validate(&self) -> PresetResult<()> {
        self.resolve().map(|_| ())
    }

    /// Validates and converts the tree into typed settings.
    pub fn resolve(&self) -> PresetResult<ResolvedFigure> {
        check_kind(&self.preset, PresetKind::Figure, "figure")?;
        check_complete(&self.preset, "figure")?;
        let layout = FigureLayout::from_preset(&self.preset)?;
        check_grid(
            &layout.grid,
            self.subplots.len(),
            "sub-figures",
            &context(&self.preset, "figure"),
        )?;

        let mut subfigures = Vec::with_capacity(self.subplots.len());
        for (i, sub) in self.subplots.iter().enumerate() {
            let path = format!("sub-figure {}", i + 1);
            check_kind(&sub.preset, PresetKind::Subplot, &path)?;
            check_complete(&sub.preset, &path)?;
            let sub_layout = SubplotLayout::from_preset(&sub.preset)?;
            check_grid(
                &sub_layout.grid,
                sub.axes.len(),
                "sub-plots",
                &context(&sub.preset, &path),
            )?;

            let mut axes = Vec::with_capacity(sub.axes.len());
            for (j, axis) in sub.axes.iter().enumerate() {
                let path = format!("sub-figure {} plot {}", i + 1, j + 1);
                check_kind(&axis.preset, PresetKind::Axis, &path)?;
                check_complete(&axis.preset, &path)?;
                let settings = AxisSettings::from_preset(&axis.preset)?;
                if settings.moving_average == Some(0) {
                    return Err(StructureError::InvalidWindow {
                        context: context(&axis.preset, &path),
                    }
                    .into());
                }
                if let Some(phase) = settings.phase
                    && phase.start >= phase.end
                {
                    return Err(StructureError::EmptyPhaseRange {
                        context: context(&axis.preset, &path),
                        start: phase.start,
                        end: phase.end,
                    }
                    .into());
                }
                axes.push(settings);
            }
            subfigures.push(ResolvedSubfigure {
                layout: sub_layout,
                axes,
            });
        }

        Ok(ResolvedFigure {
            layout,
            subfigures,
        })
    }
}

impl ResolvedFigure {
    pub fn axes(&self) -> impl Iterator<Item = &AxisSettings> {
        self.subfigures.iter().flat_map(|s| s.axes.iter())
    }

    /// Frames to render: the phase plot's range when the tree has one (the
    /// last phase plot in tree order decides), otherwise a single frame 0.
    pub fn frame_range(&self) -> PhaseRange {
        self.axes()
            .filter_map(|a| a.phase)
            .last()
            .unwrap_or(PhaseRange {
                start: 0,
                end: 1,
                index_offset: 0,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use crate::PresetError;

    fn named(kind: PresetKind, name: &str) -> Preset {
        let mut p = Preset::new(kind);
        p.set("name", Value::text(name)).unwrap();
        p
    }

    fn line_axis(name: &str) -> AxisNode {
        let mut p = named(PresetKind::Axis, name);
        p.set("type", Value::text("line")).unwrap();
        p.set("numPlots", Value::Int(1)).unwrap();
        AxisNode { preset: p }
    }

    fn figure(sub_figures: i64) -> FigureNode {
        let mut p = named(PresetKind::Figure, "fig");
        p.set("cols", Value::Int(2)).unwrap();
        p.set("numSubFigures", Value::Int(sub_figures)).unwrap();
        FigureNode::new(p)
    }

    fn subplot(axes: Vec<AxisNode>) -> SubplotNode {
        let mut p = named(PresetKind::Subplot, "sub");
        p.set("cols", Value::Int(axes.len().max(1) as i64)).unwrap();
        SubplotNode { preset: p, axes }
    }

    fn structure_err(result: PresetResult<()>) -> StructureError {
        match result {
            Err(PresetError::Structure(e)) => e,
            other => panic!("expected structure error, got {other:?}"),
        }
    }

    #[test]
    fn valid_tree_resolves() {
        let mut fig = figure(2);
        fig.subplots.push(subplot(vec![line_axis("a")]));
        fig.subplots.push(subplot(vec![line_axis("b"), line_axis("c")]));
        let resolved = fig.resolve().unwrap();
        assert_eq!(resolved.subfigures.len(), 2);
        assert_eq!(resolved.axes().count(), 3);
        assert_eq!(resolved.frame_range(), PhaseRange { start: 0, end: 1, index_offset: 0 });
    }

    #[test]
    fn missing_subplot_preset_is_a_count_mismatch() {
        let mut fig = figure(2);
        fig.subplots.push(subplot(vec![line_axis("a")]));
        let err = structure_err(fig.validate());
        assert!(matches!(
            err,
            StructureError::CountMismatch { declared: 2, supplied: 1, .. }
        ));
    }

    #[test]
    fn count_beyond_grid_is_rejected() {
        let mut fig = figure(3);
        for name in ["a", "b", "c"] {
            fig.subplots.push(subplot(vec![line_axis(name)]));
        }
        assert!(matches!(
            structure_err(fig.validate()),
            StructureError::CapacityExceeded { count: 3, .. }
        ));
    }

    #[test]
    fn overflowing_grid_is_rejected_without_panicking() {
        let mut fig = figure(1);
        fig.preset.set("rows", Value::Int(4_294_967_296)).unwrap();
        fig.preset.set("cols", Value::Int(4_294_967_296)).unwrap();
        fig.subplots.push(subplot(vec![line_axis("a")]));
        assert!(matches!(
            structure_err(fig.validate()),
            StructureError::GridTooLarge { what: "sub-figures", .. }
        ));

        let mut fig = figure(1);
        let mut sub = subplot(vec![line_axis("a")]);
        sub.preset.set("rows", Value::Int(4_294_967_296)).unwrap();
        sub.preset.set("cols", Value::Int(4_294_967_296)).unwrap();
        sub.preset.set("numSubPlots", Value::Null).unwrap();
        fig.subplots.push(sub);
        assert!(matches!(
            structure_err(fig.validate()),
            StructureError::GridTooLarge { what: "sub-plots", .. }
        ));
    }

    #[test]
    fn ratio_length_must_match_grid() {
        let mut fig = figure(1);
        fig.preset.set("widthRatios", Value::IntList(vec![1, 2, 3])).unwrap();
        fig.subplots.push(subplot(vec![line_axis("a")]));
        assert!(matches!(
            structure_err(fig.validate()),
            StructureError::RatioLength { field: "widthRatios", expected: 2, found: 3, .. }
        ));
    }

    #[test]
    fn incomplete_axis_is_rejected() {
        let mut fig = figure(1);
        let mut axis = line_axis("a");
        axis.preset.set("type", Value::text("")).unwrap();
        fig.subplots.push(subplot(vec![axis]));
        assert!(matches!(
            structure_err(fig.validate()),
            StructureError::Incomplete { .. }
        ));
    }

    #[test]
    fn zero_window_moving_average_is_rejected() {
        let mut fig = figure(1);
        let mut axis = line_axis("a");
        axis.preset.set("movAvg", Value::Bool(true)).unwrap();
        fig.subplots.push(subplot(vec![axis]));
        assert!(matches!(
            structure_err(fig.validate()),
            StructureError::InvalidWindow { .. }
        ));
    }

    #[test]
    fn phase_plot_sets_frame_range() {
        let mut fig = figure(1);
        let mut axis = line_axis("rama");
        axis.preset.set("type", Value::text("Ramachandran")).unwrap();
        axis.preset.set("startNs", Value::Int(3)).unwrap();
        axis.preset.set("endNs", Value::Int(6)).unwrap();
        axis.preset.set("indexOffset", Value::Int(3)).unwrap();
        fig.subplots.push(subplot(vec![axis.clone()]));
        let range = fig.resolve().unwrap().frame_range();
        assert_eq!(range, PhaseRange { start: 3, end: 6, index_offset: 3 });

        axis.preset.set("endNs", Value::Int(3)).unwrap();
        fig.subplots[0].axes[0] = axis;
        assert!(matches!(
            structure_err(fig.validate()),
            StructureError::EmptyPhaseRange { .. }
        ));
    }

    #[test]
    fn misplaced_kind_is_rejected() {
        let mut fig = figure(1);
        fig.subplots.push(SubplotNode {
            preset: named(PresetKind::Axis, "oops"),
            axes: vec![],
        });
        assert!(matches!(
            structure_err(fig.validate()),
            StructureError::WrongKind { .. }
        ));
    }
}
