use pp_data::LongTable;
use pp_preset::{AxisSettings, FigureLayout, SubplotLayout};
use std::path::{Path, PathBuf};

/// Everything needed to draw one image. Titles and the output path already
/// have the frame index substituted.
#[derive(Debug, Clone)]
pub struct FrameRequest<'a> {
    pub output: PathBuf,
    pub frame: i64,
    pub title: String,
    pub layout: &'a FigureLayout,
    pub subfigures: Vec<SubfigurePanel<'a>>,
}

#[derive(Debug, Clone)]
pub struct SubfigurePanel<'a> {
    pub title: String,
    pub layout: &'a SubplotLayout,
    pub axes: Vec<AxisPanel<'a>>,
}

#[derive(Debug, Clone)]
pub struct AxisPanel<'a> {
    pub title: String,
    pub settings: &'a AxisSettings,
    pub table: &'a LongTable,
}

impl FrameRequest<'_> {
    pub fn is_svg(&self) -> bool {
        has_svg_extension(&self.output)
    }
}

impl AxisPanel<'_> {
    /// Tuple components holding the x/y angles of a phase plot at `frame`:
    /// `2 * (frame - offset)` and the one after it.
    pub fn phase_components(&self, frame: i64) -> Option<(usize, usize)> {
        let offset = self.settings.phase.map_or(0, |p| p.index_offset);
        let slot = usize::try_from(frame.checked_sub(offset)?).ok()?;
        let x = slot.checked_mul(2)?;
        Some((x, x.checked_add(1)?))
    }
}

pub(crate) fn has_svg_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}
