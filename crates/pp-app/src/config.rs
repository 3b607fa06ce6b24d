//! Where presets live and how output names are templated.

use pp_preset::PresetKind;
use std::path::{Path, PathBuf};

pub const FIGURE_PRESET_FILE: &str = "presets_figure.json";
pub const SUBPLOT_PRESET_FILE: &str = "presets_subplot.json";
pub const AXIS_PRESET_FILE: &str = "presets_axis.json";
/// Replaced by the frame index in titles and picture names.
pub const FRAME_PLACEHOLDER: &str = "!#!#";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub preset_dir: PathBuf,
    pub figure_file: String,
    pub subplot_file: String,
    pub axis_file: String,
    pub placeholder: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            preset_dir: PathBuf::from("."),
            figure_file: FIGURE_PRESET_FILE.to_string(),
            subplot_file: SUBPLOT_PRESET_FILE.to_string(),
            axis_file: AXIS_PRESET_FILE.to_string(),
            placeholder: FRAME_PLACEHOLDER.to_string(),
        }
    }
}

impl RunConfig {
    pub fn with_preset_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            preset_dir: dir.into(),
            ..Self::default()
        }
    }

    pub fn store_path(&self, kind: PresetKind) -> PathBuf {
        let file = match kind {
            PresetKind::Figure => &self.figure_file,
            PresetKind::Subplot => &self.subplot_file,
            PresetKind::Axis => &self.axis_file,
        };
        self.preset_dir.join(file)
    }

    /// Substitutes the frame index into a title or file name.
    pub fn substitute(&self, template: &str, frame: i64) -> String {
        if self.placeholder.is_empty() {
            return template.to_string();
        }
        template.replace(&self.placeholder, &frame.to_string())
    }

    /// Output path for one frame. Names without an extension are saved as PNG.
    pub fn output_path(&self, picture: &str, frame: i64) -> PathBuf {
        let name = self.substitute(picture, frame);
        let path = Path::new(&name);
        if path.extension().is_some() {
            path.to_path_buf()
        } else {
            path.with_extension("png")
        }
    }
}
