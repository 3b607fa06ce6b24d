//! Locating dataset files and turning them into per-axis long tables.

use crate::error::AppResult;
use crate::prompt::Prompter;
use pp_data::{AxisTransform, Dataset, DatasetFrameBuilder, LongTable};
use pp_preset::AxisSettings;
use std::path::PathBuf;

pub const INVALID_FILE: &str = "That is not a valid file.";

/// A dataset the user pointed at, before it is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLocation {
    pub name: String,
    pub path: PathBuf,
}

/// Asks for a display name and a path, repeating the path question until it
/// names an existing file.
pub fn locate_dataset(p: &mut dyn Prompter) -> AppResult<DatasetLocation> {
    let name = p.ask("What should the name of this data be?")?;
    let path = loop {
        let raw = p.ask(&format!("What's the path to {name}?"))?;
        let path = PathBuf::from(raw.trim());
        if path.is_file() {
            break path;
        }
        p.say(INVALID_FILE)?;
    };
    Ok(DatasetLocation { name, path })
}

pub fn transform_for(settings: &AxisSettings) -> AxisTransform {
    AxisTransform {
        x_scale: settings.x_scale,
        x_offset: settings.x_offset,
        y_scale: settings.y_scale,
        y_offset: settings.y_offset,
        apply_to_components: settings.transform_components,
    }
}

/// Reads every located dataset of one axis slot and reshapes them into a
/// long table with the slot's transform and moving average.
pub fn build_table(settings: &AxisSettings, locations: &[DatasetLocation]) -> AppResult<LongTable> {
    let mut builder =
        DatasetFrameBuilder::new(transform_for(settings)).with_moving_average(settings.moving_average);
    for location in locations {
        builder.push(Dataset::read(location.name.as_str(), location.path.as_path())?);
    }
    let table = builder.build()?;
    tracing::info!(
        axis = settings.name.as_str(),
        datasets = locations.len(),
        records = table.len(),
        "axis data ingested"
    );
    Ok(table)
}
