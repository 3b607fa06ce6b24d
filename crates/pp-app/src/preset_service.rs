//! Non-interactive access to the preset stores.

use crate::config::RunConfig;
use crate::error::{AppError, AppResult};
use pp_preset::{AxisSettings, FigureLayout, GridLayout, Preset, PresetKind, PresetStore, SubplotLayout};

/// The three stores a run draws from.
#[derive(Debug, Clone)]
pub struct PresetStores {
    pub figure: PresetStore,
    pub subplot: PresetStore,
    pub axis: PresetStore,
}

impl PresetStores {
    pub fn load(config: &RunConfig) -> AppResult<Self> {
        Ok(Self {
            figure: load_store(config, PresetKind::Figure)?,
            subplot: load_store(config, PresetKind::Subplot)?,
            axis: load_store(config, PresetKind::Axis)?,
        })
    }
}

pub fn load_store(config: &RunConfig, kind: PresetKind) -> AppResult<PresetStore> {
    let path = config.store_path(kind);
    let store = PresetStore::load(kind, &path)?;
    tracing::debug!(%kind, path = %path.display(), presets = store.len(), "store loaded");
    Ok(store)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetSummary {
    pub name: String,
    pub variant: Option<String>,
    pub comment: String,
}

pub fn list_presets(store: &PresetStore) -> Vec<PresetSummary> {
    store
        .iter()
        .map(|(name, preset)| PresetSummary {
            name: name.to_string(),
            variant: preset.variant().map(str::to_string),
            comment: preset.text("comment").to_string(),
        })
        .collect()
}

pub fn show_preset(store: &PresetStore, name: &str, advanced: bool) -> AppResult<String> {
    store
        .get(name)
        .map(|p| p.render(advanced))
        .ok_or_else(|| AppError::PresetNotFound(name.to_string()))
}

/// A problem found in a stored preset that would stop a run using it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreIssue {
    pub preset: String,
    pub problem: String,
}

/// Checks each preset on its own: mandatory fields, typed conversion, and
/// the grid constraints that do not depend on the rest of a tree.
pub fn check_store(store: &PresetStore) -> Vec<StoreIssue> {
    let mut issues = Vec::new();
    for (name, preset) in store.iter() {
        let mut report = |problem: String| {
            issues.push(StoreIssue {
                preset: name.to_string(),
                problem,
            })
        };
        let missing = preset.missing_mandatory();
        if !missing.is_empty() {
            report(format!("mandatory fields not set: {}", missing.join(", ")));
        }
        if let Err(problem) = check_typed(preset) {
            report(problem);
        }
    }
    issues
}

fn check_typed(preset: &Preset) -> Result<(), String> {
    match preset.kind() {
        PresetKind::Figure => {
            let layout = FigureLayout::from_preset(preset).map_err(|e| e.to_string())?;
            check_grid(&layout.grid)
        }
        PresetKind::Subplot => {
            let layout = SubplotLayout::from_preset(preset).map_err(|e| e.to_string())?;
            check_grid(&layout.grid)
        }
        PresetKind::Axis => {
            let settings = AxisSettings::from_preset(preset).map_err(|e| e.to_string())?;
            if settings.moving_average == Some(0) {
                return Err("moving average window must be at least 1".to_string());
            }
            match settings.phase {
                Some(phase) if phase.start >= phase.end => {
                    Err(format!("frame range {}..{} is empty", phase.start, phase.end))
                }
                _ => Ok(()),
            }
        }
    }
}

fn check_grid(grid: &GridLayout) -> Result<(), String> {
    let Some(capacity) = grid.capacity() else {
        return Err(format!("a {}x{} grid is too large", grid.rows, grid.cols));
    };
    if grid.count > capacity {
        return Err(format!(
            "{} cells do not fit in a {}x{} grid",
            grid.count, grid.rows, grid.cols
        ));
    }
    if let Some(ratios) = &grid.width_ratios
        && ratios.len() != grid.cols
    {
        return Err(format!("widthRatios has {} entries, expected {}", ratios.len(), grid.cols));
    }
    if let Some(ratios) = &grid.height_ratios
        && ratios.len() != grid.rows
    {
        return Err(format!("heightRatios has {} entries, expected {}", ratios.len(), grid.rows));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pp_preset::Value;

    fn figure(name: &str, rows: i64, cols: i64, count: Option<i64>) -> Preset {
        let mut p = Preset::new(PresetKind::Figure);
        p.set("name", Value::text(name)).unwrap();
        p.set("rows", Value::Int(rows)).unwrap();
        p.set("cols", Value::Int(cols)).unwrap();
        if let Some(c) = count {
            p.set("numSubFigures", Value::Int(c)).unwrap();
        }
        p
    }

    #[test]
    fn check_flags_overfull_grid_and_bad_ratios() {
        let mut store = PresetStore::empty(PresetKind::Figure, "presets_figure.json".into());
        store.insert(figure("ok", 2, 2, Some(3)));
        store.insert(figure("overfull", 1, 2, Some(3)));
        let mut ratios = figure("ratios", 1, 2, None);
        ratios.set("widthRatios", Value::IntList(vec![1, 2, 3])).unwrap();
        store.insert(ratios);

        let issues = check_store(&store);
        let flagged: Vec<&str> = issues.iter().map(|i| i.preset.as_str()).collect();
        assert_eq!(flagged, vec!["overfull", "ratios"]);
        assert!(issues[1].problem.contains("widthRatios"));
    }

    #[test]
    fn check_flags_grid_too_large_to_count() {
        let mut store = PresetStore::empty(PresetKind::Figure, "presets_figure.json".into());
        store.insert(figure("huge", 1 << 32, 1 << 32, Some(1)));
        let issues = check_store(&store);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].problem.contains("too large"));
    }

    #[test]
    fn check_flags_empty_phase_range() {
        let mut store = PresetStore::empty(PresetKind::Axis, "presets_axis.json".into());
        let mut p = Preset::new(PresetKind::Axis);
        p.set("name", Value::text("rama")).unwrap();
        p.set("type", Value::text("Ramachandran")).unwrap();
        p.set("startNs", Value::Int(4)).unwrap();
        p.set("endNs", Value::Int(4)).unwrap();
        store.insert(p);
        let issues = check_store(&store);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].problem.contains("empty"));
    }

    #[test]
    fn show_unknown_preset_is_an_error() {
        let store = PresetStore::empty(PresetKind::Axis, "presets_axis.json".into());
        assert!(matches!(show_preset(&store, "ghost", false), Err(AppError::PresetNotFound(_))));
    }

    #[test]
    fn summaries_keep_store_order() {
        let mut store = PresetStore::empty(PresetKind::Figure, "presets_figure.json".into());
        store.insert(figure("b", 1, 1, None));
        store.insert(figure("a", 1, 1, None));
        let names: Vec<String> = list_presets(&store).into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
