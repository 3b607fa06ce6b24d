//! Preset stores: every preset of one kind, backed by one JSON file.

use crate::preset::Preset;
use crate::schema::PresetKind;
use crate::{PresetError, PresetResult};
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const NEW_TOKEN: &str = "new";
pub const MODIFY_TOKEN: &str = "modify";
pub const ADVANCED_PREFIX: &str = "advanced ";

/// What the user asked for at a preset selection prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Existing(String),
    New,
    Modify,
    Advanced(String),
}

#[derive(Debug, Clone)]
pub struct PresetStore {
    kind: PresetKind,
    path: PathBuf,
    presets: IndexMap<String, Preset>,
}

impl PresetStore {
    pub fn empty(kind: PresetKind, path: PathBuf) -> Self {
        Self {
            kind,
            path,
            presets: IndexMap::new(),
        }
    }

    /// Loads a store from its backing file. A missing file is a normal
    /// first-run state and yields an empty store.
    pub fn load(kind: PresetKind, path: &Path) -> PresetResult<Self> {
        if !path.exists() {
            tracing::warn!(%kind, path = %path.display(), "preset file not found, starting with no presets");
            return Ok(Self::empty(kind, path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let mut store = Self::from_json_str(kind, &content)?;
        store.path = path.to_path_buf();
        tracing::debug!(%kind, count = store.len(), "loaded presets");
        Ok(store)
    }

    /// Parses a `preset name -> field mapping` JSON object.
    pub fn from_json_str(kind: PresetKind, content: &str) -> PresetResult<Self> {
        let raw: IndexMap<String, serde_json::Value> = serde_json::from_str(content)?;
        let mut presets = IndexMap::with_capacity(raw.len());
        for (entry, fields) in raw {
            let fields = fields.as_object().ok_or_else(|| PresetError::Integrity {
                kind,
                preset: entry.clone(),
                field: "*".to_string(),
                reason: "is not an object".to_string(),
            })?;
            let preset = Preset::from_json(kind, &entry, fields)?;
            presets.insert(entry, preset);
        }
        Ok(Self {
            kind,
            path: PathBuf::new(),
            presets,
        })
    }

    pub fn to_json_string(&self) -> PresetResult<String> {
        let out: serde_json::Map<String, serde_json::Value> = self
            .presets
            .values()
            .map(|p| (p.name().to_string(), serde_json::Value::Object(p.to_json())))
            .collect();
        Ok(serde_json::to_string_pretty(&out)?)
    }

    /// Writes every preset to the backing file, replacing its contents.
    pub fn save(&self) -> PresetResult<()> {
        self.save_to(&self.path)
    }

    pub fn save_to(&self, path: &Path) -> PresetResult<()> {
        let content = self.to_json_string()?;
        fs::write(path, content)?;
        tracing::info!(kind = %self.kind, path = %path.display(), count = self.len(), "saved presets");
        Ok(())
    }

    /// Adds or replaces a preset under its own name.
    pub fn insert(&mut self, preset: Preset) -> Option<Preset> {
        self.presets.insert(preset.name().to_string(), preset)
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.get(name)
    }

    pub fn kind(&self) -> PresetKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Preset)> {
        self.presets.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Every token accepted at a selection prompt.
    pub fn list_selectable(&self) -> Vec<String> {
        let mut tokens: Vec<String> = self.names().map(str::to_string).collect();
        tokens.push(NEW_TOKEN.to_string());
        tokens.push(MODIFY_TOKEN.to_string());
        tokens.extend(self.names().map(|n| format!("{ADVANCED_PREFIX}{n}")));
        tokens
    }

    /// Interprets selection input. `modify` and `advanced` need at least one
    /// stored preset.
    pub fn parse_selection(&self, input: &str) -> Option<Selection> {
        match input {
            NEW_TOKEN => Some(Selection::New),
            MODIFY_TOKEN if !self.is_empty() => Some(Selection::Modify),
            _ => {
                if let Some(name) = input.strip_prefix(ADVANCED_PREFIX) {
                    return self
                        .presets
                        .contains_key(name)
                        .then(|| Selection::Advanced(name.to_string()));
                }
                self.presets
                    .contains_key(input)
                    .then(|| Selection::Existing(input.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn named(kind: PresetKind, name: &str) -> Preset {
        let mut p = Preset::new(kind);
        p.set("name", Value::text(name)).unwrap();
        p
    }

    #[test]
    fn selectable_tokens_cover_names_and_commands() {
        let mut store = PresetStore::empty(PresetKind::Subplot, PathBuf::from("x.json"));
        store.insert(named(PresetKind::Subplot, "grid"));
        assert_eq!(
            store.list_selectable(),
            vec!["grid", "new", "modify", "advanced grid"]
        );
    }

    #[test]
    fn selection_requires_presets_for_modify_and_advanced() {
        let store = PresetStore::empty(PresetKind::Axis, PathBuf::new());
        assert_eq!(store.parse_selection("new"), Some(Selection::New));
        assert_eq!(store.parse_selection("modify"), None);
        assert_eq!(store.parse_selection("advanced x"), None);
        assert_eq!(store.parse_selection("x"), None);
    }

    #[test]
    fn selection_resolves_names() {
        let mut store = PresetStore::empty(PresetKind::Axis, PathBuf::new());
        store.insert(named(PresetKind::Axis, "rmsd"));
        assert_eq!(store.parse_selection("rmsd"), Some(Selection::Existing("rmsd".into())));
        assert_eq!(store.parse_selection("advanced rmsd"), Some(Selection::Advanced("rmsd".into())));
        assert_eq!(store.parse_selection("modify"), Some(Selection::Modify));
    }

    #[test]
    fn insert_overwrites_by_name() {
        let mut store = PresetStore::empty(PresetKind::Figure, PathBuf::new());
        store.insert(named(PresetKind::Figure, "a"));
        let mut replacement = named(PresetKind::Figure, "a");
        replacement.set("width", Value::Int(900)).unwrap();
        assert!(store.insert(replacement).is_some());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").and_then(|p| p.int("width")), Some(900));
    }

    #[test]
    fn non_object_entry_is_integrity_error() {
        let err = PresetStore::from_json_str(PresetKind::Figure, r#"{"a": 3}"#).unwrap_err();
        assert!(matches!(err, PresetError::Integrity { .. }));
    }
}
