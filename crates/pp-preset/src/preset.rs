//! Preset instances: one schema plus concrete field values.

use crate::field::FieldSpec;
use crate::schema::{PresetKind, PresetSchema};
use crate::value::Value;
use crate::{PresetError, PresetResult};
use indexmap::IndexMap;

/// Notice appended by [`Preset::render`] when advanced fields were left out.
pub const ADVANCED_HIDDEN_NOTICE: &str = "---Advanced Options Hidden---";

/// Flat `field name -> value` mapping, in schema order.
pub type FieldMap = IndexMap<String, Value>;

/// A named bundle of field values for one preset kind.
///
/// Every schema field always has a value. `Clone` copies the whole value map,
/// so editing a clone never touches the original.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    kind: PresetKind,
    values: FieldMap,
}

impl Preset {
    /// A preset holding every field's default.
    pub fn new(kind: PresetKind) -> Self {
        let values = kind
            .schema()
            .fields()
            .iter()
            .map(|f| (f.name.to_string(), f.default.clone()))
            .collect();
        Self { kind, values }
    }

    pub fn kind(&self) -> PresetKind {
        self.kind
    }

    pub fn schema(&self) -> &'static PresetSchema {
        self.kind.schema()
    }

    pub fn name(&self) -> &str {
        self.text("name")
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Replaces a field value. The value is trusted to come from the
    /// field's rule (`FieldSpec::accept` or `FieldRule::coerce`).
    pub fn set(&mut self, field: &str, value: Value) -> PresetResult<()> {
        match self.values.get_mut(field) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(PresetError::UnknownField {
                kind: self.kind,
                field: field.to_string(),
            }),
        }
    }

    /// Plot-type tag, for kinds that have one.
    pub fn variant(&self) -> Option<&str> {
        if self.schema().has_variants() {
            Some(self.text("type"))
        } else {
            None
        }
    }

    pub fn is_visible(&self, field: &FieldSpec, show_advanced: bool) -> bool {
        (show_advanced || !field.advanced) && field.applies_to_variant(self.variant())
    }

    /// Fields shown for the current plot type, in schema order.
    pub fn visible_fields(&self, show_advanced: bool) -> impl Iterator<Item = &'static FieldSpec> + '_ {
        self.schema()
            .fields()
            .iter()
            .filter(move |f| self.is_visible(f, show_advanced))
    }

    /// One `label value` line per visible field, plus a trailing notice when
    /// the schema has advanced fields that were not shown.
    pub fn render(&self, show_advanced: bool) -> String {
        let mut out = String::new();
        for field in self.visible_fields(show_advanced) {
            if let Some(value) = self.values.get(field.name) {
                out.push_str(field.display);
                out.push_str(&value.to_string());
                out.push('\n');
            }
        }
        if !show_advanced && self.schema().fields().iter().any(|f| f.advanced) {
            out.push_str(ADVANCED_HIDDEN_NOTICE);
        }
        out
    }

    pub fn to_mapping(&self) -> FieldMap {
        self.values.clone()
    }

    pub fn to_json(&self) -> serde_json::Map<String, serde_json::Value> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect()
    }

    /// Rebuilds a preset from a persisted field mapping, in schema order.
    ///
    /// Mandatory fields must be present; optional fields fall back to their
    /// default. Keys the schema does not know are skipped.
    pub fn from_json(
        kind: PresetKind,
        entry: &str,
        stored: &serde_json::Map<String, serde_json::Value>,
    ) -> PresetResult<Self> {
        let mut preset = Preset::new(kind);
        for field in kind.schema().fields() {
            let Some(raw) = stored.get(field.name) else {
                if field.mandatory {
                    return Err(PresetError::Integrity {
                        kind,
                        preset: entry.to_string(),
                        field: field.name.to_string(),
                        reason: "is missing".to_string(),
                    });
                }
                continue;
            };
            let value = field.rule.coerce(raw).ok_or_else(|| PresetError::Integrity {
                kind,
                preset: entry.to_string(),
                field: field.name.to_string(),
                reason: format!("has an unexpected value {raw}"),
            })?;
            preset.values.insert(field.name.to_string(), value);
        }
        for key in stored.keys() {
            if kind.schema().field(key).is_none() {
                tracing::warn!(%kind, preset = entry, field = %key, "ignoring unknown preset field");
            }
        }
        Ok(preset)
    }

    /// Mandatory fields that still hold an empty value. Type-gated fields
    /// that do not apply to the current plot type are not required.
    pub fn missing_mandatory(&self) -> Vec<&'static str> {
        self.schema()
            .fields()
            .iter()
            .filter(|f| f.mandatory && f.applies_to_variant(self.variant()))
            .filter(|f| self.values.get(f.name).is_none_or(Value::is_empty))
            .map(|f| f.name)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_mandatory().is_empty()
    }

    pub fn text(&self, field: &str) -> &str {
        self.values.get(field).and_then(Value::as_text).unwrap_or("")
    }

    pub fn int(&self, field: &str) -> Option<i64> {
        self.values.get(field).and_then(Value::as_int)
    }

    pub fn flag(&self, field: &str) -> bool {
        self.values.get(field).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn ints(&self, field: &str) -> Option<&[i64]> {
        self.values.get(field).and_then(Value::as_ints)
    }

    pub fn texts(&self, field: &str) -> &[String] {
        self.values.get(field).and_then(Value::as_texts).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn line_axis() -> Preset {
        let mut p = Preset::new(PresetKind::Axis);
        p.set("name", Value::text("energy")).unwrap();
        p.set("type", Value::text("line")).unwrap();
        p.set("numPlots", Value::Int(2)).unwrap();
        p
    }

    #[test]
    fn render_hides_advanced_and_appends_notice() {
        let p = line_axis();
        let text = p.render(false);
        assert!(text.contains("Name: energy\n"));
        assert!(!text.contains("X Scale: "));
        assert!(text.ends_with(ADVANCED_HIDDEN_NOTICE));
    }

    #[test]
    fn render_advanced_shows_everything_applicable() {
        let p = line_axis();
        let text = p.render(true);
        assert!(text.contains("X Scale: 1\n"));
        assert!(text.contains("Palette: []\n"));
        assert!(!text.contains(ADVANCED_HIDDEN_NOTICE));
    }

    #[test]
    fn render_skips_fields_for_other_types() {
        let p = line_axis();
        let text = p.render(true);
        assert!(!text.contains("StartNS: "));
        assert!(!text.contains("Color: "));
        assert!(text.contains("Moving Average? N\n"));
    }

    #[test]
    fn figure_render_has_no_notice() {
        let p = Preset::new(PresetKind::Figure);
        let text = p.render(false);
        assert!(text.contains("Rows: 1\n"));
        assert!(!text.contains(ADVANCED_HIDDEN_NOTICE));
    }

    #[test]
    fn clone_is_independent() {
        let original = line_axis();
        let mut copy = original.clone();
        copy.set("numPlots", Value::Int(7)).unwrap();
        assert_eq!(original.int("numPlots"), Some(2));
        assert_eq!(copy.int("numPlots"), Some(7));
    }

    #[test]
    fn set_unknown_field_fails() {
        let mut p = Preset::new(PresetKind::Subplot);
        assert!(matches!(
            p.set("numPlots", Value::Int(1)),
            Err(PresetError::UnknownField { .. })
        ));
    }

    #[test]
    fn completeness_ignores_gated_mandatory_fields() {
        let mut p = Preset::new(PresetKind::Axis);
        assert_eq!(p.missing_mandatory(), vec!["name", "type"]);
        p.set("name", Value::text("phi")).unwrap();
        p.set("type", Value::text("scatter")).unwrap();
        assert!(p.is_complete());
    }

    #[test]
    fn from_json_reports_missing_mandatory() {
        let stored = json!({"comment": "no name"});
        let err = Preset::from_json(PresetKind::Figure, "f1", stored.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, PresetError::Integrity { ref field, .. } if field == "name"));
    }

    #[test]
    fn from_json_fills_optional_defaults_and_skips_unknown() {
        let stored = json!({"name": "wide", "width": 1200, "height": 400, "numRows": 10});
        let p = Preset::from_json(PresetKind::Figure, "wide", stored.as_object().unwrap()).unwrap();
        assert_eq!(p.int("width"), Some(1200));
        assert_eq!(p.int("rows"), Some(1));
        assert_eq!(p.get("numSubFigures"), Some(&Value::Null));
    }

    #[test]
    fn from_json_rejects_wrong_shape() {
        let stored = json!({"name": "x", "width": "wide", "height": 1});
        let err = Preset::from_json(PresetKind::Figure, "x", stored.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, PresetError::Integrity { ref field, .. } if field == "width"));
    }
}
