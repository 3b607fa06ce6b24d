//! Field descriptors: metadata plus the validate/parse rule for one field.

use crate::value::{Value, ValueKind};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("'{field}' is mandatory")]
    MandatoryEmpty { field: &'static str },

    #[error("Invalid input for '{field}': {input:?}")]
    Rejected { field: &'static str, input: String },
}

/// How raw text is checked and converted for a field.
///
/// `validate` and `parse` share one conversion routine, so `parse` is total
/// over every input `validate` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Any text, stored verbatim.
    FreeText,
    /// One of a fixed set of tokens.
    Choice(&'static [&'static str]),
    /// `Y` or `N`.
    YesNo,
    /// Unsigned decimal integer.
    Count,
    /// Empty (null) or unsigned decimal integer.
    OptionalCount,
    /// Optional leading `-` followed by decimal digits.
    SignedInt,
    /// Empty (null) or signed integer.
    OptionalSignedInt,
    /// Empty (null) or non-zero signed integer; used as a divisor.
    OptionalScale,
    /// Empty (null) or exactly `n` whitespace-separated signed integers.
    IntTuple(usize),
    /// Whitespace-separated unsigned integers; empty is null.
    Ratios,
    /// Whitespace-separated `#RRGGBB` colours; empty is an empty list.
    HexPalette,
    /// Whitespace-separated words.
    Words,
}

fn parse_count(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn parse_signed(raw: &str) -> Option<i64> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    parse_count(digits)?;
    raw.parse().ok()
}

fn is_hex_colour(token: &str) -> bool {
    token.len() == 7
        && token.starts_with('#')
        && token[1..].chars().all(|c| c.is_ascii_hexdigit())
}

impl FieldRule {
    fn convert(&self, raw: &str) -> Option<Value> {
        match self {
            FieldRule::FreeText => Some(Value::text(raw)),
            FieldRule::Choice(options) => options.iter().any(|o| *o == raw).then(|| Value::text(raw)),
            FieldRule::YesNo => match raw {
                "Y" => Some(Value::Bool(true)),
                "N" => Some(Value::Bool(false)),
                _ => None,
            },
            FieldRule::Count => parse_count(raw).map(Value::Int),
            FieldRule::OptionalCount if raw.is_empty() => Some(Value::Null),
            FieldRule::OptionalCount => parse_count(raw).map(Value::Int),
            FieldRule::SignedInt => parse_signed(raw).map(Value::Int),
            FieldRule::OptionalSignedInt if raw.is_empty() => Some(Value::Null),
            FieldRule::OptionalSignedInt => parse_signed(raw).map(Value::Int),
            FieldRule::OptionalScale if raw.is_empty() => Some(Value::Null),
            FieldRule::OptionalScale => parse_signed(raw).filter(|v| *v != 0).map(Value::Int),
            FieldRule::IntTuple(_) if raw.is_empty() => Some(Value::Null),
            FieldRule::IntTuple(n) => {
                let parts: Option<Vec<i64>> = raw.split_whitespace().map(parse_signed).collect();
                parts.filter(|p| p.len() == *n).map(Value::IntList)
            }
            FieldRule::Ratios if raw.trim().is_empty() => Some(Value::Null),
            FieldRule::Ratios => {
                let parts: Option<Vec<i64>> = raw.split_whitespace().map(parse_count).collect();
                parts.map(Value::IntList)
            }
            FieldRule::HexPalette => {
                let tokens: Vec<String> = raw.split_whitespace().map(str::to_string).collect();
                tokens
                    .iter()
                    .all(|t| is_hex_colour(t))
                    .then_some(Value::TextList(tokens))
            }
            FieldRule::Words => Some(Value::TextList(
                raw.split_whitespace().map(str::to_string).collect(),
            )),
        }
    }

    pub fn validate(&self, raw: &str) -> bool {
        self.convert(raw).is_some()
    }

    /// Converts input previously accepted by [`FieldRule::validate`].
    pub fn parse(&self, raw: &str) -> Value {
        self.convert(raw).unwrap_or(Value::Null)
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            FieldRule::FreeText | FieldRule::Choice(_) => ValueKind::Text,
            FieldRule::YesNo => ValueKind::Bool,
            FieldRule::Count
            | FieldRule::OptionalCount
            | FieldRule::SignedInt
            | FieldRule::OptionalSignedInt
            | FieldRule::OptionalScale => ValueKind::Int,
            FieldRule::IntTuple(_) | FieldRule::Ratios => ValueKind::IntList,
            FieldRule::HexPalette | FieldRule::Words => ValueKind::TextList,
        }
    }

    fn nullable(&self) -> bool {
        matches!(
            self,
            FieldRule::OptionalCount
                | FieldRule::OptionalSignedInt
                | FieldRule::OptionalScale
                | FieldRule::IntTuple(_)
                | FieldRule::Ratios
        )
    }

    /// Converts a persisted JSON value into this rule's value shape.
    ///
    /// Accepts the loose encodings older preset files contain: `"Y"`/`"N"`
    /// strings for booleans, digit strings for counts, a bare string for word
    /// lists, and `[]` for an unset tuple.
    pub fn coerce(&self, json: &serde_json::Value) -> Option<Value> {
        use serde_json::Value as J;

        if json.is_null() {
            return match self.kind() {
                _ if self.nullable() => Some(Value::Null),
                ValueKind::TextList => Some(Value::TextList(Vec::new())),
                _ => None,
            };
        }

        match self {
            FieldRule::FreeText => json.as_str().map(Value::text),
            FieldRule::Choice(options) => json
                .as_str()
                .filter(|s| s.is_empty() || options.iter().any(|o| o == s))
                .map(Value::text),
            FieldRule::YesNo => match json {
                J::Bool(b) => Some(Value::Bool(*b)),
                J::String(s) => self.convert(s),
                _ => None,
            },
            FieldRule::Count | FieldRule::OptionalCount => match json {
                J::Number(n) => n.as_u64().and_then(|v| i64::try_from(v).ok()).map(Value::Int),
                J::String(s) => parse_count(s).map(Value::Int),
                _ => None,
            },
            FieldRule::SignedInt | FieldRule::OptionalSignedInt => json.as_i64().map(Value::Int),
            FieldRule::OptionalScale => json.as_i64().filter(|v| *v != 0).map(Value::Int),
            FieldRule::IntTuple(n) => {
                let items = json.as_array()?;
                if items.is_empty() {
                    return Some(Value::Null);
                }
                let parts: Option<Vec<i64>> = items.iter().map(|v| v.as_i64()).collect();
                parts.filter(|p| p.len() == *n).map(Value::IntList)
            }
            FieldRule::Ratios => {
                let items = json.as_array()?;
                if items.is_empty() {
                    return Some(Value::Null);
                }
                let parts: Option<Vec<i64>> = items
                    .iter()
                    .map(|v| v.as_i64().filter(|i| *i >= 0))
                    .collect();
                parts.map(Value::IntList)
            }
            FieldRule::HexPalette | FieldRule::Words => match json {
                J::String(s) => self.convert(s),
                J::Array(items) => {
                    let parts: Option<Vec<String>> = items
                        .iter()
                        .map(|v| v.as_str().map(str::to_string))
                        .filter(|v| v.as_deref() != Some(""))
                        .collect();
                    parts.map(Value::TextList)
                }
                _ => None,
            },
        }
    }
}

/// Describes one configurable field of a preset schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Question asked when a preset is created.
    pub new_prompt: &'static str,
    /// Usage line listed when a preset is edited, e.g. `numPlots [Number of Datasets]`.
    pub modify_prompt: &'static str,
    pub help: &'static str,
    /// Label printed before the value, e.g. `Number of Plots: `.
    pub display: &'static str,
    pub rule: FieldRule,
    pub default: Value,
    pub mandatory: bool,
    /// Hidden from default display unless explicitly requested.
    pub advanced: bool,
    /// Plot types this field is relevant for; empty means always.
    pub applies_to: &'static [&'static str],
}

impl FieldSpec {
    pub fn new(name: &'static str, rule: FieldRule, default: Value) -> Self {
        Self {
            name,
            new_prompt: "",
            modify_prompt: "",
            help: "",
            display: "",
            rule,
            default,
            mandatory: false,
            advanced: false,
            applies_to: &[],
        }
    }

    pub fn prompts(
        mut self,
        new_prompt: &'static str,
        modify_prompt: &'static str,
        display: &'static str,
        help: &'static str,
    ) -> Self {
        self.new_prompt = new_prompt;
        self.modify_prompt = modify_prompt;
        self.display = display;
        self.help = help;
        self
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub fn advanced(mut self) -> Self {
        self.advanced = true;
        self
    }

    pub fn only_for(mut self, variants: &'static [&'static str]) -> Self {
        self.applies_to = variants;
        self
    }

    /// Prefix that selects this field in edit mode: the field name and a space.
    pub fn edit_command(&self) -> String {
        format!("{} ", self.name)
    }

    /// Whether the field is shown for a preset of the given plot type.
    /// Presets without a type see every field.
    pub fn applies_to_variant(&self, variant: Option<&str>) -> bool {
        match variant {
            Some(v) if !self.applies_to.is_empty() => self.applies_to.iter().any(|t| *t == v),
            _ => true,
        }
    }

    pub fn validate(&self, raw: &str) -> bool {
        self.rule.validate(raw)
    }

    /// Validates then parses; `parse` is never reached for rejected input.
    pub fn accept(&self, raw: &str) -> Result<Value, FieldError> {
        if self.mandatory && raw.is_empty() {
            return Err(FieldError::MandatoryEmpty { field: self.name });
        }
        if !self.rule.validate(raw) {
            return Err(FieldError::Rejected {
                field: self.name,
                input: raw.to_string(),
            });
        }
        Ok(self.rule.parse(raw))
    }
}
