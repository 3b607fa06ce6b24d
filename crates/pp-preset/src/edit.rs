//! Pure steps behind the interactive create and edit flows.
//!
//! Nothing here reads or writes a terminal; the prompt loops in `pp-app`
//! feed raw lines through these functions and print what they return.

use crate::field::{FieldError, FieldSpec};
use crate::preset::Preset;
use crate::schema::PresetSchema;
use crate::value::Value;

pub const HELP_TOKENS: [&str; 2] = ["help", "Help"];
pub const DONE_TOKEN: &str = "done";

/// Outcome of feeding one line to a creation prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum CreationStep {
    /// Show the field's help and ask again.
    Help(&'static str),
    Accepted(Value),
    Retry(FieldError),
}

pub fn creation_step(field: &'static FieldSpec, input: &str) -> CreationStep {
    if HELP_TOKENS.iter().any(|t| *t == input) {
        return CreationStep::Help(field.help);
    }
    match field.accept(input) {
        Ok(value) => CreationStep::Accepted(value),
        Err(err) => CreationStep::Retry(err),
    }
}

/// Prompt text for creation; mandatory fields are marked with `*`.
pub fn creation_prompt(field: &FieldSpec) -> String {
    if field.mandatory {
        format!("*{}", field.new_prompt)
    } else {
        field.new_prompt.to_string()
    }
}

/// Whether the creation flow should ask for this field, given what has been
/// collected so far. Gated fields depend on `type`, which the schema lists first.
pub fn should_prompt(preset: &Preset, field: &FieldSpec) -> bool {
    field.applies_to_variant(preset.variant())
}

/// One parsed edit-mode command.
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    Done,
    Help(&'static FieldSpec),
    Set {
        field: &'static FieldSpec,
        value: Value,
    },
    Invalid,
}

/// Finds the field whose edit command is the longest prefix of `input`.
pub fn match_edit_command(schema: &'static PresetSchema, input: &str) -> Option<&'static FieldSpec> {
    schema
        .fields()
        .iter()
        .filter(|f| input.starts_with(&f.edit_command()))
        .max_by_key(|f| f.name.len())
}

pub fn parse_edit_command(schema: &'static PresetSchema, input: &str) -> EditCommand {
    if input == DONE_TOKEN {
        return EditCommand::Done;
    }
    for token in HELP_TOKENS {
        if let Some(name) = input.strip_prefix(token).and_then(|r| r.strip_prefix(' ')) {
            return schema.field(name).map_or(EditCommand::Invalid, EditCommand::Help);
        }
    }
    let Some(field) = match_edit_command(schema, input) else {
        return EditCommand::Invalid;
    };
    let payload = &input[field.edit_command().len()..];
    match field.accept(payload) {
        Ok(value) => EditCommand::Set { field, value },
        Err(_) => EditCommand::Invalid,
    }
}

/// Applies one edit command to a working copy. Invalid input leaves the
/// preset untouched.
pub fn apply_edit(preset: &mut Preset, input: &str) -> EditCommand {
    let command = parse_edit_command(preset.schema(), input);
    if let EditCommand::Set { field, value } = &command
        && preset.set(field.name, value.clone()).is_err()
    {
        return EditCommand::Invalid;
    }
    command
}

/// `Y`/`N` confirmation.
pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input {
        "Y" => Some(true),
        "N" => Some(false),
        _ => None,
    }
}
