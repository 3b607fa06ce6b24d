//! Interactive preset selection, creation and editing against one store.

use crate::error::{AppError, AppResult};
use crate::prompt::Prompter;
use pp_preset::edit::{
    CreationStep, EditCommand, apply_edit, creation_prompt, creation_step, parse_yes_no, should_prompt,
};
use pp_preset::{PresetKind, Preset, PresetStore, Selection};

pub const INVALID_INPUT: &str = "Invalid input.";
pub const SAVE_PROMPT: &str = "Would you like to save this preset? (Y/N)";
pub const MODIFY_PROMPT: &str = "Which preset would you like to modify?";

const NEW_PRESET_NOTE: &str = "If you choose to save your file and you have not chosen a unique name, \
it will override the original.\nQuestions preceded by an asterisk (*) are mandatory, leaving optional \
questions will use the default settings. Type 'Help' for more information about any of the options.";

const SELECT_INSTRUCTIONS: &str = "Please enter the name of the preset you would like to use.\n\
Enter \"new\" if you would like to create a new preset from scratch,\n\
or enter \"modify\" if you would like to edit an existing preset.";

const ADVANCED_INSTRUCTIONS: &str =
    "Finally, you may type \"advanced [preset name]\" to view all the settings associated with that preset.";

const EDIT_INSTRUCTIONS: &str = "Type \"done\" when you are done.\n\
Type \"Help [Command Name]\" to get more info about a specific command.";

/// Lists the loaded presets and explains what can be typed next.
pub fn greet(p: &mut dyn Prompter, store: &PresetStore) -> AppResult<()> {
    if store.is_empty() {
        let file = store
            .path()
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        p.say(&format!(
            "You have no presets on file. If you believe you should, check to find a {file} file in this directory."
        ))?;
        return p.say("Enter \"new\" to create a new preset from scratch.");
    }

    p.say("Here are your loaded presets:\n")?;
    for (_, preset) in store.iter() {
        p.say(&preset.render(false))?;
        p.say("")?;
    }
    p.say(SELECT_INSTRUCTIONS)?;
    if store.kind() == PresetKind::Axis {
        p.say(ADVANCED_INSTRUCTIONS)?;
    }
    Ok(())
}

/// Reads selection tokens until one yields a preset. `advanced <name>`
/// prints the full preset and asks again.
pub fn select_preset(p: &mut dyn Prompter, store: &mut PresetStore) -> AppResult<Preset> {
    loop {
        let input = p.ask("")?;
        match store.parse_selection(&input) {
            Some(Selection::Existing(name)) => {
                return store.get(&name).cloned().ok_or(AppError::PresetNotFound(name));
            }
            Some(Selection::New) => return create_new(p, store),
            Some(Selection::Modify) => return modify_existing(p, store),
            Some(Selection::Advanced(name)) => {
                if let Some(preset) = store.get(&name) {
                    p.say(&preset.render(true))?;
                }
            }
            None => p.say(INVALID_INPUT)?,
        }
    }
}

/// Greets, selects, and echoes the chosen preset in full.
pub fn choose_preset(p: &mut dyn Prompter, store: &mut PresetStore) -> AppResult<Preset> {
    greet(p, store)?;
    let preset = select_preset(p, store)?;
    announce_choice(p, &preset)?;
    Ok(preset)
}

/// Echoes a chosen preset with every field shown.
pub fn announce_choice(p: &mut dyn Prompter, preset: &Preset) -> AppResult<()> {
    p.say("\nYou have chosen the following preset:")?;
    p.say(&preset.render(true))
}

/// Asks every applicable field in schema order, then offers to save.
pub fn create_new(p: &mut dyn Prompter, store: &mut PresetStore) -> AppResult<Preset> {
    p.say(NEW_PRESET_NOTE)?;
    let mut preset = Preset::new(store.kind());
    for field in store.kind().schema().fields() {
        if !should_prompt(&preset, field) {
            continue;
        }
        loop {
            let input = p.ask(&creation_prompt(field))?;
            match creation_step(field, &input) {
                CreationStep::Help(text) => p.say(text)?,
                CreationStep::Accepted(value) => {
                    preset.set(field.name, value)?;
                    break;
                }
                CreationStep::Retry(err) => {
                    tracing::debug!(%err, "creation input rejected");
                    p.say(INVALID_INPUT)?;
                }
            }
        }
    }
    confirm_save(p, store, &preset)?;
    Ok(preset)
}

/// Edits a copy of a stored preset. The stored one only changes if the copy
/// is saved under the same name.
pub fn modify_existing(p: &mut dyn Prompter, store: &mut PresetStore) -> AppResult<Preset> {
    let mut preset = loop {
        let input = p.ask(MODIFY_PROMPT)?;
        match store.get(&input) {
            Some(found) => break found.clone(),
            None => p.say(INVALID_INPUT)?,
        }
    };

    for field in preset.visible_fields(true) {
        p.say(field.modify_prompt)?;
    }
    p.say(EDIT_INSTRUCTIONS)?;

    loop {
        let input = p.ask("")?;
        match apply_edit(&mut preset, &input) {
            EditCommand::Done => break,
            EditCommand::Help(field) => p.say(field.help)?,
            EditCommand::Set { field, .. } => tracing::debug!(field = field.name, "field updated"),
            EditCommand::Invalid => p.say(INVALID_INPUT)?,
        }
    }
    confirm_save(p, store, &preset)?;
    Ok(preset)
}

fn confirm_save(p: &mut dyn Prompter, store: &mut PresetStore, preset: &Preset) -> AppResult<()> {
    let save = loop {
        if let Some(answer) = parse_yes_no(&p.ask(SAVE_PROMPT)?) {
            break answer;
        }
    };
    if save {
        store.insert(preset.clone());
        store.save()?;
        tracing::info!(
            kind = %store.kind(),
            preset = preset.name(),
            path = %store.path().display(),
            "preset saved"
        );
    }
    Ok(())
}
