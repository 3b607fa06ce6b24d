mod common;

use common::*;
use pp_app::{RunConfig, load_store, select_preset};
use pp_preset::{PresetKind, PresetStore, Value};

#[test]
fn modify_edits_a_copy_and_saves_on_yes() {
    let dir = tempfile::tempdir().unwrap();
    write_standard_stores(dir.path());
    let config = RunConfig::with_preset_dir(dir.path());
    let mut store = load_store(&config, PresetKind::Axis).unwrap();

    let mut p = scripted(&[
        "modify",
        "unknown",
        "energy",
        "numPlots 3",
        "bogus 1",
        "help movAvgFr",
        "done",
        "maybe",
        "Y",
    ]);
    let edited = select_preset(&mut p, &mut store).unwrap();
    assert_eq!(edited.int("numPlots"), Some(3));

    let reloaded = PresetStore::load(PresetKind::Axis, &config.store_path(PresetKind::Axis)).unwrap();
    assert_eq!(reloaded.get("energy").and_then(|p| p.int("numPlots")), Some(3));
    assert_eq!(reloaded.len(), 2);

    let out = transcript(p);
    assert!(out.contains("Which preset would you like to modify?"));
    assert!(out.contains("numPlots [Number of Datasets]"));
    assert!(out.contains("movAvgFr [Number of Frames]"));
    assert!(out.contains("Type \"done\" when you are done."));
    assert!(out.contains("The number of frames by which to calculate the moving average."));
    assert_eq!(out.matches("Invalid input.").count(), 2);
    assert_eq!(out.matches("Would you like to save this preset? (Y/N)").count(), 2);
}

#[test]
fn declined_save_leaves_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    write_standard_stores(dir.path());
    let config = RunConfig::with_preset_dir(dir.path());
    let path = config.store_path(PresetKind::Axis);
    let before = std::fs::read_to_string(&path).unwrap();
    let mut store = load_store(&config, PresetKind::Axis).unwrap();

    let mut p = scripted(&["modify", "energy", "name energy-v2", "done", "N"]);
    let edited = select_preset(&mut p, &mut store).unwrap();

    assert_eq!(edited.name(), "energy-v2");
    assert!(store.get("energy-v2").is_none());
    assert_eq!(store.get("energy").map(|p| p.name()), Some("energy"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn new_figure_on_empty_store_is_created_and_saved() {
    let dir = tempfile::tempdir().unwrap();
    let config = RunConfig::with_preset_dir(dir.path());
    let mut store = load_store(&config, PresetKind::Figure).unwrap();
    assert!(store.is_empty());

    let mut p = scripted(&[
        "modify",
        "new",
        "",
        "poster",
        "for the poster",
        "2",
        "1",
        "",
        "",
        "3 1",
        "1920",
        "1080",
        "Y",
    ]);
    let created = select_preset(&mut p, &mut store).unwrap();

    assert_eq!(created.name(), "poster");
    assert_eq!(created.get("numSubFigures"), Some(&Value::Null));
    assert_eq!(created.ints("heightRatios"), Some(&[3, 1][..]));
    assert_eq!(created.int("width"), Some(1920));

    let reloaded = load_store(&config, PresetKind::Figure).unwrap();
    assert_eq!(reloaded.get("poster"), Some(&created));

    let out = transcript(p);
    assert!(out.contains("Questions preceded by an asterisk (*) are mandatory"));
    assert!(out.contains("*What should the name of this figure preset be?"));
    assert_eq!(out.matches("Invalid input.").count(), 2);
}
