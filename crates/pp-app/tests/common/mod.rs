#![allow(dead_code)]

use pp_app::ConsolePrompter;
use pp_data::RowValue;
use pp_preset::{Preset, PresetKind, PresetStore, Value};
use pp_render::{FrameRequest, RenderResult, Renderer};
use std::io::Cursor;
use std::path::{Path, PathBuf};

pub type ScriptedPrompter = ConsolePrompter<Cursor<String>, Vec<u8>>;

pub fn scripted(lines: &[&str]) -> ScriptedPrompter {
    let mut input = lines.join("\n");
    input.push('\n');
    ConsolePrompter::new(Cursor::new(input), Vec::new())
}

pub fn transcript(p: ScriptedPrompter) -> String {
    String::from_utf8(p.into_output()).unwrap()
}

/// What a renderer was asked to draw, without drawing it.
#[derive(Debug, Clone)]
pub struct RecordedFrame {
    pub output: PathBuf,
    pub frame: i64,
    pub title: String,
    pub subfigure_titles: Vec<String>,
    pub axis_titles: Vec<String>,
    pub variables: Vec<Vec<String>>,
    pub first_values: Vec<Option<RowValue>>,
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<RecordedFrame>,
}

impl Renderer for RecordingRenderer {
    fn render_frame(&mut self, request: &FrameRequest<'_>) -> RenderResult<()> {
        let axes: Vec<_> = request.subfigures.iter().flat_map(|s| s.axes.iter()).collect();
        self.frames.push(RecordedFrame {
            output: request.output.clone(),
            frame: request.frame,
            title: request.title.clone(),
            subfigure_titles: request.subfigures.iter().map(|s| s.title.clone()).collect(),
            axis_titles: axes.iter().map(|a| a.title.clone()).collect(),
            variables: axes
                .iter()
                .map(|a| a.table.variables().into_iter().map(str::to_string).collect())
                .collect(),
            first_values: axes
                .iter()
                .map(|a| a.table.records().first().and_then(|r| r.value.clone()))
                .collect(),
        });
        Ok(())
    }
}

pub fn preset(kind: PresetKind, name: &str, fields: &[(&str, Value)]) -> Preset {
    let mut p = Preset::new(kind);
    p.set("name", Value::text(name)).unwrap();
    for (field, value) in fields {
        p.set(field, value.clone()).unwrap();
    }
    p
}

pub fn write_store(dir: &Path, kind: PresetKind, presets: Vec<Preset>) {
    let config = pp_app::RunConfig::with_preset_dir(dir);
    let mut store = PresetStore::empty(kind, config.store_path(kind));
    for p in presets {
        store.insert(p);
    }
    store.save().unwrap();
}

/// One figure with a single 1x2 sub-figure, a line axis with a 2-frame
/// moving average and a phase plot over frames 3..5.
pub fn write_standard_stores(dir: &Path) {
    write_store(
        dir,
        PresetKind::Figure,
        vec![preset(
            PresetKind::Figure,
            "single",
            &[("width", Value::Int(640)), ("height", Value::Int(480))],
        )],
    );
    write_store(
        dir,
        PresetKind::Subplot,
        vec![preset(PresetKind::Subplot, "pair", &[("cols", Value::Int(2))])],
    );
    write_store(
        dir,
        PresetKind::Axis,
        vec![
            preset(
                PresetKind::Axis,
                "energy",
                &[
                    ("type", Value::text("line")),
                    ("numPlots", Value::Int(1)),
                    ("movAvg", Value::Bool(true)),
                    ("movAvgFr", Value::Int(2)),
                ],
            ),
            preset(
                PresetKind::Axis,
                "rama",
                &[
                    ("type", Value::text("Ramachandran")),
                    ("numPlots", Value::Int(1)),
                    ("startNs", Value::Int(3)),
                    ("endNs", Value::Int(5)),
                    ("indexOffset", Value::Int(3)),
                ],
            ),
        ],
    );
}

pub fn write_standard_data(dir: &Path) -> (PathBuf, PathBuf) {
    let energy = dir.join("energy.csv");
    std::fs::write(&energy, "t,e\n0,1\n1,2\n2,3\n").unwrap();
    let phi = dir.join("phi.dat");
    std::fs::write(&phi, "# frame phi psi\n0 10 20 30 40\n1 11 21 31 41\n").unwrap();
    (energy, phi)
}
