use crate::config::RunConfig;
use crate::dataset_service::{build_table, locate_dataset};
use crate::error::{AppError, AppResult};
use crate::preset_service::PresetStores;
use crate::progress::{RunProgressEvent, RunStage};
use crate::prompt::Prompter;
use crate::session::{announce_choice, choose_preset, greet, select_preset};
use pp_data::LongTable;
use pp_preset::{AxisNode, FigureLayout, FigureNode, ResolvedFigure, SubplotLayout, SubplotNode};
use pp_render::{AxisPanel, FrameRequest, Renderer, SubfigurePanel};
use std::path::PathBuf;
use std::time::Instant;

/// Per-run titles. Any of the picture name, the figure title and the
/// sub-figure titles may contain the frame placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunTitles {
    pub picture: String,
    pub title: String,
    pub subfigures: Vec<String>,
    /// One title per axis slot, grouped by sub-figure.
    pub axes: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunResponse {
    pub outputs: Vec<PathBuf>,
    pub elapsed_wall_s: f64,
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    stage: RunStage,
    started: Instant,
    message: Option<String>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent::stage(stage, started.elapsed().as_secs_f64(), message));
    }
}

/// Interactive run: choose presets from the stores, then ask for titles and
/// data and render every frame.
pub fn run_interactive(
    p: &mut dyn Prompter,
    config: &RunConfig,
    renderer: &mut dyn Renderer,
) -> AppResult<RunResponse> {
    run_interactive_with_progress(p, config, renderer, None)
}

pub fn run_interactive_with_progress(
    p: &mut dyn Prompter,
    config: &RunConfig,
    renderer: &mut dyn Renderer,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();

    emit_progress(
        &mut progress_cb,
        RunStage::LoadingPresets,
        started,
        Some(format!("Loading presets from {}", config.preset_dir.display())),
    );
    let mut stores = PresetStores::load(config)?;

    emit_progress(&mut progress_cb, RunStage::SelectingPresets, started, None);
    let tree = select_tree(p, &mut stores)?;

    run_selected(p, &tree, config, renderer, &mut progress_cb, started)
}

/// Runs an already assembled preset tree. The tree is validated before any
/// title or dataset is asked for.
pub fn run_tree(
    p: &mut dyn Prompter,
    tree: &FigureNode,
    config: &RunConfig,
    renderer: &mut dyn Renderer,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    run_selected(p, tree, config, renderer, &mut progress_cb, Instant::now())
}

fn run_selected(
    p: &mut dyn Prompter,
    tree: &FigureNode,
    config: &RunConfig,
    renderer: &mut dyn Renderer,
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    started: Instant,
) -> AppResult<RunResponse> {
    emit_progress(progress_cb, RunStage::ValidatingStructure, started, None);
    let resolved = tree.resolve()?;
    let range = resolved.frame_range();
    tracing::info!(
        figure = resolved.layout.name.as_str(),
        subfigures = resolved.subfigures.len(),
        frames = range.end.saturating_sub(range.start),
        "preset tree resolved"
    );

    let titles = ask_titles(p, &resolved)?;

    emit_progress(progress_cb, RunStage::IngestingData, started, None);
    let tables = ingest(p, &resolved)?;

    let mut outputs = Vec::new();
    for frame in range.start..range.end {
        emit_progress(progress_cb, RunStage::Rendering { frame }, started, None);
        let request = frame_request(config, &resolved, &tables, &titles, frame);
        renderer.render_frame(&request)?;
        outputs.push(request.output);
    }

    emit_progress(
        progress_cb,
        RunStage::Completed,
        started,
        Some(format!("{} image(s) written", outputs.len())),
    );
    Ok(RunResponse {
        outputs,
        elapsed_wall_s: started.elapsed().as_secs_f64(),
    })
}

/// Picks the figure, one subplot preset per sub-figure, then the axis
/// presets for each sub-figure's slots.
fn select_tree(p: &mut dyn Prompter, stores: &mut PresetStores) -> AppResult<FigureNode> {
    let figure = choose_preset(p, &mut stores.figure)?;
    let grid = FigureLayout::from_preset(&figure)?.grid;
    if grid.capacity().is_none_or(|capacity| grid.count > capacity) {
        return Err(AppError::Structure(format!(
            "figure preset '{}' declares {} sub-figures for a {}x{} grid",
            figure.name(),
            grid.count,
            grid.rows,
            grid.cols
        )));
    }

    let total = grid.count;
    p.say(&format!("You need to select {total} subplot preset(s)."))?;
    let mut subplot_presets = Vec::with_capacity(total);
    for _ in 0..total {
        greet(p, &stores.subplot)?;
        let preset = select_preset(p, &mut stores.subplot)?;
        announce_choice(p, &preset)?;
        subplot_presets.push(preset);
    }

    let mut tree = FigureNode::new(figure);
    greet(p, &stores.axis)?;
    for (i, preset) in subplot_presets.into_iter().enumerate() {
        let slots = SubplotLayout::from_preset(&preset)?.grid.count;
        p.say(&format!(
            "For subplot number {} of {total}, you must choose {slots} plot presets.",
            i + 1
        ))?;
        let mut axes = Vec::with_capacity(slots);
        for _ in 0..slots {
            let preset = select_preset(p, &mut stores.axis)?;
            announce_choice(p, &preset)?;
            axes.push(AxisNode { preset });
        }
        tree.subplots.push(SubplotNode { preset, axes });
    }
    Ok(tree)
}

fn ask_titles(p: &mut dyn Prompter, resolved: &ResolvedFigure) -> AppResult<RunTitles> {
    let picture = p.ask("What should the picture of the plot be named?")?;
    let title = p.ask("What should the title of the graph be?")?;
    p.say("Starting from top left to bottom right, what are the titles of each subplot?")?;

    let mut subfigures = Vec::with_capacity(resolved.subfigures.len());
    let mut axes = Vec::with_capacity(resolved.subfigures.len());
    for (i, sub) in resolved.subfigures.iter().enumerate() {
        subfigures.push(p.ask(&format!("What should the name of figure {} be?", i + 1))?);
        let mut slot_titles = Vec::with_capacity(sub.axes.len());
        for j in 0..sub.axes.len() {
            slot_titles.push(p.ask(&format!("Title of graph {}:", j + 1))?);
        }
        axes.push(slot_titles);
    }
    Ok(RunTitles {
        picture,
        title,
        subfigures,
        axes,
    })
}

/// Locates every dataset of a slot before reading any of them.
fn ingest(p: &mut dyn Prompter, resolved: &ResolvedFigure) -> AppResult<Vec<Vec<LongTable>>> {
    let mut tables = Vec::with_capacity(resolved.subfigures.len());
    for sub in &resolved.subfigures {
        let mut slot_tables = Vec::with_capacity(sub.axes.len());
        for settings in &sub.axes {
            let mut locations = Vec::with_capacity(settings.num_plots);
            for _ in 0..settings.num_plots {
                locations.push(locate_dataset(p)?);
            }
            slot_tables.push(build_table(settings, &locations)?);
        }
        tables.push(slot_tables);
    }
    Ok(tables)
}

fn frame_request<'a>(
    config: &RunConfig,
    resolved: &'a ResolvedFigure,
    tables: &'a [Vec<LongTable>],
    titles: &RunTitles,
    frame: i64,
) -> FrameRequest<'a> {
    let subfigures = resolved
        .subfigures
        .iter()
        .zip(tables)
        .zip(titles.subfigures.iter().zip(&titles.axes))
        .map(|((sub, slot_tables), (sub_title, axis_titles))| SubfigurePanel {
            title: config.substitute(sub_title, frame),
            layout: &sub.layout,
            axes: sub
                .axes
                .iter()
                .zip(slot_tables)
                .zip(axis_titles)
                .map(|((settings, table), title)| AxisPanel {
                    title: title.clone(),
                    settings,
                    table,
                })
                .collect(),
        })
        .collect();

    FrameRequest {
        output: config.output_path(&titles.picture, frame),
        frame,
        title: config.substitute(&titles.title, frame),
        layout: &resolved.layout,
        subfigures,
    }
}
