use clap::{Parser, Subcommand, ValueEnum};
use pp_app::{
    AppError, AppResult, ConsolePrompter, RunConfig, RunProgressEvent, check_store, list_presets, load_store,
    run_interactive_with_progress, show_preset,
};
use pp_preset::PresetKind;
use pp_render::PlottersRenderer;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "presetplot")]
#[command(about = "Preset-driven plotting of simulation data files", long_about = None)]
struct Cli {
    /// Directory holding the preset files
    #[arg(long, global = true, default_value = ".")]
    preset_dir: PathBuf,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose presets interactively and render the figure (default)
    Run {
        /// Leave out titles, axis labels and legends (for hosts without fonts)
        #[arg(long)]
        no_text: bool,
    },
    /// List the presets of one kind
    List {
        kind: KindArg,
    },
    /// Print one preset
    Show {
        kind: KindArg,
        name: String,
        /// Include advanced fields
        #[arg(long)]
        advanced: bool,
    },
    /// Load a preset file and report presets that cannot be used
    Check {
        kind: KindArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Figure,
    Subplot,
    Axis,
}

impl From<KindArg> for PresetKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Figure => PresetKind::Figure,
            KindArg::Subplot => PresetKind::Subplot,
            KindArg::Axis => PresetKind::Axis,
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = RunConfig::with_preset_dir(cli.preset_dir);
    match cli.command.unwrap_or(Commands::Run { no_text: false }) {
        Commands::Run { no_text } => cmd_run(&config, no_text),
        Commands::List { kind } => cmd_list(&config, kind.into()),
        Commands::Show {
            kind,
            name,
            advanced,
        } => cmd_show(&config, kind.into(), &name, advanced),
        Commands::Check { kind } => cmd_check(&config, kind.into()),
    }
}

fn cmd_run(config: &RunConfig, no_text: bool) -> AppResult<()> {
    let mut prompter = ConsolePrompter::stdio();
    let mut renderer = if no_text {
        PlottersRenderer::without_text()
    } else {
        PlottersRenderer::new()
    };
    let response = run_interactive_with_progress(
        &mut prompter,
        config,
        &mut renderer,
        Some(&mut |event: RunProgressEvent| {
            tracing::info!(
                stage = ?event.stage,
                elapsed_s = event.elapsed_wall_s,
                message = event.message.as_deref().unwrap_or(""),
                "run progress"
            );
        }),
    )?;

    for output in &response.outputs {
        println!("✓ Wrote {}", output.display());
    }
    println!("  Total time: {:.2} s", response.elapsed_wall_s);
    Ok(())
}

fn cmd_list(config: &RunConfig, kind: PresetKind) -> AppResult<()> {
    let store = load_store(config, kind)?;
    let presets = list_presets(&store);

    if presets.is_empty() {
        println!("No {kind} presets in {}", store.path().display());
    } else {
        println!("{kind} presets in {}:", store.path().display());
        for preset in presets {
            match preset.variant {
                Some(variant) => println!("  {} [{variant}] {}", preset.name, preset.comment),
                None => println!("  {} {}", preset.name, preset.comment),
            }
        }
    }
    Ok(())
}

fn cmd_show(config: &RunConfig, kind: PresetKind, name: &str, advanced: bool) -> AppResult<()> {
    let store = load_store(config, kind)?;
    println!("{}", show_preset(&store, name, advanced)?);
    Ok(())
}

fn cmd_check(config: &RunConfig, kind: PresetKind) -> AppResult<()> {
    println!("Checking {}", config.store_path(kind).display());
    let store = load_store(config, kind)?;
    let issues = check_store(&store);

    if issues.is_empty() {
        println!("✓ {} {kind} preset(s) are usable", store.len());
        return Ok(());
    }
    for issue in &issues {
        println!("  ✗ {}: {}", issue.preset, issue.problem);
    }
    Err(AppError::Preset(format!(
        "{} of {} {kind} preset(s) failed checks",
        issues.len(),
        store.len()
    )))
}
