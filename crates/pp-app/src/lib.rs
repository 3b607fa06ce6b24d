//! Shared application service layer for presetplot.
//!
//! Holds the interactive flows (preset selection, creation and editing,
//! dataset location) and the run orchestration that ties preset stores,
//! data ingestion and rendering together. The CLI is a thin shell around it.

pub mod config;
pub mod dataset_service;
pub mod error;
pub mod preset_service;
pub mod progress;
pub mod prompt;
pub mod run_service;
pub mod session;

pub use config::RunConfig;
pub use dataset_service::{DatasetLocation, build_table, locate_dataset, transform_for};
pub use error::{AppError, AppResult};
pub use preset_service::{PresetStores, PresetSummary, StoreIssue, check_store, list_presets, load_store, show_preset};
pub use progress::{RunProgressEvent, RunStage};
pub use prompt::{ConsolePrompter, Prompter};
pub use run_service::{RunResponse, RunTitles, run_interactive, run_interactive_with_progress, run_tree};
pub use session::{announce_choice, choose_preset, create_new, greet, modify_existing, select_preset};
