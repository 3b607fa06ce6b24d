//! pp-preset: the preset model behind presetplot.
//!
//! Contains:
//! - value (field values and their JSON shape)
//! - field (field descriptors with validate/parse rules)
//! - schema (the Figure, Subplot and Axis schemas)
//! - preset / store (preset instances and their JSON-backed stores)
//! - edit (pure steps of the interactive create/edit flows)
//! - tree / resolved (the Figure -> Subplot -> Axis tree and typed views)

pub mod edit;
pub mod field;
pub mod preset;
pub mod resolved;
pub mod schema;
pub mod store;
pub mod tree;
pub mod value;

pub use field::{FieldError, FieldRule, FieldSpec};
pub use preset::{ADVANCED_HIDDEN_NOTICE, FieldMap, Preset};
pub use resolved::{AxisSettings, FigureLayout, GridLayout, PhaseRange, PlotType, SubplotLayout, TickSpec};
pub use schema::{AXIS_TYPES, PHASE_PLOT, PresetKind, PresetSchema};
pub use store::{PresetStore, Selection};
pub use tree::{AxisNode, FigureNode, ResolvedFigure, ResolvedSubfigure, StructureError, SubplotNode};
pub use value::{Value, ValueKind};

pub type PresetResult<T> = Result<T, PresetError>;

#[derive(thiserror::Error, Debug)]
pub enum PresetError {
    #[error("Integrity error in {kind} preset '{preset}': field '{field}' {reason}")]
    Integrity {
        kind: PresetKind,
        preset: String,
        field: String,
        reason: String,
    },

    #[error("Unknown field '{field}' for {kind} presets")]
    UnknownField { kind: PresetKind, field: String },

    #[error("Preset '{preset}' is a {found} preset, expected {expected}")]
    WrongKind {
        expected: PresetKind,
        found: PresetKind,
        preset: String,
    },

    #[error("Structural mismatch: {0}")]
    Structure(#[from] StructureError),

    #[error("Field error: {0}")]
    Field(#[from] FieldError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
