//! # RenFlow
//!
//! Converts articy:draft dialogue exports into Ren'Py scripts.
//!
//! Authors write branching conversations as a graph of fragments, menus,
//! menu options and jumps. Ren'Py scripts are sequential, so every dialogue is
//! walked into one deterministic linear order and written as a `label` block,
//! with `jump` lines wherever the flow leaves for another dialogue.
//!
//! ## Pipeline
//!
//! - [`formats::articy`] - JSON export → typed records
//! - [`graph`] - the dialogue graph and its read-only indices
//! - [`ordering`] - per-label linear order of the local subgraph
//! - [`emitter`] - `label` blocks plus character and variable declarations
//! - [`pipeline`] - writes every scene and init file from one graph
//!
//! ## Quick Start
//!
//! ```no_run
//! use renflow::prelude::*;
//!
//! let converter = Converter::from_file("export.json", &ExportSchema::default(), RenderOptions::default())?;
//!
//! // One scene file
//! converter.write_scene_file("script.rpy", "game/script.rpy", false)?;
//!
//! // Everything, as configured
//! let config = ProjectConfig::discover(".")?;
//! let summary = converter.convert_all("game", &ConvertOptions::from(&config.output))?;
//! println!("{} labels written", summary.rendered_labels());
//! # Ok::<(), renflow::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `renflow` command-line binary

pub mod config;
pub mod emitter;
pub mod error;
pub mod formats;
pub mod graph;
pub mod ordering;
pub mod pipeline;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::{ExportSchema, OutputSettings, ProjectConfig};
    pub use crate::emitter::{InitKind, RenderOptions, SceneEmitter};
    pub use crate::error::{Error, Result};
    pub use crate::formats::articy::{read_export, read_records};
    pub use crate::graph::{DialogueGraph, Label, Node, Records};
    pub use crate::ordering::{OrderedId, SceneOrder, order_ids};
    pub use crate::pipeline::{ConversionSummary, ConvertOptions, Converter};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
