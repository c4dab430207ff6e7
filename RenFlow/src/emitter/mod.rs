//! Ren'Py script output
//!
//! - [`SceneEmitter`] renders the ordered walk of each label as a `label` block
//! - [`render_characters`] and [`render_variables`] write the init files
//!
//! Menu nesting is tracked while the walk is consumed: every option owns a
//! branch buffer, and a line lands in the deepest option that already holds all
//! of its predecessors. Lines reachable from several options are written once,
//! after the menu.
//!
//! # Usage
//!
//! ```no_run
//! use renflow::emitter::{RenderOptions, SceneEmitter};
//! use renflow::formats::articy::read_records;
//! use renflow::graph::DialogueGraph;
//!
//! let graph = DialogueGraph::new(read_records("export.json", &Default::default())?)?;
//! let emitter = SceneEmitter::new(&graph, RenderOptions::default());
//! for label in graph.labels_in_file("script.rpy") {
//!     println!("{}", emitter.render_label(&label.id)?);
//! }
//! # Ok::<(), renflow::Error>(())
//! ```

mod declarations;
mod layout;
mod scene;
mod writer;

pub use declarations::{InitKind, render_characters, render_variables};
pub use scene::{RenderOptions, SceneEmitter, quote};
