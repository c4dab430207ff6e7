//! Dialogue graph model
//!
//! Labels (articy dialogues) own a subgraph of nodes: fragments, menus, menu
//! items and jumps. Edges come from output pin connections and point either at
//! another node or at a label.
//!
//! # Usage
//!
//! ```
//! use renflow::graph::{DialogueGraph, Fragment, Label, Node, Records};
//!
//! let records = Records {
//!     labels: vec![Label {
//!         id: "L1".into(),
//!         name: "intro".into(),
//!         target_file: "script.rpy".into(),
//!         edges: vec![],
//!     }],
//!     nodes: vec![Node::Fragment(Fragment {
//!         id: "F1".into(),
//!         parent: "L1".into(),
//!         text: "Hi".into(),
//!         ..Default::default()
//!     })],
//!     ..Default::default()
//! };
//!
//! let graph = DialogueGraph::new(records)?;
//! assert_eq!(graph.enclosing_label("F1"), Some("L1"));
//! # Ok::<(), renflow::Error>(())
//! ```

mod model;
mod speakers;
mod types;

pub use model::{DialogueGraph, OrdinalIndex};
pub use speakers::{SpeakerIndex, is_null_speaker, script_ident};
pub use types::*;
