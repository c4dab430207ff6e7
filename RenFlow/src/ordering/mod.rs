//! Graph-to-sequence ordering engine
//!
//! Produces, per label, a lazy and deterministic linear order of the ids in the
//! label's local subgraph:
//!
//! - the walk starts at the unique vertex without incoming edges
//! - jumps are yielded but never expanded
//! - a lone successor that is a jump or another label is handled immediately,
//!   so it ends up right after the node leading to it
//! - every other successor set is queued at the back, sorted by
//!   `(ordinal, id)`, which fixes the order of menu options
//! - an edge back to the walked label is a loop-back, never an exit
//!
//! # Usage
//!
//! ```no_run
//! use renflow::formats::articy::read_records;
//! use renflow::graph::DialogueGraph;
//! use renflow::ordering::{OrderedId, SceneOrder};
//!
//! let records = read_records("export.json", &Default::default())?;
//! let graph = DialogueGraph::new(records)?;
//!
//! let mut order = SceneOrder::new(&graph, "0x0100000000000001")?;
//! for item in order.by_ref() {
//!     if let OrderedId::Exit { label, .. } = item {
//!         println!("jump {}", label.name);
//!     }
//! }
//! order.finish()?;
//! # Ok::<(), renflow::Error>(())
//! ```

mod subgraph;
mod walk;

pub use walk::{OrderedId, SceneOrder, order_ids, order_label};
