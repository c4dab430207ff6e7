//! articy:draft JSON export
//!
//! The converter reads `GlobalVariables` and the models of the first package.
//! Model type names and template feature names come from
//! [`ExportSchema`](crate::config::ExportSchema), since they are defined per
//! articy project.

mod adapter;
mod document;
mod reader;

pub use adapter::extract_records;
pub use document::{ArticyExport, Model, Package, RawVariable, VariableNamespace};
pub use reader::{parse_export, read_export, read_records};
