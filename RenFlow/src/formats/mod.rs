//! Input format handlers

pub mod articy;

pub use articy::{ArticyExport, extract_records, read_export, read_records};
