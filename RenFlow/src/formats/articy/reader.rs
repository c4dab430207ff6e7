//! articy JSON export reading

use std::fs;
use std::path::Path;

use super::adapter::extract_records;
use super::document::ArticyExport;
use crate::config::ExportSchema;
use crate::error::Result;
use crate::graph::Records;

/// Read an export file from disk
///
/// # Errors
/// Returns an error if the file cannot be read or has invalid JSON.
pub fn read_export<P: AsRef<Path>>(path: P) -> Result<ArticyExport> {
    let content = fs::read_to_string(path)?;
    parse_export(&content)
}

/// Parse an export from a JSON string
///
/// # Errors
/// Returns an error if the JSON is malformed.
pub fn parse_export(content: &str) -> Result<ArticyExport> {
    let export: ArticyExport = serde_json::from_str(content)?;
    Ok(export)
}

/// Read an export file and extract typed records in one step
pub fn read_records<P: AsRef<Path>>(path: P, schema: &ExportSchema) -> Result<Records> {
    let path = path.as_ref();
    let export = read_export(path)?;
    let records = extract_records(&export, schema)?;
    tracing::info!(
        "Read {}: {} labels, {} nodes, {} characters, {} variables",
        path.display(),
        records.labels.len(),
        records.nodes.len(),
        records.characters.len(),
        records.variables.len()
    );
    Ok(records)
}
