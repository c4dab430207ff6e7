//! Error types for `RenFlow`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `RenFlow` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output directory could not be created.
    #[error("could not create output directory {path}: {source}")]
    OutputDirFailed {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    // ==================== Parsing Errors ====================
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML config parsing error.
    #[error("config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// The export has no package to read models from.
    #[error("export contains no packages")]
    NoPackages,

    /// A model record is missing a field the converter needs.
    #[error("{model_type} {id}: missing required field '{field}'")]
    MissingField {
        /// The model type name as it appears in the export.
        model_type: String,
        /// The model id, or `<unknown>` when the id itself is missing.
        id: String,
        /// The missing field path.
        field: String,
    },

    // ==================== Graph Model Errors ====================
    /// Two records share the same id.
    #[error("duplicate id in graph: {id}")]
    DuplicateId {
        /// The repeated id.
        id: String,
    },

    /// The requested label does not exist.
    #[error("unknown label: {0}")]
    UnknownLabel(String),

    /// No label writes to the requested target file.
    #[error("no label targets file '{0}'")]
    UnknownTargetFile(String),

    // ==================== Ordering Errors ====================
    /// The local subgraph of a label has zero or several entry points.
    #[error("label {label}: ambiguous root (candidates: [{}])", candidates.join(", "))]
    AmbiguousRoot {
        /// The label being walked.
        label: String,
        /// Every vertex without an incoming edge.
        candidates: Vec<String>,
    },

    /// An edge or jump points at an id that is neither a node nor a label.
    #[error("label {label}: dangling reference from {from} to {target}")]
    DanglingReference {
        /// The label being walked.
        label: String,
        /// The node (or label) owning the edge.
        from: String,
        /// The missing target id.
        target: String,
    },

    /// The local subgraph of a label contains a cycle.
    #[error("label {label}: cycle detected through {node}")]
    CyclicSubgraph {
        /// The label being walked.
        label: String,
        /// A vertex that is part of the cycle.
        node: String,
    },

    /// A walk ended without visiting every reachable node exactly once.
    #[error("label {label}: walk visited {visited} of {expected} nodes")]
    IncompleteWalk {
        /// The label being walked.
        label: String,
        /// Number of nodes the walk yielded.
        visited: usize,
        /// Number of nodes reachable from the root.
        expected: usize,
    },

    // ==================== Output Errors ====================
    /// Unknown init file kind requested.
    #[error("unknown init kind '{0}' (expected 'character' or 'variable')")]
    InvalidInitKind(String),

    /// Project configuration is invalid.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Whether this error only invalidates a single label.
    ///
    /// Structural errors are isolated per label; everything else aborts the run.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::AmbiguousRoot { .. }
                | Error::DanglingReference { .. }
                | Error::CyclicSubgraph { .. }
                | Error::IncompleteWalk { .. }
        )
    }
}

/// A specialized Result type for `RenFlow` operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_root_message_lists_candidates() {
        let err = Error::AmbiguousRoot {
            label: "L1".to_string(),
            candidates: vec!["F1".to_string(), "F9".to_string()],
        };
        assert_eq!(err.to_string(), "label L1: ambiguous root (candidates: [F1, F9])");
        assert!(err.is_structural());
    }

    #[test]
    fn test_io_error_is_not_structural() {
        let err = Error::from(std::io::Error::other("disk full"));
        assert!(!err.is_structural());
    }
}
