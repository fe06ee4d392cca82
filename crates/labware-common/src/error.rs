//! Unified error types for the labware workspace.
//!
//! Loading, resolving, and validating container definitions all report
//! failures through [`LabwareError`]. The CLI wraps these at the binary
//! boundary and decides how to present them.

use std::fmt::Write as _;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum LabwareError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A definition document is malformed or misses required structure.
    #[error("parse error in {source_name}: {message}")]
    Parse {
        /// File path or logical name of the document being parsed.
        source_name: String,
        /// Description of the structural problem.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// A resolved definition violates a numeric or consistency invariant.
    #[error("invalid definition {name}: {reason}{}", render_fields(.fields))]
    Validation {
        /// Hierarchical name of the offending definition.
        name: String,
        /// The violated invariant.
        reason: String,
        /// Offending fields and their effective values.
        fields: Vec<(&'static str, String)>,
    },

    /// Two documents define the same root container.
    #[error("duplicate container definition: {name}")]
    DuplicateName {
        /// The root name defined more than once.
        name: String,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl LabwareError {
    /// Returns the names of the fields involved in a validation failure.
    ///
    /// Empty for every other variant.
    #[must_use]
    pub fn offending_fields(&self) -> Vec<&'static str> {
        match self {
            Self::Validation { fields, .. } => fields.iter().map(|(field, _)| *field).collect(),
            _ => Vec::new(),
        }
    }
}

fn render_fields(fields: &[(&'static str, String)]) -> String {
    if fields.is_empty() {
        return String::new();
    }
    let mut out = String::from(" (");
    for (i, (field, value)) in fields.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{field}={value}");
    }
    out.push(')');
    out
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, LabwareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_fields() {
        let err = LabwareError::Validation {
            name: "plate.deep".into(),
            reason: "min_vol must not exceed max_vol".into(),
            fields: vec![("min_vol", "50".into()), ("max_vol", "20".into())],
        };
        assert_eq!(
            err.to_string(),
            "invalid definition plate.deep: min_vol must not exceed max_vol (min_vol=50, max_vol=20)"
        );
        assert_eq!(err.offending_fields(), vec!["min_vol", "max_vol"]);
    }

    #[test]
    fn validation_message_without_fields() {
        let err = LabwareError::Validation {
            name: "plate".into(),
            reason: "grid has no wells".into(),
            fields: Vec::new(),
        };
        assert_eq!(err.to_string(), "invalid definition plate: grid has no wells");
    }

    #[test]
    fn not_found_message() {
        let err = LabwareError::NotFound {
            kind: "container",
            id: "plate.missing".into(),
        };
        assert_eq!(err.to_string(), "container not found: plate.missing");
        assert!(err.offending_fields().is_empty());
    }
}
