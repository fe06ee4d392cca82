//! Loader configuration model.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LabwareError, Result};

/// Root configuration for definition loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabwareConfig {
    /// Files or directories scanned for definition documents.
    pub search_paths: Vec<PathBuf>,
    /// File extensions (without the leading dot) treated as definitions.
    pub extensions: Vec<String>,
}

impl Default for LabwareConfig {
    fn default() -> Self {
        Self {
            search_paths: vec![PathBuf::from(crate::constants::DEFAULT_DEFINITIONS_DIR)],
            extensions: crate::constants::DEFINITION_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
        }
    }
}

impl LabwareConfig {
    /// Reads a configuration from a YAML file.
    ///
    /// Missing keys fall back to their defaults. Extensions are normalised
    /// to lowercase without a leading dot.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML, or
    /// leaves no usable extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| LabwareError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&text).map_err(|e| LabwareError::Config {
            message: format!("{}: {e}", path.display()),
        })?;
        config.normalized()
    }

    /// Returns a copy with cleaned-up extensions.
    ///
    /// # Errors
    ///
    /// Returns [`LabwareError::Config`] if no extension remains.
    pub fn normalized(mut self) -> Result<Self> {
        let mut extensions: Vec<String> = self
            .extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        extensions.sort();
        extensions.dedup();

        if extensions.is_empty() {
            return Err(LabwareError::Config {
                message: "at least one definition file extension must be configured".into(),
            });
        }
        self.extensions = extensions;
        Ok(self)
    }

    /// Whether `path` carries one of the configured extensions.
    #[must_use]
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions.iter().any(|e| *e == ext)
            })
    }
}
