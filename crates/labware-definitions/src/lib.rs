//! # labware-definitions
//!
//! Loader for labware container definition files.
//!
//! Handles:
//! - **Parser**: YAML decoding and structural checks of definition documents.
//! - **Definition**: Partial field sets and the overlay that merges them.
//! - **Registry**: Arena of definition trees, addressed by dot-joined names.
//! - **Validation**: Numeric invariants of every resolved definition.
//! - **Geometry**: Well enumeration and coordinates.

pub mod definition;
pub mod geometry;
pub mod parser;
pub mod registry;
pub mod validation;

use std::path::Path;

use labware_common::error::Result;

pub use crate::definition::{ContainerDefinition, ContainerKind, DefinitionFields};
pub use crate::registry::ContainerRegistry;

/// Loads one definition file into a new registry.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is malformed.
pub fn load(path: impl AsRef<Path>) -> Result<ContainerRegistry> {
    ContainerRegistry::load(path.as_ref())
}
