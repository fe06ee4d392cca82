//! Syntax tree for container definition documents.

use std::collections::BTreeMap;

use crate::definition::DefinitionFields;

/// Root node of a parsed definition document.
#[derive(Debug, Clone, Default)]
pub struct DefinitionDocument {
    /// Root container name (the file's base name).
    pub root_name: String,
    /// File path or logical name the document was read from.
    pub source_name: String,
    /// The root container level.
    pub root: DefinitionNode,
}

/// One level of the subset tree.
#[derive(Debug, Clone, Default)]
pub struct DefinitionNode {
    /// Fields declared at this level.
    pub fields: DefinitionFields,
    /// Nested subsets keyed by their local name.
    pub subsets: BTreeMap<String, DefinitionNode>,
}

impl DefinitionNode {
    /// Total number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.subsets.values().map(Self::node_count).sum::<usize>()
    }
}
