//! In-memory registry of loaded definition trees.
//!
//! Every document is flattened into an arena of nodes; a node owns the
//! fields it declares and the indices of its direct subsets. Resolution
//! walks from a root down to the requested name, overlaying fields level
//! by level, then validates the result.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use labware_common::config::LabwareConfig;
use labware_common::error::{LabwareError, Result};
use labware_common::types::DefinitionName;

use crate::definition::{ContainerDefinition, DefinitionFields};
use crate::parser::{self, ast::DefinitionDocument, ast::DefinitionNode};
use crate::validation;

#[derive(Debug)]
struct Node {
    name: DefinitionName,
    fields: DefinitionFields,
    children: BTreeMap<String, usize>,
}

/// Immutable collection of container definitions addressable by name.
#[derive(Debug, Default)]
pub struct ContainerRegistry {
    nodes: Vec<Node>,
    roots: BTreeMap<String, usize>,
    sources: BTreeMap<String, String>,
}

impl ContainerRegistry {
    /// Loads a single definition file.
    ///
    /// The file's base name, without extension, names the root container.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let mut registry = Self::default();
        registry.add_file(path)?;
        Ok(registry)
    }

    /// Loads every definition found under `paths`.
    ///
    /// Files are loaded as given. Directories are scanned (not recursively)
    /// for files whose extension is listed in `config`, in name order.
    /// Paths that do not exist are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if a path cannot be read, a document is malformed,
    /// or two documents define the same root container.
    pub fn load_all<P: AsRef<Path>>(paths: &[P], config: &LabwareConfig) -> Result<Self> {
        let mut registry = Self::default();
        for path in paths {
            let path = path.as_ref();
            if !path.exists() {
                tracing::warn!(path = %path.display(), "definition path does not exist, skipping");
                continue;
            }
            if path.is_dir() {
                for file in definition_files(path, config)? {
                    registry.add_file(&file)?;
                }
            } else {
                registry.add_file(path)?;
            }
        }
        tracing::info!(
            roots = registry.roots.len(),
            definitions = registry.nodes.len(),
            "definitions loaded"
        );
        Ok(registry)
    }

    /// Builds a registry from in-memory text, using `root_name` as the
    /// root container's name.
    ///
    /// # Errors
    ///
    /// Returns [`LabwareError::Parse`] if the text is malformed.
    pub fn from_yaml_str(root_name: &str, input: &str) -> Result<Self> {
        let mut registry = Self::default();
        registry.add_document(parser::parse_document(root_name, root_name, input)?)?;
        Ok(registry)
    }

    fn add_file(&mut self, path: &Path) -> Result<()> {
        let root_name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| LabwareError::Parse {
                source_name: path.display().to_string(),
                message: "file name is not valid UTF-8 or has no stem".into(),
            })?;
        let input = std::fs::read_to_string(path).map_err(|source| LabwareError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(path = %path.display(), root = root_name, "loading definition file");
        let doc = parser::parse_document(root_name, &path.display().to_string(), &input)?;
        self.add_document(doc)
    }

    fn add_document(&mut self, doc: DefinitionDocument) -> Result<()> {
        if self.roots.contains_key(&doc.root_name) {
            return Err(LabwareError::DuplicateName {
                name: doc.root_name,
            });
        }
        let name = DefinitionName::parse(doc.root_name.as_str())?;
        let index = self.insert_node(name, doc.root);
        let _ = self.sources.insert(doc.root_name.clone(), doc.source_name);
        let _ = self.roots.insert(doc.root_name, index);
        Ok(())
    }

    fn insert_node(&mut self, name: DefinitionName, node: DefinitionNode) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Node {
            name: name.clone(),
            fields: node.fields,
            children: BTreeMap::new(),
        });
        for (segment, child) in node.subsets {
            let child_index = self.insert_node(name.child(&segment), child);
            let _ = self.nodes[index].children.insert(segment, child_index);
        }
        index
    }

    /// Walks `name` from its root, returning the node index of every level.
    fn path_to(&self, name: &str) -> Result<Vec<usize>> {
        let not_found = || LabwareError::NotFound {
            kind: "container",
            id: name.to_string(),
        };
        let parsed = DefinitionName::parse(name).map_err(|_| not_found())?;

        let mut segments = parsed.segments();
        let root = segments.next().ok_or_else(not_found)?;
        let mut current = *self.roots.get(root).ok_or_else(not_found)?;
        let mut path = vec![current];
        for segment in segments {
            current = *self.nodes[current]
                .children
                .get(segment)
                .ok_or_else(not_found)?;
            path.push(current);
        }
        Ok(path)
    }

    /// Returns the effective field set of `name` without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`LabwareError::NotFound`] if any segment of `name` is absent.
    pub fn effective_fields(&self, name: &str) -> Result<DefinitionFields> {
        Ok(self.overlay_path(&self.path_to(name)?))
    }

    fn overlay_path(&self, path: &[usize]) -> DefinitionFields {
        path.iter()
            .fold(DefinitionFields::default(), |acc, &index| {
                acc.overlay(&self.nodes[index].fields)
            })
    }

    /// Returns only the fields declared at the level named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`LabwareError::NotFound`] if any segment of `name` is absent.
    pub fn declared_fields(&self, name: &str) -> Result<&DefinitionFields> {
        let path = self.path_to(name)?;
        let last = path.last().copied().unwrap_or_default();
        Ok(&self.nodes[last].fields)
    }

    /// Resolves `name` into a validated effective definition.
    ///
    /// # Errors
    ///
    /// Returns [`LabwareError::NotFound`] if any segment of `name` is absent
    /// and [`LabwareError::Validation`] if the effective definition breaks
    /// an invariant.
    pub fn resolve(&self, name: &str) -> Result<ContainerDefinition> {
        let path = self.path_to(name)?;
        let leaf = path.last().copied().unwrap_or_default();
        let fields = self.overlay_path(&path);
        let definition = ContainerDefinition::from_fields(self.nodes[leaf].name.clone(), fields)?;
        validation::validate(&definition)?;
        tracing::debug!(name, depth = path.len() - 1, "resolved definition");
        Ok(definition)
    }

    /// Resolves every name in the registry, in [`names`](Self::names) order.
    pub fn resolve_all(&self) -> Vec<(DefinitionName, Result<ContainerDefinition>)> {
        self.names()
            .map(|name| (name.clone(), self.resolve(name.as_str())))
            .collect()
    }

    /// Iterates every addressable name, each root followed by its subsets
    /// depth-first.
    pub fn names(&self) -> impl Iterator<Item = &DefinitionName> + '_ {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<usize> = self.roots.values().rev().copied().collect();
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            order.push(&node.name);
            stack.extend(node.children.values().rev().copied());
        }
        order.into_iter()
    }

    /// Names of the loaded root containers.
    pub fn roots(&self) -> impl Iterator<Item = &str> + '_ {
        self.roots.keys().map(String::as_str)
    }

    /// File path or logical name a root container was loaded from.
    #[must_use]
    pub fn source_of(&self, root: &str) -> Option<&str> {
        self.sources.get(root).map(String::as_str)
    }

    /// Whether `name` addresses a definition in this registry.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.path_to(name).is_ok()
    }

    /// Number of addressable definitions, subsets included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no definition has been loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn definition_files(dir: &Path, config: &LabwareConfig) -> Result<Vec<PathBuf>> {
    let io_err = |source: std::io::Error| LabwareError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && config.matches_extension(&path) {
            files.push(path);
        } else {
            tracing::debug!(path = %path.display(), "skipping non-definition entry");
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLATE: &str = "
type: microplate
rows: 12
cols: 8
spacing: 9
well_depth: 10
min_vol: 10
max_vol: 200
subsets:
  deepwell:
    well_depth: 15
    row_spacing: 13
    subsets:
      red:
        well_depth: 25
      broken:
        max_vol: 5
  shallow:
    well_depth: 3
";

    fn registry() -> ContainerRegistry {
        ContainerRegistry::from_yaml_str("plate", PLATE).expect("should load")
    }

    #[test]
    fn resolve_root_matches_declared_fields() {
        let reg = registry();
        let def = reg.resolve("plate").expect("root");
        assert_eq!(&def.to_fields(), reg.declared_fields("plate").expect("declared"));
    }

    #[test]
    fn resolve_overlays_each_level() {
        let reg = registry();
        let red = reg.resolve("plate.deepwell.red").expect("red");
        assert_eq!(red.well_depth, Some(25.0));
        assert_eq!(red.row_spacing, Some(13.0));
        assert_eq!(red.rows, 12);
        assert_eq!(red.name.as_str(), "plate.deepwell.red");
    }

    #[test]
    fn resolve_validates_subsets() {
        let reg = registry();
        let err = reg.resolve("plate.deepwell.broken").unwrap_err();
        assert_eq!(err.offending_fields(), vec!["min_vol", "max_vol"]);
        assert!(reg.effective_fields("plate.deepwell.broken").is_ok());
    }

    #[test]
    fn resolve_unknown_segment_not_found() {
        let reg = registry();
        for name in ["plate.missing", "other", "plate.deepwell.red.x", "plate..red", ""] {
            let err = reg.resolve(name).unwrap_err();
            assert!(
                matches!(err, LabwareError::NotFound { kind: "container", .. }),
                "{name}: {err}"
            );
        }
    }

    #[test]
    fn names_are_depth_first() {
        let reg = registry();
        let names: Vec<&str> = reg.names().map(DefinitionName::as_str).collect();
        assert_eq!(
            names,
            vec![
                "plate",
                "plate.deepwell",
                "plate.deepwell.broken",
                "plate.deepwell.red",
                "plate.shallow",
            ]
        );
        assert_eq!(reg.len(), 5);
        assert!(reg.contains("plate.shallow"));
        assert!(!reg.contains("plate.deep"));
    }

    #[test]
    fn resolve_all_reports_each_name() {
        let reg = registry();
        let outcomes = reg.resolve_all();
        assert_eq!(outcomes.len(), 5);
        let failed: Vec<&str> = outcomes
            .iter()
            .filter(|(_, result)| result.is_err())
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(failed, vec!["plate.deepwell.broken"]);
    }

    #[test]
    fn duplicate_roots_are_rejected() {
        let mut reg = registry();
        let doc = parser::parse_document("plate", "again.yml", PLATE).expect("parse");
        let err = reg.add_document(doc).unwrap_err();
        assert!(matches!(err, LabwareError::DuplicateName { ref name } if name == "plate"));
    }

    #[test]
    fn registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ContainerRegistry>();

        let reg = std::sync::Arc::new(registry());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let reg = std::sync::Arc::clone(&reg);
                std::thread::spawn(move || reg.resolve("plate.deepwell.red").map(|d| d.rows))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("thread").expect("resolve"), 12);
        }
    }

    #[test]
    fn blank_type_is_rejected_at_load() {
        let err = ContainerRegistry::from_yaml_str("p", "type: ''\nrows: 1\ncols: 1\n").unwrap_err();
        assert!(matches!(err, LabwareError::Parse { .. }), "got: {err}");
    }

    #[test]
    fn numeric_subset_name_is_addressable() {
        let reg = ContainerRegistry::from_yaml_str(
            "plate",
            "type: microplate\nrows: 12\ncols: 8\nsubsets:\n  384:\n    rows: 24\n",
        )
        .expect("load");
        let def = reg.resolve("plate.384").expect("resolve");
        assert_eq!((def.rows, def.cols), (24, 8));
    }

    #[test]
    fn load_all_skips_missing_paths() {
        let reg = ContainerRegistry::load_all(&[Path::new("/nonexistent/definitions")], &LabwareConfig::default())
            .expect("load");
        assert!(reg.is_empty());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = ContainerRegistry::load(Path::new("/nonexistent/plate.yml")).unwrap_err();
        assert!(matches!(err, LabwareError::Io { .. }));
    }
}
