//! Definition document parser built on `serde_yaml`.
//!
//! Transforms raw YAML text into a checked [`DefinitionDocument`] through
//! decoding, tree construction, and structural validation phases.

pub mod ast;
pub mod validator;

use std::collections::BTreeMap;

use labware_common::constants::NAME_SEPARATOR;
use labware_common::error::{LabwareError, Result};
use serde_yaml::{Mapping, Value};

use self::ast::{DefinitionDocument, DefinitionNode};
use crate::definition::DefinitionFields;

const SUBSETS_KEY: &str = "subsets";

/// Position in the document used to prefix error messages.
struct NodeContext<'a> {
    source_name: &'a str,
    path: String,
}

impl NodeContext<'_> {
    fn error(&self, message: impl std::fmt::Display) -> LabwareError {
        LabwareError::Parse {
            source_name: self.source_name.to_string(),
            message: format!("in `{}`: {message}", self.path),
        }
    }

    fn child(&self, segment: &str) -> Self {
        Self {
            source_name: self.source_name,
            path: format!("{}{NAME_SEPARATOR}{segment}", self.path),
        }
    }
}

/// Parses a definition document from its source text.
///
/// `root_name` is the canonical name of the root container and
/// `source_name` identifies the document in error messages.
///
/// # Errors
///
/// Returns [`LabwareError::Parse`] if the text is not valid YAML, has
/// fields of the wrong type, uses unknown keys, or fails structural
/// validation.
pub fn parse_document(root_name: &str, source_name: &str, input: &str) -> Result<DefinitionDocument> {
    tracing::debug!(root = root_name, source = source_name, "parsing definition document");
    let value: Value = serde_yaml::from_str(input).map_err(|e| LabwareError::Parse {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })?;

    let ctx = NodeContext {
        source_name,
        path: root_name.to_string(),
    };
    if value.is_null() {
        return Err(ctx.error("document is empty"));
    }

    let doc = DefinitionDocument {
        root_name: root_name.to_string(),
        source_name: source_name.to_string(),
        root: parse_node(&ctx, value)?,
    };
    validator::validate(&doc)?;
    Ok(doc)
}

fn parse_node(ctx: &NodeContext<'_>, value: Value) -> Result<DefinitionNode> {
    let mut map = match value {
        Value::Mapping(map) => map,
        // A bare `name:` subset entry inherits everything from its parent.
        Value::Null => Mapping::new(),
        other => {
            return Err(ctx.error(format!("expected a mapping, found {}", describe(&other))));
        }
    };

    let subsets = match map.remove(SUBSETS_KEY) {
        Some(value) => parse_subsets(ctx, value)?,
        None => BTreeMap::new(),
    };

    let fields: DefinitionFields =
        serde_yaml::from_value(Value::Mapping(map)).map_err(|e| ctx.error(e))?;

    Ok(DefinitionNode { fields, subsets })
}

fn parse_subsets(ctx: &NodeContext<'_>, value: Value) -> Result<BTreeMap<String, DefinitionNode>> {
    let map = match value {
        Value::Mapping(map) => map,
        Value::Null => return Ok(BTreeMap::new()),
        other => {
            return Err(ctx.error(format!(
                "`{SUBSETS_KEY}` must be a mapping, found {}",
                describe(&other)
            )));
        }
    };

    let mut subsets = BTreeMap::new();
    for (key, value) in map {
        let name = match key {
            Value::String(name) => name,
            // Unquoted variant names such as `384:` decode as numbers.
            Value::Number(number) => number.to_string(),
            other => {
                return Err(ctx.error(format!(
                    "subset names must be strings, found {}",
                    describe(&other)
                )));
            }
        };
        let node = parse_node(&ctx.child(&name), value)?;
        if subsets.insert(name.clone(), node).is_some() {
            return Err(ctx.error(format!("duplicate subset name: \"{name}\"")));
        }
    }
    Ok(subsets)
}

const fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
