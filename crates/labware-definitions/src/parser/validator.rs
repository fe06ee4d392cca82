//! Structural validation of a parsed definition document.
//!
//! Checks that the root carries the fields every definition needs and that
//! every name in the subset tree is addressable, before the document is
//! added to a registry. Numeric invariants are checked per resolution in
//! [`crate::validation`].

use labware_common::constants::NAME_SEPARATOR;
use labware_common::error::{LabwareError, Result};

use super::ast::{DefinitionDocument, DefinitionNode};
use crate::definition::ContainerKind;

/// Validates a parsed definition document for structural correctness.
///
/// # Checks performed
///
/// 1. The root name is a single, non-empty name segment.
/// 2. The root declares `type`, `rows`, and `cols`.
/// 3. Every subset name is a single, non-empty name segment.
/// 4. No subset overrides `type` with a blank label.
///
/// # Errors
///
/// Returns [`LabwareError::Parse`] if any structural check fails.
pub fn validate(doc: &DefinitionDocument) -> Result<()> {
    check_segment(doc, &doc.root_name, "root container name")?;
    check_required_root_fields(doc)?;
    check_subset_names(doc, &doc.root, &doc.root_name)?;
    check_kinds(doc, &doc.root, &doc.root_name)?;
    Ok(())
}

fn parse_err(doc: &DefinitionDocument, message: String) -> LabwareError {
    LabwareError::Parse {
        source_name: doc.source_name.clone(),
        message,
    }
}

fn check_segment(doc: &DefinitionDocument, segment: &str, what: &str) -> Result<()> {
    if segment.is_empty() {
        return Err(parse_err(doc, format!("{what} must not be empty")));
    }
    if segment.contains(NAME_SEPARATOR) {
        return Err(parse_err(
            doc,
            format!("{what} \"{segment}\" must not contain '{NAME_SEPARATOR}'"),
        ));
    }
    Ok(())
}

fn check_required_root_fields(doc: &DefinitionDocument) -> Result<()> {
    let fields = &doc.root.fields;
    let missing: Vec<&str> = [
        ("type", fields.kind.as_ref().is_none_or(is_blank)),
        ("rows", fields.rows.is_none()),
        ("cols", fields.cols.is_none()),
    ]
    .into_iter()
    .filter_map(|(name, absent)| absent.then_some(name))
    .collect();

    if missing.is_empty() {
        return Ok(());
    }
    Err(parse_err(
        doc,
        format!(
            "root container \"{}\" is missing required field(s): {}",
            doc.root_name,
            missing.join(", ")
        ),
    ))
}

fn is_blank(kind: &ContainerKind) -> bool {
    kind.as_str().trim().is_empty()
}

fn check_kinds(doc: &DefinitionDocument, node: &DefinitionNode, path: &str) -> Result<()> {
    for (name, child) in &node.subsets {
        let child_path = format!("{path}{NAME_SEPARATOR}{name}");
        if child.fields.kind.as_ref().is_some_and(is_blank) {
            return Err(parse_err(doc, format!("in `{child_path}`: type must not be blank")));
        }
        check_kinds(doc, child, &child_path)?;
    }
    Ok(())
}

fn check_subset_names(doc: &DefinitionDocument, node: &DefinitionNode, path: &str) -> Result<()> {
    for (name, child) in &node.subsets {
        check_segment(doc, name, &format!("subset name under `{path}`"))?;
        check_subset_names(doc, child, &format!("{path}{NAME_SEPARATOR}{name}"))?;
    }
    Ok(())
}
