//! Numeric and consistency invariants of effective definitions.
//!
//! Applied to every resolved definition, not only roots: a subset override
//! can make an otherwise valid parent inconsistent.

use labware_common::constants::MAX_COLUMNS;
use labware_common::error::{LabwareError, Result};

use crate::definition::ContainerDefinition;

/// Fields that must be zero or greater when present.
const NON_NEGATIVE: &[&str] = &["a1_x", "a1_y", "volume", "min_vol", "max_vol", "well_depth"];

/// Fields that must be strictly greater than zero when present.
const POSITIVE: &[&str] = &[
    "spacing",
    "row_spacing",
    "col_spacing",
    "diameter",
    "height",
    "length",
    "width",
];

/// Validates an effective definition.
///
/// # Checks performed
///
/// 1. `rows` and `cols` are positive (the grid has at least one well).
/// 2. `cols` fits the single-letter column naming scheme.
/// 3. Every real-valued field is finite.
/// 4. Offsets, depths, and volumes are non-negative.
/// 5. Pitches, diameter, and outer dimensions are positive.
/// 6. `min_vol <= max_vol <= volume` for whichever of them are present.
///
/// # Errors
///
/// Returns [`LabwareError::Validation`] naming the first violated
/// invariant and the fields involved.
pub fn validate(def: &ContainerDefinition) -> Result<()> {
    tracing::trace!(name = %def.name, "validating definition");
    check_grid(def)?;
    check_finite(def)?;
    check_signs(def)?;
    check_volumes(def)?;
    Ok(())
}

fn violation(def: &ContainerDefinition, reason: &str, fields: Vec<(&'static str, String)>) -> LabwareError {
    LabwareError::Validation {
        name: def.name.to_string(),
        reason: reason.to_string(),
        fields,
    }
}

fn check_grid(def: &ContainerDefinition) -> Result<()> {
    if def.rows == 0 || def.cols == 0 {
        let mut fields = Vec::new();
        if def.rows == 0 {
            fields.push(("rows", def.rows.to_string()));
        }
        if def.cols == 0 {
            fields.push(("cols", def.cols.to_string()));
        }
        return Err(violation(def, "rows and cols must be positive", fields));
    }
    if def.cols > MAX_COLUMNS {
        return Err(violation(
            def,
            &format!("cols must not exceed {MAX_COLUMNS} (wells are named A-Z)"),
            vec![("cols", def.cols.to_string())],
        ));
    }
    Ok(())
}

fn check_finite(def: &ContainerDefinition) -> Result<()> {
    for (field, value) in def.measurements() {
        if let Some(v) = value.filter(|v| !v.is_finite()) {
            return Err(violation(def, "value must be finite", vec![(field, v.to_string())]));
        }
    }
    Ok(())
}

fn check_signs(def: &ContainerDefinition) -> Result<()> {
    for (field, value) in def.measurements() {
        let Some(v) = value else { continue };
        if NON_NEGATIVE.contains(&field) && v < 0.0 {
            return Err(violation(def, "value must not be negative", vec![(field, v.to_string())]));
        }
        if POSITIVE.contains(&field) && v <= 0.0 {
            return Err(violation(def, "value must be positive", vec![(field, v.to_string())]));
        }
    }
    Ok(())
}

fn check_volumes(def: &ContainerDefinition) -> Result<()> {
    let ordered = [
        ("min_vol", def.min_vol, "max_vol", def.max_vol),
        ("max_vol", def.max_vol, "volume", def.volume),
        ("min_vol", def.min_vol, "volume", def.volume),
    ];
    for (low_name, low, high_name, high) in ordered {
        let (Some(low), Some(high)) = (low, high) else {
            continue;
        };
        if low > high {
            return Err(violation(
                def,
                &format!("{low_name} must not exceed {high_name}"),
                vec![(low_name, low.to_string()), (high_name, high.to_string())],
            ));
        }
    }
    Ok(())
}
