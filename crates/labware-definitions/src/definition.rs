//! Container definition records.
//!
//! [`DefinitionFields`] is the partial field set a document declares at one
//! level of the subset tree. [`ContainerDefinition`] is the flat, effective
//! record produced once every ancestor level has been overlaid.

use std::fmt;

use labware_common::error::{LabwareError, Result};
use labware_common::types::DefinitionName;
use serde::{Deserialize, Serialize};

/// Kind of labware a definition describes.
///
/// The label set is open: unknown labels are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContainerKind {
    /// A plate with a regular grid of wells.
    Microplate,
    /// A rack holding pipette tips.
    Tiprack,
    /// A trough or reservoir.
    Reservoir,
    /// A rack holding individual tubes.
    Tuberack,
    /// A single addressable point.
    Point,
    /// Any other label.
    Other(String),
}

impl ContainerKind {
    /// Returns the label as written in definition files.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Microplate => "microplate",
            Self::Tiprack => "tiprack",
            Self::Reservoir => "reservoir",
            Self::Tuberack => "tuberack",
            Self::Point => "point",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for ContainerKind {
    fn from(label: String) -> Self {
        match label.as_str() {
            "microplate" => Self::Microplate,
            "tiprack" => Self::Tiprack,
            "reservoir" => Self::Reservoir,
            "tuberack" => Self::Tuberack,
            "point" => Self::Point,
            _ => Self::Other(label),
        }
    }
}

impl From<ContainerKind> for String {
    fn from(kind: ContainerKind) -> Self {
        match kind {
            ContainerKind::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields declared at a single level of a definition document.
///
/// Every field is optional; an absent field is inherited from the parent
/// level during resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefinitionFields {
    /// Labware kind (`type` in documents).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ContainerKind>,
    /// Number of well rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    /// Number of well columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cols: Option<u32>,
    /// X offset of well A1 from the container corner, in mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a1_x: Option<f64>,
    /// Y offset of well A1 from the container corner, in mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a1_y: Option<f64>,
    /// Uniform well pitch, in mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
    /// Pitch between rows, in mm. Takes precedence over `spacing`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_spacing: Option<f64>,
    /// Pitch between columns, in mm. Takes precedence over `spacing`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_spacing: Option<f64>,
    /// Well opening diameter, in mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<f64>,
    /// Outer height, in mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Outer length, in mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    /// Outer width, in mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Nominal well volume, in µL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    /// Minimum working volume, in µL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_vol: Option<f64>,
    /// Maximum working volume, in µL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_vol: Option<f64>,
    /// Well depth, in mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub well_depth: Option<f64>,
}

impl DefinitionFields {
    /// Returns `self` with every field set in `over` replaced by its value.
    ///
    /// Fields absent from `over` keep the value from `self`.
    #[must_use]
    pub fn overlay(&self, over: &Self) -> Self {
        Self {
            kind: over.kind.clone().or_else(|| self.kind.clone()),
            rows: over.rows.or(self.rows),
            cols: over.cols.or(self.cols),
            a1_x: over.a1_x.or(self.a1_x),
            a1_y: over.a1_y.or(self.a1_y),
            spacing: over.spacing.or(self.spacing),
            row_spacing: over.row_spacing.or(self.row_spacing),
            col_spacing: over.col_spacing.or(self.col_spacing),
            diameter: over.diameter.or(self.diameter),
            height: over.height.or(self.height),
            length: over.length.or(self.length),
            width: over.width.or(self.width),
            volume: over.volume.or(self.volume),
            min_vol: over.min_vol.or(self.min_vol),
            max_vol: over.max_vol.or(self.max_vol),
            well_depth: over.well_depth.or(self.well_depth),
        }
    }

    /// Whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Fully resolved definition for one hierarchical name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerDefinition {
    /// Hierarchical name this definition was resolved for.
    pub name: DefinitionName,
    /// Labware kind.
    #[serde(rename = "type")]
    pub kind: ContainerKind,
    /// Number of well rows.
    pub rows: u32,
    /// Number of well columns.
    pub cols: u32,
    /// X offset of well A1, in mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a1_x: Option<f64>,
    /// Y offset of well A1, in mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a1_y: Option<f64>,
    /// Uniform well pitch, in mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
    /// Pitch between rows, in mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_spacing: Option<f64>,
    /// Pitch between columns, in mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_spacing: Option<f64>,
    /// Well opening diameter, in mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<f64>,
    /// Outer height, in mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Outer length, in mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    /// Outer width, in mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Nominal well volume, in µL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    /// Minimum working volume, in µL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_vol: Option<f64>,
    /// Maximum working volume, in µL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_vol: Option<f64>,
    /// Well depth, in mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub well_depth: Option<f64>,
}

impl ContainerDefinition {
    /// Builds an effective definition from a fully overlaid field set.
    ///
    /// # Errors
    ///
    /// Returns [`LabwareError::Parse`] if `type`, `rows`, or `cols` is
    /// still missing after overlay.
    pub fn from_fields(name: DefinitionName, fields: DefinitionFields) -> Result<Self> {
        let missing = |field: &str| LabwareError::Parse {
            source_name: name.to_string(),
            message: format!("missing required field `{field}`"),
        };
        let kind = fields.kind.ok_or_else(|| missing("type"))?;
        let rows = fields.rows.ok_or_else(|| missing("rows"))?;
        let cols = fields.cols.ok_or_else(|| missing("cols"))?;

        Ok(Self {
            name,
            kind,
            rows,
            cols,
            a1_x: fields.a1_x,
            a1_y: fields.a1_y,
            spacing: fields.spacing,
            row_spacing: fields.row_spacing,
            col_spacing: fields.col_spacing,
            diameter: fields.diameter,
            height: fields.height,
            length: fields.length,
            width: fields.width,
            volume: fields.volume,
            min_vol: fields.min_vol,
            max_vol: fields.max_vol,
            well_depth: fields.well_depth,
        })
    }

    /// Returns the definition as a field set, dropping its name.
    #[must_use]
    pub fn to_fields(&self) -> DefinitionFields {
        DefinitionFields {
            kind: Some(self.kind.clone()),
            rows: Some(self.rows),
            cols: Some(self.cols),
            a1_x: self.a1_x,
            a1_y: self.a1_y,
            spacing: self.spacing,
            row_spacing: self.row_spacing,
            col_spacing: self.col_spacing,
            diameter: self.diameter,
            height: self.height,
            length: self.length,
            width: self.width,
            volume: self.volume,
            min_vol: self.min_vol,
            max_vol: self.max_vol,
            well_depth: self.well_depth,
        }
    }

    /// Every real-valued field with its document key.
    #[must_use]
    pub const fn measurements(&self) -> [(&'static str, Option<f64>); 13] {
        [
            ("a1_x", self.a1_x),
            ("a1_y", self.a1_y),
            ("spacing", self.spacing),
            ("row_spacing", self.row_spacing),
            ("col_spacing", self.col_spacing),
            ("diameter", self.diameter),
            ("height", self.height),
            ("length", self.length),
            ("width", self.width),
            ("volume", self.volume),
            ("min_vol", self.min_vol),
            ("max_vol", self.max_vol),
            ("well_depth", self.well_depth),
        ]
    }
}
