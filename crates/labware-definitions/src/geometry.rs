//! Well addressing and coordinates derived from an effective definition.
//!
//! Columns run along X and are named by letter; rows run along Y and are
//! numbered from 1. Wells are enumerated column-major.

use labware_common::constants::MAX_COLUMNS;
use labware_common::error::{LabwareError, Result};
use labware_common::types::WellPosition;
use serde::Serialize;

use crate::definition::ContainerDefinition;

/// Location of a well relative to the container corner, in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WellCoordinates {
    /// Well position.
    pub well: WellPosition,
    /// X coordinate of the well centre.
    pub x: f64,
    /// Y coordinate of the well centre.
    pub y: f64,
    /// Height of the well bottom, when `height` and `well_depth` are known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_z: Option<f64>,
}

impl ContainerDefinition {
    /// Total number of wells in the grid.
    #[must_use]
    pub fn well_count(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.cols)
    }

    /// Distance between adjacent rows, falling back to `spacing`.
    #[must_use]
    pub fn row_pitch(&self) -> Option<f64> {
        self.row_spacing.or(self.spacing)
    }

    /// Distance between adjacent columns, falling back to `spacing`.
    #[must_use]
    pub fn col_pitch(&self) -> Option<f64> {
        self.col_spacing.or(self.spacing)
    }

    /// Whether `well` lies inside the grid.
    #[must_use]
    pub const fn contains(&self, well: WellPosition) -> bool {
        well.col() < self.cols && well.row() < self.rows
    }

    /// Iterates every well, column by column.
    pub fn wells(&self) -> impl Iterator<Item = WellPosition> + '_ {
        (0..self.cols.min(MAX_COLUMNS)).flat_map(move |col| {
            (0..self.rows).filter_map(move |row| WellPosition::new(col, row).ok())
        })
    }

    /// Column-major index of `well`: all of column `A` first, then `B`.
    ///
    /// # Errors
    ///
    /// Returns [`LabwareError::NotFound`] if the well lies outside the grid.
    pub fn well_offset(&self, well: WellPosition) -> Result<u64> {
        self.check_contains(well)?;
        Ok(u64::from(well.col()) * u64::from(self.rows) + u64::from(well.row()))
    }

    /// Computes the centre coordinates of `well`.
    ///
    /// # Errors
    ///
    /// Returns [`LabwareError::NotFound`] if the well lies outside the grid,
    /// or [`LabwareError::Validation`] if an offset or pitch required for
    /// the computation is undefined.
    pub fn well_coordinates(&self, well: WellPosition) -> Result<WellCoordinates> {
        self.check_contains(well)?;

        let x = self.axis(well.col(), self.a1_x, "a1_x", self.col_pitch(), "col_spacing")?;
        let y = self.axis(well.row(), self.a1_y, "a1_y", self.row_pitch(), "row_spacing")?;
        let bottom_z = self
            .height
            .zip(self.well_depth)
            .map(|(height, depth)| height - depth);

        Ok(WellCoordinates {
            well,
            x,
            y,
            bottom_z,
        })
    }

    fn check_contains(&self, well: WellPosition) -> Result<()> {
        if self.contains(well) {
            return Ok(());
        }
        Err(LabwareError::NotFound {
            kind: "well",
            id: format!("{}:{well}", self.name),
        })
    }

    fn axis(
        &self,
        index: u32,
        origin: Option<f64>,
        origin_field: &'static str,
        pitch: Option<f64>,
        pitch_field: &'static str,
    ) -> Result<f64> {
        let undefined = |field: &'static str| LabwareError::Validation {
            name: self.name.to_string(),
            reason: format!("{field} is required to compute well coordinates"),
            fields: vec![(field, "undefined".into())],
        };
        let origin = origin.ok_or_else(|| undefined(origin_field))?;
        if index == 0 {
            return Ok(origin);
        }
        let pitch = pitch.ok_or_else(|| undefined(pitch_field))?;
        Ok(f64::from(index).mul_add(pitch, origin))
    }
}

#[cfg(test)]
mod tests {
    use labware_common::types::DefinitionName;

    use super::*;
    use crate::definition::{ContainerKind, DefinitionFields};

    fn plate(extra: DefinitionFields) -> ContainerDefinition {
        let base = DefinitionFields {
            kind: Some(ContainerKind::Microplate),
            rows: Some(12),
            cols: Some(8),
            a1_x: Some(14.38),
            a1_y: Some(11.24),
            spacing: Some(9.0),
            ..DefinitionFields::default()
        };
        let name = DefinitionName::parse("plate").expect("name");
        ContainerDefinition::from_fields(name, base.overlay(&extra)).expect("complete")
    }

    fn well(s: &str) -> WellPosition {
        s.parse().expect("valid well")
    }

    #[test]
    fn well_count_is_rows_times_cols() {
        assert_eq!(plate(DefinitionFields::default()).well_count(), 96);
    }

    #[test]
    fn wells_are_column_major_with_matching_offsets() {
        let def = plate(DefinitionFields::default());
        let wells: Vec<WellPosition> = def.wells().collect();
        assert_eq!(wells.len(), 96);
        assert_eq!(wells[0].to_string(), "A1");
        assert_eq!(wells[1].to_string(), "A2");
        assert_eq!(wells[12].to_string(), "B1");
        assert_eq!(wells[95].to_string(), "H12");
        for (n, w) in wells.iter().enumerate() {
            assert_eq!(def.well_offset(*w).expect("inside"), n as u64);
        }
    }

    #[test]
    fn contains_respects_grid_bounds() {
        let def = plate(DefinitionFields::default());
        assert!(def.contains(well("H12")));
        assert!(!def.contains(well("I1")));
        assert!(!def.contains(well("A13")));
    }

    #[test]
    fn coordinates_use_uniform_spacing() {
        let def = plate(DefinitionFields::default());
        let c = def.well_coordinates(well("C2")).expect("coordinates");
        assert!((c.x - 32.38).abs() < 1e-9, "x = {}", c.x);
        assert!((c.y - 20.24).abs() < 1e-9, "y = {}", c.y);
        assert_eq!(c.bottom_z, None);
    }

    #[test]
    fn coordinates_prefer_axis_spacing() {
        let def = plate(DefinitionFields {
            row_spacing: Some(13.0),
            height: Some(40.0),
            well_depth: Some(25.0),
            ..DefinitionFields::default()
        });
        let c = def.well_coordinates(well("A3")).expect("coordinates");
        assert!((c.x - 14.38).abs() < 1e-9);
        assert!((c.y - 37.24).abs() < 1e-9, "y = {}", c.y);
        assert_eq!(c.bottom_z, Some(15.0));
    }

    #[test]
    fn first_well_needs_no_pitch() {
        let mut def = plate(DefinitionFields::default());
        def.spacing = None;
        let c = def.well_coordinates(well("A1")).expect("coordinates");
        assert!((c.x - 14.38).abs() < 1e-9);
        let err = def.well_coordinates(well("B1")).unwrap_err();
        assert_eq!(err.offending_fields(), vec!["col_spacing"]);
    }

    #[test]
    fn coordinates_outside_grid_not_found() {
        let def = plate(DefinitionFields::default());
        let err = def.well_coordinates(well("Z1")).unwrap_err();
        assert!(matches!(err, LabwareError::NotFound { kind: "well", .. }));
        assert_eq!(err.to_string(), "well not found: plate:Z1");
    }

    #[test]
    fn missing_origin_is_reported() {
        let mut def = plate(DefinitionFields::default());
        def.a1_y = None;
        let err = def.well_coordinates(well("A1")).unwrap_err();
        assert_eq!(err.offending_fields(), vec!["a1_y"]);
    }
}
