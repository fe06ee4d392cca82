//! `labware wells` — Print well names and coordinates for a definition.

use clap::Args;
use labware_common::types::WellPosition;
use labware_definitions::geometry::WellCoordinates;
use labware_definitions::{ContainerDefinition, ContainerRegistry};

use crate::output::format_mm;

/// Arguments for the `wells` command.
#[derive(Args, Debug)]
pub struct WellsArgs {
    /// Hierarchical definition name, e.g. `example_plate.deepwell`.
    pub name: String,

    /// Only print this well (e.g. `B4`).
    #[arg(short, long)]
    pub well: Option<WellPosition>,
}

/// Executes the `wells` command.
///
/// # Errors
///
/// Returns an error if the name cannot be resolved, the well lies outside
/// the grid, or the definition lacks the offsets needed for coordinates.
pub fn execute(args: &WellsArgs, registry: &ContainerRegistry) -> anyhow::Result<()> {
    let definition = registry.resolve(&args.name)?;
    if let Some(well) = args.well {
        let _ = definition.well_coordinates(well)?;
    }

    println!("{:<6} {:>6} {:>10} {:>10} {:>10}", "WELL", "INDEX", "X", "Y", "BOTTOM");
    for row in coordinates(&definition, args.well) {
        let (offset, c) = row?;
        println!(
            "{:<6} {:>6} {:>10} {:>10} {:>10}",
            c.well.to_string(),
            offset,
            format_mm(Some(c.x)),
            format_mm(Some(c.y)),
            format_mm(c.bottom_z)
        );
    }
    Ok(())
}

/// Lazily yields the offset and coordinates of each requested well.
fn coordinates(
    definition: &ContainerDefinition,
    only: Option<WellPosition>,
) -> impl Iterator<Item = anyhow::Result<(u64, WellCoordinates)>> + '_ {
    let wells: Box<dyn Iterator<Item = WellPosition> + '_> = match only {
        Some(well) => Box::new(std::iter::once(well)),
        None => Box::new(definition.wells()),
    };
    wells.map(move |well| -> anyhow::Result<(u64, WellCoordinates)> {
        Ok((definition.well_offset(well)?, definition.well_coordinates(well)?))
    })
}
