//! `labware check` — Resolve and validate every loaded definition.

use clap::Args;
use labware_definitions::ContainerRegistry;

/// Arguments for the `check` command.
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Only report definitions that fail.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Executes the `check` command.
///
/// Resolves every name in the registry, printing one line per name.
///
/// # Errors
///
/// Returns an error if any definition fails to resolve or validate.
pub fn execute(args: &CheckArgs, registry: &ContainerRegistry) -> anyhow::Result<()> {
    let outcomes = registry.resolve_all();
    let mut failures = 0_usize;

    for (name, outcome) in &outcomes {
        match outcome {
            Ok(def) => {
                if !args.quiet {
                    println!("  ok    {name} ({} wells)", def.well_count());
                }
            }
            Err(e) => {
                failures += 1;
                println!("  FAIL  {name}: {e}");
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} definition(s) failed validation", outcomes.len());
    }
    if !args.quiet {
        println!();
        println!("  {} definition(s) valid.", outcomes.len());
    }
    Ok(())
}
