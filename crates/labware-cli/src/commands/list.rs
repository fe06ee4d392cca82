//! `labware list` — List every addressable definition name.

use clap::Args;
use labware_definitions::ContainerRegistry;

/// Arguments for the `list` command.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Show the file each root container was loaded from.
    #[arg(short, long)]
    pub sources: bool,
}

/// Executes the `list` command.
///
/// # Errors
///
/// This command does not fail once the registry is loaded.
pub fn execute(args: &ListArgs, registry: &ContainerRegistry) -> anyhow::Result<()> {
    if registry.is_empty() {
        println!("No definitions found.");
        return Ok(());
    }

    for line in render(args, registry) {
        println!("{line}");
    }
    Ok(())
}

/// One line per name, indented by nesting depth.
fn render(args: &ListArgs, registry: &ContainerRegistry) -> Vec<String> {
    registry
        .names()
        .map(|name| {
            let indent = "  ".repeat(name.depth());
            match registry.source_of(name.as_str()).filter(|_| args.sources) {
                Some(source) => format!("{indent}{name}  ({source})"),
                None => format!("{indent}{name}"),
            }
        })
        .collect()
}
