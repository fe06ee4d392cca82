//! `labware show` — Print the effective definition for a name.

use clap::{Args, ValueEnum};
use labware_definitions::ContainerRegistry;

/// Output encoding for `show`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// YAML, matching the definition file syntax.
    #[default]
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

/// Arguments for the `show` command.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Hierarchical definition name, e.g. `example_plate.deepwell`.
    pub name: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Yaml)]
    pub format: Format,
}

/// Executes the `show` command.
///
/// # Errors
///
/// Returns an error if the name cannot be resolved or serialized.
pub fn execute(args: &ShowArgs, registry: &ContainerRegistry) -> anyhow::Result<()> {
    print!("{}", render(args, registry)?);
    Ok(())
}

fn render(args: &ShowArgs, registry: &ContainerRegistry) -> anyhow::Result<String> {
    let definition = registry.resolve(&args.name)?;
    tracing::info!(name = %definition.name, "showing definition");
    Ok(match args.format {
        Format::Yaml => serde_yaml::to_string(&definition)?,
        Format::Json => format!("{}\n", serde_json::to_string_pretty(&definition)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ContainerRegistry {
        ContainerRegistry::from_yaml_str(
            "plate",
            "type: microplate\nrows: 12\ncols: 8\nwell_depth: 10\nsubsets:\n  deep:\n    well_depth: 15\n",
        )
        .expect("load")
    }

    #[test]
    fn show_yaml_contains_effective_fields() {
        let args = ShowArgs {
            name: "plate.deep".into(),
            format: Format::Yaml,
        };
        let out = render(&args, &registry()).expect("render");
        assert!(out.contains("name: plate.deep"), "got: {out}");
        assert!(out.contains("rows: 12"), "got: {out}");
        assert!(out.contains("well_depth: 15"), "got: {out}");
    }

    #[test]
    fn show_json_is_parseable() {
        let args = ShowArgs {
            name: "plate.deep".into(),
            format: Format::Json,
        };
        let out = render(&args, &registry()).expect("render");
        let value: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(value["type"], "microplate");
        assert_eq!(value["well_depth"], 15.0);
    }

    #[test]
    fn show_unknown_name_fails() {
        let args = ShowArgs {
            name: "plate.missing".into(),
            format: Format::Yaml,
        };
        let err = render(&args, &registry()).unwrap_err();
        assert!(err.to_string().contains("not found"), "got: {err}");
    }
}
