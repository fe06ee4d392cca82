//! CLI command definitions and dispatch.

pub mod check;
pub mod list;
pub mod show;
pub mod wells;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use labware_common::config::LabwareConfig;
use labware_definitions::ContainerRegistry;

/// labware — inspect and validate labware container definitions.
#[derive(Parser, Debug)]
#[command(name = "labware", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Path to a YAML loader configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Definition file or directory to load (repeatable). Overrides the
    /// configured search paths.
    #[arg(
        long = "path",
        global = true,
        env = labware_common::constants::PATH_ENV_VAR,
        value_delimiter = ':'
    )]
    pub paths: Vec<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve and validate every loaded definition.
    Check(check::CheckArgs),
    /// List every addressable definition name.
    List(list::ListArgs),
    /// Print the effective definition for a name.
    Show(show::ShowArgs),
    /// Print well names and coordinates for a definition.
    Wells(wells::WellsArgs),
}

/// Builds the loader configuration from the config file and CLI paths.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be loaded.
pub fn loader_config(cli: &Cli) -> anyhow::Result<LabwareConfig> {
    let mut config = match &cli.config {
        Some(path) => LabwareConfig::from_file(path)?,
        None => LabwareConfig::default(),
    };
    if !cli.paths.is_empty() {
        config.search_paths.clone_from(&cli.paths);
    }
    Ok(config)
}

/// Loads every definition reachable from the configured search paths.
///
/// # Errors
///
/// Returns an error if any definition fails to load.
pub fn load_registry(config: &LabwareConfig) -> anyhow::Result<ContainerRegistry> {
    tracing::debug!(paths = ?config.search_paths, "loading definitions");
    Ok(ContainerRegistry::load_all(config.search_paths.as_slice(), config)?)
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if loading or the command itself fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = loader_config(&cli)?;
    let registry = load_registry(&config)?;

    match cli.command {
        Command::Check(args) => check::execute(&args, &registry),
        Command::List(args) => list::execute(&args, &registry),
        Command::Show(args) => show::execute(&args, &registry),
        Command::Wells(args) => wells::execute(&args, &registry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_repeated_paths() {
        let cli = Cli::try_parse_from(["labware", "--path", "a", "--path", "b", "list"])
            .expect("should parse");
        assert_eq!(cli.paths, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert!(matches!(cli.command, Command::List(_)));
    }

    #[test]
    fn cli_paths_override_config_defaults() {
        let cli = Cli::try_parse_from(["labware", "list", "--path", "defs"]).expect("should parse");
        let config = loader_config(&cli).expect("config");
        assert_eq!(config.search_paths, vec![PathBuf::from("defs")]);
    }

    #[test]
    fn cli_without_paths_keeps_default_search_path() {
        let cli = Cli {
            command: Command::List(list::ListArgs::default()),
            config: None,
            paths: Vec::new(),
        };
        let config = loader_config(&cli).expect("config");
        assert_eq!(config, LabwareConfig::default());
    }

    #[test]
    fn cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["labware"]).is_err());
    }
}
