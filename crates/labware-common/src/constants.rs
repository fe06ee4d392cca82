//! System-wide constants and default paths.

/// Directory searched for definitions when nothing else is configured.
pub const DEFAULT_DEFINITIONS_DIR: &str = "definitions";

/// File extensions recognised as container definition documents.
pub const DEFINITION_EXTENSIONS: &[&str] = &["yml", "yaml"];

/// Separator between segments of a hierarchical definition name.
pub const NAME_SEPARATOR: char = '.';

/// Highest column count addressable with single-letter well names (`A`-`Z`).
pub const MAX_COLUMNS: u32 = 26;

/// Environment variable holding extra definition search paths.
pub const PATH_ENV_VAR: &str = "LABWARE_PATH";

/// Application name used in CLI output.
pub const APP_NAME: &str = "labware";
