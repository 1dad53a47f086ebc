//! Error handling for the Kiln CLI.
//!
//! Commands return [`CliError`]; `main` converts it into a miette report
//! with a hint pointing at the declaration to fix.

use kiln_config::ConfigError;
use miette::Report;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Declarations failed to load or compile
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Plan serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convert a CLI error into a miette report.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        other => miette::miette!("{}", other),
    }
}

fn config_error_to_miette(err: ConfigError) -> Report {
    let help = match &err {
        ConfigError::NoEntries => "Declare at least one [[entries]] table in kiln.toml".to_string(),
        ConfigError::EmptyEntry { name } => {
            format!("Add at least one module to `imports` of entry `{name}`")
        }
        ConfigError::DuplicateRule { first, second, .. } => {
            format!("Remove `{second}` or give it a pattern distinct from `{first}`")
        }
        ConfigError::InvalidPattern { rule, .. } => {
            format!("Fix the regular expression of rule `{rule}`")
        }
        ConfigError::FilenameCollision { pattern, .. } => {
            format!("Include [name] in `{pattern}` or rename one of the entries")
        }
        ConfigError::NotFound(_) => "Pass an existing file to --config".to_string(),
        ConfigError::InvalidValue { .. } | ConfigError::Io(_) => {
            return miette::miette!("Configuration error: {}", err);
        }
    };
    miette::miette!(help = help, "Configuration error: {}", err)
}
