//! Error types for declaration loading and plan compilation.
//!
//! There is no error for an unresolvable mode: [`Mode::resolve`](crate::Mode::resolve)
//! always produces a mode, falling back to production.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Structural declaration errors
    #[error("no entry points declared")]
    NoEntries,

    #[error("entry point `{name}` declares no imports")]
    EmptyEntry { name: String },

    #[error(
        "rules `{first}` and `{second}` both match `{pattern}` with different stage chains"
    )]
    DuplicateRule {
        pattern: String,
        first: String,
        second: String,
    },

    #[error("rule `{rule}` has an invalid pattern `{pattern}`: {message}")]
    InvalidPattern {
        rule: String,
        pattern: String,
        message: String,
    },

    #[error(
        "filename pattern `{pattern}` resolves to `{name}` for both `{first}` and `{second}`"
    )]
    FilenameCollision {
        pattern: String,
        name: String,
        first: String,
        second: String,
    },

    #[error("invalid config value for `{field}`{}", hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    // Config loading errors
    #[error("config not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Whether this error comes from an invalid static declaration rather
    /// than from loading the declarations.
    pub fn is_declaration_error(&self) -> bool {
        matches!(
            self,
            ConfigError::NoEntries
                | ConfigError::EmptyEntry { .. }
                | ConfigError::DuplicateRule { .. }
                | ConfigError::InvalidPattern { .. }
                | ConfigError::FilenameCollision { .. }
        )
    }
}
