//! File-based declaration loading for CLI use.
//!
//! `kiln.toml` is layered over [`Declarations::default`] with figment, so a
//! file only needs the keys it changes. The build mode is never read from
//! the file.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};

use crate::declarations::Declarations;
use crate::error::{ConfigError, Result};

pub const CONFIG_FILE_NAME: &str = "kiln.toml";

/// Searches a root directory for `kiln.toml` and loads it.
///
/// # Example
///
/// ```no_run
/// use kiln_config::ConfigDiscovery;
///
/// let declarations = ConfigDiscovery::new(".").load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn find(&self) -> Option<PathBuf> {
        let path = self.root.join(CONFIG_FILE_NAME);
        path.is_file().then_some(path)
    }

    /// Load the discovered file, or the defaults when there is none.
    pub fn load(&self) -> Result<Declarations> {
        match self.find() {
            Some(path) => load_file(&path),
            None => {
                tracing::debug!(root = %self.root.display(), "no kiln.toml, using defaults");
                Ok(Declarations::default())
            }
        }
    }
}

/// Load declarations from an explicit file; a missing file is an error.
pub fn load_file(path: &Path) -> Result<Declarations> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    tracing::debug!(path = %path.display(), "loading declarations");

    Figment::new()
        .merge(Serialized::defaults(Declarations::default()))
        .merge(Toml::file(path))
        .extract()
        .map_err(|e| ConfigError::InvalidValue {
            field: path.display().to_string(),
            hint: Some(e.to_string()),
        })
}
