//! Declaration loading shared by all commands.

use kiln_config::{ConfigDiscovery, Declarations, load_file};

use crate::cli::SourceArgs;
use crate::error::Result;
use crate::ui;

/// Load declarations from `--config`, else from `<root>/kiln.toml`, else
/// fall back to the built-in defaults.
pub fn load_declarations(source: &SourceArgs) -> Result<Declarations> {
    if let Some(path) = &source.config {
        tracing::debug!(path = %path.display(), "using explicit config");
        return Ok(load_file(path)?);
    }

    let discovery = ConfigDiscovery::new(&source.root);
    if discovery.find().is_none() {
        ui::warning("No kiln.toml found, using built-in declarations");
    }
    Ok(discovery.load()?)
}
