//! The compiled build plan handed to the bundling engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::declarations::EntryPoint;
use crate::dev::DevServerConfig;
use crate::error::{ConfigError, Result};
use crate::mode::Mode;
use crate::optimization::OptimizationSet;
use crate::output::OutputScheme;
use crate::plugins::Plugin;
use crate::rule::Rule;

/// Source map generation options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMapOptions {
    /// No source maps
    None,
    /// External .map files
    External,
}

impl SourceMapOptions {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Development => SourceMapOptions::External,
            Mode::Production => SourceMapOptions::None,
        }
    }
}

/// Fully resolved build description.
///
/// Compiling the same declarations under the same mode always yields an
/// equal plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPlan {
    pub mode: Mode,
    pub entries: Vec<EntryPoint>,
    pub output: OutputScheme,
    pub resolve_extensions: Vec<String>,
    pub rules: Vec<Rule>,
    pub optimization: OptimizationSet,
    pub plugins: Vec<Plugin>,
    pub source_maps: SourceMapOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServerConfig>,
}

impl BuildPlan {
    /// The first rule handling `path`, in declaration order.
    ///
    /// `None` means the engine passes the module through untouched.
    pub fn rule_for(&self, path: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    pub fn plugin(&self, name: &str) -> Option<&Plugin> {
        self.plugins.iter().find(|plugin| plugin.name == name)
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "plan".to_string(),
            hint: Some(e.to_string()),
        })
    }
}
