//! Stage references: named, parameterized transformation steps.
//!
//! A [`StageRef`] never runs anything. It names an engine the external
//! bundler knows about and carries the options payload for it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Well-known engine identifiers used by the default chains.
pub mod names {
    pub const EXTRACT: &str = "mini-css-extract-plugin/loader";
    pub const STYLE: &str = "css-loader";
    pub const SASS: &str = "sass-loader";
    pub const TRANSPILE: &str = "babel-loader";
    pub const LINT: &str = "eslint-loader";
    pub const FILE: &str = "file-loader";
    pub const MINIMIZER: &str = "terser-webpack-plugin";
    pub const STYLE_OPTIMIZER: &str = "optimize-css-assets-webpack-plugin";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StageRef {
    /// Identifier of the external transformation engine
    pub name: String,

    /// Options forwarded to the engine, in insertion order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub options: IndexMap<String, Value>,
}

impl StageRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: IndexMap::new(),
        }
    }

    /// Add an option, replacing any earlier value for the same key.
    ///
    /// ```
    /// use kiln_config::StageRef;
    ///
    /// let stage = StageRef::new("css-loader").with_option("modules", false);
    /// assert_eq!(stage.option("modules"), Some(&serde_json::json!(false)));
    /// ```
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

impl From<&str> for StageRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_stage_serializes_without_options() {
        let value = serde_json::to_value(StageRef::new(names::STYLE)).unwrap();
        assert_eq!(value, json!({ "name": "css-loader" }));
    }

    #[test]
    fn options_keep_insertion_order() {
        let stage = StageRef::new(names::TRANSPILE)
            .with_option("presets", json!(["@babel/preset-env"]))
            .with_option("plugins", json!([]));
        let keys: Vec<_> = stage.options.keys().map(String::as_str).collect();
        assert_eq!(keys, ["presets", "plugins"]);
    }

    #[test]
    fn deserializes_bare_name() {
        let stage: StageRef = serde_json::from_value(json!({ "name": "sass-loader" })).unwrap();
        assert!(stage.is(names::SASS));
        assert!(stage.options.is_empty());
    }
}
