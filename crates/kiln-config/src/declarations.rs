//! Static build declarations: everything a plan is compiled from except the
//! mode.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::dev::DevServerConfig;
use crate::plugins::PluginRequests;
use crate::rule::{RuleTemplate, default_rules};

/// A named entry point and the modules it loads, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntryPoint {
    pub name: String,
    pub imports: Vec<String>,
}

impl EntryPoint {
    pub fn new<I, S>(name: impl Into<String>, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            imports: imports.into_iter().map(Into::into).collect(),
        }
    }
}

/// Unknown keys are rejected at every level, so a misspelled section fails
/// loudly instead of falling back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Declarations {
    #[serde(default = "default_entries")]
    pub entries: Vec<EntryPoint>,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Extensions the engine tries, in order, for extension-less imports
    #[serde(default = "default_resolve_extensions")]
    pub resolve_extensions: Vec<String>,

    #[serde(default = "default_rules")]
    pub rules: Vec<RuleTemplate>,

    #[serde(default)]
    pub plugins: PluginRequests,

    #[serde(default)]
    pub dev_server: DevServerConfig,
}

impl Declarations {
    /// Replace the rule set.
    ///
    /// ```
    /// use kiln_config::{Declarations, FileCategory, RuleTemplate};
    ///
    /// let decls = Declarations::default()
    ///     .with_rules([RuleTemplate::new("js", FileCategory::Script, r"\.js$")]);
    /// assert_eq!(decls.rules.len(), 1);
    /// ```
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = RuleTemplate>) -> Self {
        self.rules = rules.into_iter().collect();
        self
    }

    pub fn with_entry(mut self, entry: EntryPoint) -> Self {
        self.entries.push(entry);
        self
    }
}

impl Default for Declarations {
    fn default() -> Self {
        Self {
            entries: default_entries(),
            output_dir: default_output_dir(),
            resolve_extensions: default_resolve_extensions(),
            rules: default_rules(),
            plugins: PluginRequests::default(),
            dev_server: DevServerConfig::default(),
        }
    }
}

fn default_entries() -> Vec<EntryPoint> {
    vec![EntryPoint::new("main", ["@babel/polyfill", "./src/index.js"])]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_resolve_extensions() -> Vec<String> {
    [".js", ".css", ".scss"].map(String::from).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_single_page_app() {
        let decls = Declarations::default();
        assert_eq!(decls.entries.len(), 1);
        assert_eq!(decls.entries[0].name, "main");
        assert_eq!(decls.entries[0].imports, ["@babel/polyfill", "./src/index.js"]);
        assert_eq!(decls.output_dir, PathBuf::from("dist"));
        assert_eq!(decls.resolve_extensions, [".js", ".css", ".scss"]);
        assert_eq!(decls.rules.len(), 7);
    }

    #[test]
    fn empty_document_deserializes_to_defaults() {
        let decls: Declarations = serde_json::from_str("{}").unwrap();
        assert_eq!(decls, Declarations::default());
    }

    #[test]
    fn misspelled_key_is_rejected() {
        let err = serde_json::from_str::<Declarations>(r#"{ "outputdir": "build" }"#).unwrap_err();
        assert!(err.to_string().contains("outputdir"));

        let err = serde_json::from_str::<Declarations>(
            r#"{ "rules": [{ "name": "js", "category": "script", "test": "x", "exlude": "y" }] }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("exlude"));
    }
}
