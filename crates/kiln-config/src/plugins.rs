//! Auxiliary plugins: output cleaning, HTML emission and style extraction.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::path::PathBuf;

use crate::mode::Mode;
use crate::output::OutputScheme;

pub mod names {
    pub const CLEAN: &str = "clean-webpack-plugin";
    pub const HTML: &str = "html-webpack-plugin";
    pub const EXTRACT_STYLES: &str = "mini-css-extract-plugin";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plugin {
    pub name: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub options: IndexMap<String, Value>,
}

impl Plugin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: IndexMap::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }
}

/// HTML generation inputs.
///
/// `template` and `favicon` are passed through untouched; whether they exist
/// is for the bundling engine to find out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HtmlOptions {
    #[serde(default = "default_template")]
    pub template: Option<PathBuf>,

    #[serde(default = "default_favicon")]
    pub favicon: Option<PathBuf>,

    /// Output filename for generated HTML
    #[serde(default = "default_html_filename")]
    pub filename: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            template: default_template(),
            favicon: default_favicon(),
            filename: default_html_filename(),
            title: None,
        }
    }
}

fn default_template() -> Option<PathBuf> {
    Some(PathBuf::from("./public/index.html"))
}

fn default_favicon() -> Option<PathBuf> {
    Some(PathBuf::from("./public/favicon.ico"))
}

fn default_html_filename() -> String {
    "index.html".to_string()
}

/// Plugin declarations supplied alongside the rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginRequests {
    #[serde(default)]
    pub html: HtmlOptions,
}

pub struct PluginAssembler;

impl PluginAssembler {
    /// Build the plugin list, always in this order:
    ///
    /// 1. output cleaning (once, before emission)
    /// 2. HTML template injection, whitespace collapsed in production
    /// 3. style extraction, named by `scheme.style_filename`
    pub fn assemble(mode: Mode, scheme: &OutputScheme, requests: &PluginRequests) -> Vec<Plugin> {
        vec![
            clean_plugin(scheme),
            html_plugin(mode, &requests.html),
            Plugin::new(names::EXTRACT_STYLES)
                .with_option("filename", scheme.style_filename.as_str()),
        ]
    }
}

fn clean_plugin(scheme: &OutputScheme) -> Plugin {
    Plugin::new(names::CLEAN).with_option("path", scheme.path.to_string_lossy().into_owned())
}

fn html_plugin(mode: Mode, html: &HtmlOptions) -> Plugin {
    let mut plugin = Plugin::new(names::HTML);
    if let Some(template) = &html.template {
        plugin = plugin.with_option("template", template.to_string_lossy().into_owned());
    }
    if let Some(favicon) = &html.favicon {
        plugin = plugin.with_option("favicon", favicon.to_string_lossy().into_owned());
    }
    if let Some(title) = &html.title {
        plugin = plugin.with_option("title", title.as_str());
    }
    plugin
        .with_option("filename", html.filename.as_str())
        .with_option(
            "minify",
            json!({ "collapseWhitespace": mode.is_production() }),
        )
}
