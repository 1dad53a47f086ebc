//! File-type rules: static templates and their resolved form.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::stage::{StageRef, names};

/// Directory excluded from every script rule by default
pub const DEFAULT_SCRIPT_EXCLUDE: &str = "node_modules";

/// Source file category a rule is declared for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileCategory {
    /// Plain scripts (`.js`)
    Script,
    /// Typed scripts (`.ts`)
    TypedScript,
    /// Component scripts (`.jsx`)
    ComponentScript,
    /// Plain stylesheets (`.css`)
    Stylesheet,
    /// Stylesheets compiled by a preprocessor first (`.scss`)
    PreprocessedStylesheet,
    /// Images and icons
    Image,
    /// Web fonts
    Font,
}

impl FileCategory {
    pub fn is_script(self) -> bool {
        matches!(
            self,
            FileCategory::Script | FileCategory::TypedScript | FileCategory::ComponentScript
        )
    }

    pub fn is_style(self) -> bool {
        matches!(
            self,
            FileCategory::Stylesheet | FileCategory::PreprocessedStylesheet
        )
    }

    /// Syntax-specific transpiler preset appended after the base preset.
    pub fn syntax_preset(self) -> Option<&'static str> {
        match self {
            FileCategory::ComponentScript => Some("@babel/preset-react"),
            FileCategory::TypedScript => Some("@babel/preset-typescript"),
            _ => None,
        }
    }
}

/// Declaration of one file-type rule, before mode-specific resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleTemplate {
    /// Declaration name used in diagnostics (e.g. "scss")
    pub name: String,

    pub category: FileCategory,

    /// Regex over the module path
    pub test: String,

    /// Regex over the module path; matching modules skip this rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    /// Stylesheet preprocessor appended after the style loader
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preprocessor: Option<StageRef>,
}

impl RuleTemplate {
    pub fn new(name: impl Into<String>, category: FileCategory, test: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category,
            test: test.into(),
            exclude: None,
            preprocessor: None,
        }
    }

    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude = Some(pattern.into());
        self
    }

    pub fn preprocessor(mut self, stage: impl Into<StageRef>) -> Self {
        self.preprocessor = Some(stage.into());
        self
    }
}

/// A rule with its stage chain resolved for one mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub category: FileCategory,
    pub test: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    /// Ordered chain; the external engine applies it first to last
    pub stages: Vec<StageRef>,
}

impl Rule {
    /// Whether a module path is handled by this rule.
    ///
    /// Patterns are checked by validation before a plan exists, so an
    /// uncompilable pattern simply never matches here.
    pub fn matches(&self, path: &str) -> bool {
        let included = Regex::new(&self.test)
            .map(|re| re.is_match(path))
            .unwrap_or(false);
        if !included {
            return false;
        }
        match &self.exclude {
            Some(exclude) => !Regex::new(exclude)
                .map(|re| re.is_match(path))
                .unwrap_or(false),
            None => true,
        }
    }

    /// Position of the first stage with the given engine name.
    pub fn stage_index(&self, name: &str) -> Option<usize> {
        self.stages.iter().position(|stage| stage.is(name))
    }

    pub fn has_stage(&self, name: &str) -> bool {
        self.stage_index(name).is_some()
    }
}

/// The seven rules every project starts with.
pub fn default_rules() -> Vec<RuleTemplate> {
    vec![
        RuleTemplate::new("css", FileCategory::Stylesheet, r"\.css$"),
        RuleTemplate::new("scss", FileCategory::PreprocessedStylesheet, r"\.scss$")
            .preprocessor(names::SASS),
        RuleTemplate::new("images", FileCategory::Image, r"\.(png|svg|jpg|jpeg|gif|ico)$"),
        RuleTemplate::new("fonts", FileCategory::Font, r"\.(ttf|woff|woff2|eot)$"),
        RuleTemplate::new("js", FileCategory::Script, r"\.js$").exclude(DEFAULT_SCRIPT_EXCLUDE),
        RuleTemplate::new("ts", FileCategory::TypedScript, r"\.ts$")
            .exclude(DEFAULT_SCRIPT_EXCLUDE),
        RuleTemplate::new("jsx", FileCategory::ComponentScript, r"\.jsx$")
            .exclude(DEFAULT_SCRIPT_EXCLUDE),
    ]
}
