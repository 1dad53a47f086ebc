//! Per-rule stage chain construction.
//!
//! Each chain is built whole and returned; nothing appends to a chain after
//! [`LoaderChainBuilder::build`] hands it back.

use serde_json::{Value, json};

use crate::mode::Mode;
use crate::rule::{FileCategory, Rule, RuleTemplate};
use crate::stage::{StageRef, names};

/// Preset every transpile stage starts with
pub const BASE_PRESET: &str = "@babel/preset-env";

/// Transpiler plugins enabled on every transpile stage
pub const BASE_TRANSPILE_PLUGINS: &[&str] = &["@babel/plugin-proposal-class-properties"];

pub struct LoaderChainBuilder;

impl LoaderChainBuilder {
    /// Resolve a rule template's stage chain for `mode`.
    ///
    /// - styles: `extract → style [→ preprocessor]`
    /// - scripts: `transpile [→ lint]`, lint only in development
    /// - assets: `file`
    pub fn build(template: &RuleTemplate, mode: Mode) -> Rule {
        let stages = match template.category {
            FileCategory::Stylesheet | FileCategory::PreprocessedStylesheet => {
                style_chain(template.preprocessor.as_ref(), mode)
            }
            category @ (FileCategory::Script
            | FileCategory::TypedScript
            | FileCategory::ComponentScript) => script_chain(category, mode),
            FileCategory::Image | FileCategory::Font => vec![StageRef::new(names::FILE)],
        };

        tracing::debug!(
            rule = %template.name,
            stages = ?stages.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            "resolved stage chain"
        );

        Rule {
            name: template.name.clone(),
            category: template.category,
            test: template.test.clone(),
            exclude: template.exclude.clone(),
            stages,
        }
    }
}

fn style_chain(preprocessor: Option<&StageRef>, mode: Mode) -> Vec<StageRef> {
    let hot = mode.is_development();
    let extract = StageRef::new(names::EXTRACT)
        .with_option("hmr", hot)
        .with_option("reloadAll", hot);

    let mut chain = vec![extract, StageRef::new(names::STYLE)];
    chain.extend(preprocessor.cloned());
    chain
}

fn script_chain(category: FileCategory, mode: Mode) -> Vec<StageRef> {
    let transpile =
        StageRef::new(names::TRANSPILE).with_option("options", transpile_options(category));

    if mode.is_development() {
        vec![transpile, StageRef::new(names::LINT)]
    } else {
        vec![transpile]
    }
}

/// Transpiler options for a script category: the base preset, then the
/// category's syntax preset if it has one.
pub fn transpile_options(category: FileCategory) -> Value {
    let presets: Vec<&str> = std::iter::once(BASE_PRESET)
        .chain(category.syntax_preset())
        .collect();
    json!({
        "presets": presets,
        "plugins": BASE_TRANSPILE_PLUGINS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::default_rules;

    fn template(name: &str) -> RuleTemplate {
        default_rules()
            .into_iter()
            .find(|r| r.name == name)
            .expect("default rule")
    }

    fn stage_names(rule: &Rule) -> Vec<&str> {
        rule.stages.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn css_chain_in_development() {
        let rule = LoaderChainBuilder::build(&template("css"), Mode::Development);
        assert_eq!(stage_names(&rule), [names::EXTRACT, names::STYLE]);
        assert_eq!(rule.stages[0].option("hmr"), Some(&json!(true)));
        assert_eq!(rule.stages[0].option("reloadAll"), Some(&json!(true)));
    }

    #[test]
    fn scss_chain_appends_preprocessor_last() {
        let rule = LoaderChainBuilder::build(&template("scss"), Mode::Production);
        assert_eq!(stage_names(&rule), [names::EXTRACT, names::STYLE, names::SASS]);
        assert_eq!(rule.stages[0].option("hmr"), Some(&json!(false)));
        assert_eq!(rule.stages[0].option("reloadAll"), Some(&json!(false)));
    }

    #[test]
    fn script_chain_lints_only_in_development() {
        let dev = LoaderChainBuilder::build(&template("js"), Mode::Development);
        assert_eq!(stage_names(&dev), [names::TRANSPILE, names::LINT]);

        let prod = LoaderChainBuilder::build(&template("js"), Mode::Production);
        assert_eq!(stage_names(&prod), [names::TRANSPILE]);
    }

    #[test]
    fn plain_script_uses_only_base_preset() {
        let rule = LoaderChainBuilder::build(&template("js"), Mode::Production);
        let options = rule.stages[0].option("options").unwrap();
        assert_eq!(options["presets"], json!([BASE_PRESET]));
        assert_eq!(
            options["plugins"],
            json!(["@babel/plugin-proposal-class-properties"])
        );
    }

    #[test]
    fn typed_and_component_scripts_add_syntax_preset() {
        let ts = LoaderChainBuilder::build(&template("ts"), Mode::Production);
        assert_eq!(
            ts.stages[0].option("options").unwrap()["presets"],
            json!([BASE_PRESET, "@babel/preset-typescript"])
        );

        let jsx = LoaderChainBuilder::build(&template("jsx"), Mode::Development);
        assert_eq!(
            jsx.stages[0].option("options").unwrap()["presets"],
            json!([BASE_PRESET, "@babel/preset-react"])
        );
        assert!(jsx.has_stage(names::LINT));
    }

    #[test]
    fn asset_chain_is_mode_independent() {
        for name in ["images", "fonts"] {
            let dev = LoaderChainBuilder::build(&template(name), Mode::Development);
            let prod = LoaderChainBuilder::build(&template(name), Mode::Production);
            assert_eq!(dev, prod);
            assert_eq!(stage_names(&dev), [names::FILE]);
        }
    }

    #[test]
    fn resolved_rule_keeps_match_patterns() {
        let rule = LoaderChainBuilder::build(&template("ts"), Mode::Development);
        assert_eq!(rule.test, r"\.ts$");
        assert_eq!(rule.exclude.as_deref(), Some("node_modules"));
    }
}
