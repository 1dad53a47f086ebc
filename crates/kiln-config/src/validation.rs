//! Structural validation of declarations.
//!
//! Only the declarations themselves are checked. Referenced files (entry
//! modules, HTML template, favicon) are never looked up on disk.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::declarations::Declarations;
use crate::error::{ConfigError, Result};
use crate::rule::{FileCategory, RuleTemplate};

/// Literal extension alternatives spelled in a pattern: `js` in `\.js$`,
/// `png|svg` in `\.(png|svg)$`.
static EXTENSION_LITERALS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\\.\(?(?:\?:)?([A-Za-z0-9_]+(?:\|[A-Za-z0-9_]+)*)")
        .expect("extension regex is valid")
});

/// Trait for pluggable declaration validation strategies
pub trait ConfigValidator {
    fn validate(&self, declarations: &Declarations) -> Result<()>;
}

/// Checks entries and rules for structural problems.
///
/// # Example
///
/// ```
/// use kiln_config::{ConfigValidator, Declarations, SchemaValidator};
///
/// SchemaValidator.validate(&Declarations::default()).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, declarations: &Declarations) -> Result<()> {
        if declarations.entries.is_empty() {
            return Err(ConfigError::NoEntries);
        }

        for entry in &declarations.entries {
            if entry.imports.is_empty() {
                return Err(ConfigError::EmptyEntry {
                    name: entry.name.clone(),
                });
            }
        }

        if !declarations.dev_server.hot {
            return Err(ConfigError::InvalidValue {
                field: "dev_server.hot".to_string(),
                hint: Some("development plans always hot-reload; remove the key".to_string()),
            });
        }

        let mut names = HashSet::new();
        let mut compiled = Vec::with_capacity(declarations.rules.len());
        for rule in &declarations.rules {
            if rule.name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "rules.name".to_string(),
                    hint: Some(format!("rule matching `{}` needs a name", rule.test)),
                });
            }
            if !names.insert(rule.name.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: format!("rules.{}", rule.name),
                    hint: Some("rule names must be unique".to_string()),
                });
            }
            compiled.push(CompiledRule::new(rule)?);
            check_preprocessor(rule)?;
        }

        check_duplicate_patterns(&declarations.rules)?;
        check_overlapping_rules(&compiled, &candidate_extensions(declarations))
    }
}

/// A rule template with its patterns compiled once for overlap checks.
struct CompiledRule<'a> {
    template: &'a RuleTemplate,
    test: Regex,
    exclude: Option<Regex>,
}

impl<'a> CompiledRule<'a> {
    fn new(template: &'a RuleTemplate) -> Result<Self> {
        let compile = |pattern: &String| {
            Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
                rule: template.name.clone(),
                pattern: pattern.clone(),
                message: e.to_string(),
            })
        };
        Ok(Self {
            template,
            test: compile(&template.test)?,
            exclude: template.exclude.as_ref().map(compile).transpose()?,
        })
    }

    fn accepts(&self, path: &str) -> bool {
        self.test.is_match(path) && !self.exclude.as_ref().is_some_and(|re| re.is_match(path))
    }
}

fn same_chain(a: &RuleTemplate, b: &RuleTemplate) -> bool {
    a.category == b.category && a.preprocessor == b.preprocessor
}

fn check_preprocessor(rule: &RuleTemplate) -> Result<()> {
    match (rule.category, &rule.preprocessor) {
        (FileCategory::PreprocessedStylesheet, None) => Err(ConfigError::InvalidValue {
            field: format!("rules.{}.preprocessor", rule.name),
            hint: Some("preprocessed stylesheet rules must name a preprocessor stage".to_string()),
        }),
        (category, Some(_)) if !category.is_style() => Err(ConfigError::InvalidValue {
            field: format!("rules.{}.preprocessor", rule.name),
            hint: Some("only stylesheet rules take a preprocessor".to_string()),
        }),
        _ => Ok(()),
    }
}

/// Two rules may share a pattern only if they would resolve to the same chain.
fn check_duplicate_patterns(rules: &[RuleTemplate]) -> Result<()> {
    let mut by_pattern: HashMap<&str, &RuleTemplate> = HashMap::new();
    for rule in rules {
        match by_pattern.get(rule.test.as_str()) {
            Some(first) if !same_chain(first, rule) => {
                return Err(ConfigError::DuplicateRule {
                    pattern: rule.test.clone(),
                    first: first.name.clone(),
                    second: rule.name.clone(),
                });
            }
            Some(first) => {
                tracing::debug!(
                    pattern = %rule.test,
                    first = %first.name,
                    second = %rule.name,
                    "rules share a pattern with identical chains"
                );
            }
            None => {
                by_pattern.insert(&rule.test, rule);
            }
        }
    }
    Ok(())
}

/// Extensions worth trying against every rule: the resolve list plus every
/// literal extension a rule pattern spells out.
fn candidate_extensions(declarations: &Declarations) -> BTreeSet<String> {
    let resolved = declarations
        .resolve_extensions
        .iter()
        .map(|ext| ext.trim_start_matches('.').to_string());
    let spelled = declarations.rules.iter().flat_map(|rule| {
        EXTENSION_LITERALS
            .captures_iter(&rule.test)
            .flat_map(|caps| caps[1].split('|').map(str::to_string).collect::<Vec<_>>())
            .collect::<Vec<_>>()
    });
    resolved.chain(spelled).filter(|ext| !ext.is_empty()).collect()
}

/// Differently spelled patterns can still claim the same file. Each
/// candidate extension is tried as `x.<ext>`; every rule that accepts it
/// (past its exclude) must resolve to the first such rule's chain.
fn check_overlapping_rules(
    rules: &[CompiledRule<'_>],
    extensions: &BTreeSet<String>,
) -> Result<()> {
    for ext in extensions {
        let sample = format!("x.{ext}");
        let mut accepting = rules.iter().filter(|rule| rule.accepts(&sample));
        let Some(first) = accepting.next() else {
            continue;
        };
        if let Some(second) = accepting.find(|rule| !same_chain(first.template, rule.template)) {
            return Err(ConfigError::DuplicateRule {
                pattern: format!("*.{ext}"),
                first: first.template.name.clone(),
                second: second.template.name.clone(),
            });
        }
    }
    Ok(())
}

/// Convenience function for structural validation
pub fn validate(declarations: &Declarations) -> Result<()> {
    SchemaValidator.validate(declarations)
}
