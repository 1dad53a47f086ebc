//! Tests for loading declarations from kiln.toml.

use kiln_config::{
    BuildPlanCompiler, CONFIG_FILE_NAME, ConfigDiscovery, ConfigError, FileCategory, Mode,
    load_file,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, content).expect("write config");
    path
}

#[test]
fn rules_and_entries_replace_defaults() {
    let dir = TempDir::new().expect("tempdir");
    write_config(
        &dir,
        r#"
[[entries]]
name = "app"
imports = ["./src/app.tsx"]

[[entries]]
name = "admin"
imports = ["./src/admin.tsx"]

[[rules]]
name = "tsx"
category = "component-script"
test = '\.tsx$'
exclude = "node_modules"

[[rules]]
name = "less"
category = "preprocessed-stylesheet"
test = '\.less$'
preprocessor = { name = "less-loader" }
"#,
    );

    let decls = ConfigDiscovery::new(dir.path()).load().expect("load");
    assert_eq!(decls.entries.len(), 2);
    assert_eq!(decls.rules.len(), 2);
    assert_eq!(decls.rules[0].category, FileCategory::ComponentScript);
    assert_eq!(
        decls.rules[1].preprocessor.as_ref().map(|s| s.name.as_str()),
        Some("less-loader")
    );

    let plan = BuildPlanCompiler::compile_with_mode(Mode::Development, &decls).expect("compile");
    let less = plan.rule("less").expect("less rule");
    let stages: Vec<_> = less.stages.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        stages,
        ["mini-css-extract-plugin/loader", "css-loader", "less-loader"]
    );
    assert_eq!(plan.rule_for("src/main.tsx").map(|r| r.name.as_str()), Some("tsx"));
}

#[test]
fn html_inputs_are_configurable() {
    let dir = TempDir::new().expect("tempdir");
    write_config(
        &dir,
        r#"
[plugins.html]
template = "./static/shell.html"
title = "Dashboard"
"#,
    );

    let decls = ConfigDiscovery::new(dir.path()).load().expect("load");
    assert_eq!(
        decls.plugins.html.template,
        Some(PathBuf::from("./static/shell.html"))
    );
    assert_eq!(decls.plugins.html.title.as_deref(), Some("Dashboard"));
    assert_eq!(
        decls.plugins.html.favicon,
        Some(PathBuf::from("./public/favicon.ico"))
    );
}

fn rejected_key(content: &str) -> String {
    let dir = TempDir::new().expect("tempdir");
    write_config(&dir, content);

    match ConfigDiscovery::new(dir.path()).load() {
        Err(ConfigError::InvalidValue { field, hint }) => {
            assert!(field.ends_with(CONFIG_FILE_NAME));
            hint.expect("hint")
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn mode_in_file_is_rejected() {
    let hint = rejected_key("mode = \"development\"\n");
    assert!(hint.contains("mode"), "{hint}");
}

#[test]
fn misspelled_top_level_key_is_rejected() {
    let hint = rejected_key("outputdir = \"build\"\n");
    assert!(hint.contains("outputdir"), "{hint}");
}

#[test]
fn misspelled_rules_table_is_rejected() {
    let hint = rejected_key(
        r#"
[[rule]]
name = "ts"
category = "typed-script"
test = '\.ts$'
"#,
    );
    assert!(hint.contains("rule"), "{hint}");
}

#[test]
fn misspelled_nested_keys_are_rejected() {
    let hint = rejected_key(
        r#"
[[rules]]
name = "js"
category = "script"
test = '\.js$'
exlude = "node_modules"
"#,
    );
    assert!(hint.contains("exlude"), "{hint}");

    let hint = rejected_key("[dev_server]\nstatic_dir = \"public\"\n");
    assert!(hint.contains("static_dir"), "{hint}");

    let hint = rejected_key("[plugins.html]\ntempalte = \"./index.html\"\n");
    assert!(hint.contains("tempalte"), "{hint}");
}

#[test]
fn wrong_type_is_invalid_value() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_config(&dir, "entries = \"main\"\n[dev_server]\nport = \"fast\"\n");

    match load_file(&path) {
        Err(ConfigError::InvalidValue { field, hint }) => {
            assert!(field.ends_with(CONFIG_FILE_NAME));
            assert!(hint.is_some());
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn conflicting_rules_name_both_declarations() {
    let dir = TempDir::new().expect("tempdir");
    write_config(
        &dir,
        r#"
[[rules]]
name = "plain"
category = "script"
test = '\.js$'

[[rules]]
name = "react"
category = "component-script"
test = '\.js$'
"#,
    );

    let decls = ConfigDiscovery::new(dir.path()).load().expect("load");
    let err = BuildPlanCompiler::compile_with_mode(Mode::Production, &decls).unwrap_err();
    assert!(err.is_declaration_error());
    let message = err.to_string();
    assert!(message.contains("plain"));
    assert!(message.contains("react"));
}
