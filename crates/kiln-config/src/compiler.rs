//! Composition of the planners into one [`BuildPlan`].

use crate::declarations::Declarations;
use crate::error::Result;
use crate::loaders::LoaderChainBuilder;
use crate::mode::{EnvSnapshot, Mode};
use crate::optimization::OptimizationPlanner;
use crate::output::OutputNamer;
use crate::plan::{BuildPlan, SourceMapOptions};
use crate::plugins::PluginAssembler;
use crate::validation::{ConfigValidator, SchemaValidator};

pub struct BuildPlanCompiler;

impl BuildPlanCompiler {
    /// Resolve the mode from `env` once and compile `declarations` with it.
    ///
    /// Either a complete plan comes back or an error naming the offending
    /// declaration; nothing is compiled partially.
    ///
    /// # Example
    ///
    /// ```
    /// use kiln_config::{BuildPlanCompiler, Declarations, EnvSnapshot, Mode};
    ///
    /// let env = EnvSnapshot::from_pairs([("NODE_ENV", "development")]);
    /// let plan = BuildPlanCompiler::compile(&env, &Declarations::default()).unwrap();
    /// assert_eq!(plan.mode, Mode::Development);
    /// assert!(plan.optimization.is_empty());
    /// ```
    pub fn compile(env: &EnvSnapshot, declarations: &Declarations) -> Result<BuildPlan> {
        Self::compile_with_mode(Mode::resolve(env), declarations)
    }

    /// Compile with an already resolved mode.
    pub fn compile_with_mode(mode: Mode, declarations: &Declarations) -> Result<BuildPlan> {
        SchemaValidator.validate(declarations)?;

        let output = OutputNamer::scheme(mode, &declarations.output_dir);
        output.check_entry_names(declarations.entries.iter().map(|e| e.name.as_str()))?;

        let rules = declarations
            .rules
            .iter()
            .map(|template| LoaderChainBuilder::build(template, mode))
            .collect();
        let optimization = OptimizationPlanner::plan(mode);
        let plugins = PluginAssembler::assemble(mode, &output, &declarations.plugins);

        let plan = BuildPlan {
            mode,
            entries: declarations.entries.clone(),
            resolve_extensions: declarations.resolve_extensions.clone(),
            rules,
            optimization,
            plugins,
            source_maps: SourceMapOptions::for_mode(mode),
            dev_server: declarations.dev_server.for_mode(mode),
            output,
        };

        tracing::info!(
            mode = %plan.mode,
            rules = plan.rules.len(),
            optimizers = plan.optimization.len(),
            plugins = plan.plugins.len(),
            "compiled build plan"
        );

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declarations::EntryPoint;
    use crate::error::ConfigError;

    #[test]
    fn invalid_declarations_produce_no_plan() {
        let decls = Declarations {
            entries: vec![],
            ..Declarations::default()
        };
        let result = BuildPlanCompiler::compile_with_mode(Mode::Production, &decls);
        assert!(matches!(result, Err(ConfigError::NoEntries)));
    }

    #[test]
    fn duplicate_entry_names_collide() {
        let decls = Declarations::default().with_entry(EntryPoint::new("main", ["./src/other.js"]));
        match BuildPlanCompiler::compile_with_mode(Mode::Development, &decls) {
            Err(ConfigError::FilenameCollision { first, second, .. }) => {
                assert_eq!(first, "main");
                assert_eq!(second, "main");
            }
            other => panic!("expected FilenameCollision, got {other:?}"),
        }
    }

    #[test]
    fn dev_server_and_source_maps_follow_mode() {
        let decls = Declarations::default();
        let dev = BuildPlanCompiler::compile_with_mode(Mode::Development, &decls).unwrap();
        assert!(dev.dev_server.is_some());
        assert_eq!(dev.source_maps, SourceMapOptions::External);

        let prod = BuildPlanCompiler::compile_with_mode(Mode::Production, &decls).unwrap();
        assert!(prod.dev_server.is_none());
        assert_eq!(prod.source_maps, SourceMapOptions::None);
    }

    #[test]
    fn output_path_comes_from_declarations() {
        let decls = Declarations {
            output_dir: "build/web".into(),
            ..Declarations::default()
        };
        let plan = BuildPlanCompiler::compile_with_mode(Mode::Production, &decls).unwrap();
        assert_eq!(plan.output.path, std::path::PathBuf::from("build/web"));
    }
}
