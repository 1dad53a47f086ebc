//! Kiln configuration compiler.
//!
//! Turns a build mode and static file-type declarations into a [`BuildPlan`]:
//! the ordered stage chain for every rule, the post-bundling optimizers, the
//! output naming scheme and the auxiliary plugins. The plan is a description
//! only; running it is the bundling engine's job.
//!
//! ```
//! use kiln_config::{BuildPlanCompiler, Declarations, EnvSnapshot};
//!
//! let plan = BuildPlanCompiler::compile(&EnvSnapshot::capture(), &Declarations::default())?;
//! println!("{}", plan.to_value()?);
//! # Ok::<(), kiln_config::ConfigError>(())
//! ```

pub mod compiler;
pub mod declarations;
pub mod dev;
pub mod discovery;
pub mod error;
pub mod loaders;
pub mod mode;
pub mod optimization;
pub mod output;
pub mod plan;
pub mod plugins;
pub mod rule;
pub mod stage;
pub mod validation;

pub use compiler::BuildPlanCompiler;
pub use declarations::{Declarations, EntryPoint};
pub use dev::DevServerConfig;
pub use discovery::{CONFIG_FILE_NAME, ConfigDiscovery, load_file};
pub use error::{ConfigError, Result};
pub use loaders::LoaderChainBuilder;
pub use mode::{EnvSnapshot, MODE_ENV_VAR, Mode};
pub use optimization::{OptimizationPlanner, OptimizationSet};
pub use output::{
    Artifact, ArtifactKind, FilenamePattern, HashStrategy, OutputNamer, OutputScheme,
    ResolvedArtifact,
};
pub use plan::{BuildPlan, SourceMapOptions};
pub use plugins::{HtmlOptions, Plugin, PluginAssembler, PluginRequests};
pub use rule::{FileCategory, Rule, RuleTemplate, default_rules};
pub use stage::StageRef;
pub use validation::{ConfigValidator, SchemaValidator, validate};
