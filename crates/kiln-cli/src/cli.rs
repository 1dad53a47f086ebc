//! Command-line interface definition.
//!
//! - `kiln plan` - print the compiled build plan as JSON
//! - `kiln check` - compile and report whether the declarations are valid
//!
//! The build mode is not a flag: it comes from `NODE_ENV` only.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Kiln - front-end build plan compiler
#[derive(Parser, Debug)]
#[command(
    name = "kiln",
    version,
    about = "Compile front-end build declarations into a bundler plan",
    long_about = "Kiln reads kiln.toml (or built-in defaults), resolves the build mode from\n\
                  NODE_ENV and prints the resulting plan: loader chains, optimizers,\n\
                  output naming and plugins."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the compiled build plan as JSON
    Plan(PlanArgs),

    /// Validate declarations without printing the plan
    Check(CheckArgs),
}

/// Where declarations come from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path to a kiln.toml file
    ///
    /// Without this flag, kiln.toml is looked up in --root and the built-in
    /// defaults are used when it is absent.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project root to search for kiln.toml
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub root: PathBuf,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print single-line JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}
