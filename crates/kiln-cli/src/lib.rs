//! Kiln CLI - compile front-end build declarations into a bundler plan.
//!
//! The CLI is a thin adapter over `kiln-config`: it loads declarations,
//! captures the environment once, compiles a plan and prints it as JSON.
//!
//! - [`cli`] - argument definitions
//! - `commands` - `plan` and `check`
//! - [`error`] - CLI errors and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - colored status lines

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
