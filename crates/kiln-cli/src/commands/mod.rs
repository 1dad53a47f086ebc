//! Command implementations.

pub mod check;
pub mod plan;
mod source;

pub use check::execute as check_execute;
pub use plan::execute as plan_execute;
pub use source::load_declarations;
