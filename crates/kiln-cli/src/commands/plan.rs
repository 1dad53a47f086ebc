//! `kiln plan`: print the compiled build plan.

use std::io::Write;

use kiln_config::{BuildPlanCompiler, EnvSnapshot};

use crate::cli::PlanArgs;
use crate::commands::load_declarations;
use crate::error::Result;

pub fn execute(args: &PlanArgs) -> Result<()> {
    let declarations = load_declarations(&args.source)?;
    let plan = BuildPlanCompiler::compile(&EnvSnapshot::capture(), &declarations)?;

    let json = if args.compact {
        serde_json::to_string(&plan)?
    } else {
        serde_json::to_string_pretty(&plan)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}
