//! `kiln check`: compile without printing.

use kiln_config::{BuildPlanCompiler, EnvSnapshot};

use crate::cli::CheckArgs;
use crate::commands::load_declarations;
use crate::error::Result;
use crate::ui;

pub fn execute(args: &CheckArgs) -> Result<()> {
    ui::info("Checking declarations...");

    let declarations = load_declarations(&args.source)?;
    let plan = BuildPlanCompiler::compile(&EnvSnapshot::capture(), &declarations)?;

    ui::success(&format!(
        "Declarations are valid ({} mode, {} rules, {} entries)",
        plan.mode,
        plan.rules.len(),
        plan.entries.len()
    ));
    Ok(())
}
