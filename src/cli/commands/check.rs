use anyhow::Result;

use super::super::args::CheckCommand;
use super::{CommandResult, CommandSummary, helper::finish};
use crate::core::context::ProjectContext;
use crate::pipeline;

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let run = pipeline::check(&ctx)?;

    Ok(finish(CommandSummary::Check, run.issues, run.files_found))
}
