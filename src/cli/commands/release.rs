use anyhow::Result;

use super::super::args::ReleaseCommand;
use super::{CommandResult, CommandSummary, ReleaseSummary, helper::finish};
use crate::core::context::ProjectContext;
use crate::pipeline;

pub fn release(cmd: ReleaseCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let options = ctx.target_options(cmd.ts_out.as_deref(), cmd.dts_out.as_deref());
    let run = pipeline::release(&ctx, &options)?;

    let summary = ReleaseSummary {
        targets: run.targets,
        generated: run.check.can_generate(),
        emitted: run.emitted,
    };
    Ok(finish(
        CommandSummary::Release(summary),
        run.check.issues,
        run.check.files_found,
    ))
}
