//! Dispatches to the command handler matching the parsed arguments.

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{check::check, init::init, release::release},
    exit_status::ExitStatus,
    report,
};

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    let result = match command {
        Some(Command::Check(cmd)) => check(cmd)?,
        Some(Command::Release(cmd)) => release(cmd)?,
        Some(Command::Init) => return init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    };

    report::print(&result);
    Ok(result.exit_status())
}
