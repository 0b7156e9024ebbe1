use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): translations are valid (warnings allowed)
/// - `Failure` (1): at least one error was reported
/// - `Error` (2): the command could not run (config, I/O, internal error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
