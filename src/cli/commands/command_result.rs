use crate::cli::exit_status::ExitStatus;
use crate::codegen::EmittedFile;
use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Check,
    Release(ReleaseSummary),
}

#[derive(Debug)]
pub struct ReleaseSummary {
    /// Enabled targets, in generation order.
    pub targets: Vec<&'static str>,
    pub emitted: Vec<EmittedFile>,
    /// False when the checks blocked generation.
    pub generated: bool,
}

/// Result of running elzii commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// All issues found, sorted.
    pub issues: Vec<Issue>,
    /// Number of files left out because they could not be parsed.
    pub parse_error_count: usize,
    /// Number of translation files found.
    pub files_checked: usize,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        let blocked = matches!(&self.summary, CommandSummary::Release(s) if !s.generated);
        if self.error_count > 0 || blocked {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
