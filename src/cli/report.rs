//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format. Kept apart from the pipeline
//! so the library can be used without a terminal.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CommandResult, CommandSummary, ReleaseSummary};
use crate::codegen::EmittedFile;
use crate::error::{ErrorKind, TmError};
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Below this share of missing keys, a generated file is only a warning.
const MISSING_WARNING_RATIO: f64 = 0.05;

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(files: usize) {
    print_success_to(files, &mut io::stdout().lock());
}

pub fn print_success_to<W: Write>(files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} translation {} - no issues found",
            files,
            if files == 1 { "file" } else { "files" }
        )
        .green()
    );
}

/// Print a warning about files left out of compilation.
pub fn print_parse_warning_to<W: Write>(count: usize, writer: &mut W) {
    if count > 0 {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed and were left out",
            "warning:".bold().yellow(),
            count,
        );
    }
}

/// Print the outcome of a release.
pub fn print_release_to<W: Write>(summary: &ReleaseSummary, writer: &mut W) {
    if !summary.generated {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            "Checks failed, no file was generated".red()
        );
        return;
    }

    for file in &summary.emitted {
        print_emitted_file(file, writer);
    }
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Generated {} file(s) ({})",
            summary.emitted.len(),
            summary.targets.join(", ")
        )
        .green()
    );
}

/// Print a fatal error. Internal errors come with a bug notice.
pub fn print_error(err: &anyhow::Error) {
    print_error_to(err, &mut io::stderr().lock());
}

pub fn print_error_to<W: Write>(err: &anyhow::Error, writer: &mut W) {
    let _ = writeln!(writer, "{} {:#}", "Error:".bold().red(), err);

    if let Some(tm_error) = err.downcast_ref::<TmError>() {
        for detail in &tm_error.details {
            let _ = writeln!(writer, "  {} {}", "=".blue(), detail);
        }
        if tm_error.kind == ErrorKind::Internal {
            let _ = writeln!(
                writer,
                "{} this is a bug in {}, please report it",
                "note:".bold(),
                env!("CARGO_PKG_NAME")
            );
        }
    }
}

pub fn print(result: &CommandResult) {
    report(&result.issues);
    print_parse_warning_to(result.parse_error_count, &mut io::stderr().lock());

    match &result.summary {
        CommandSummary::Check => {
            if result.issues.is_empty() {
                print_success(result.files_checked);
            }
        }
        CommandSummary::Release(summary) => {
            print_release_to(summary, &mut io::stdout().lock());
        }
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::Source {
            path,
            position,
            source_line,
        } => {
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "-->".blue(),
                path,
                position.line,
                position.col
            );
            if let Some(source_line) = source_line {
                print_source_context(
                    source_line,
                    position.line,
                    position.col,
                    severity,
                    writer,
                    max_line_width,
                );
            }
        }
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
        ReportLocation::Global => {}
    }

    for detail in issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            detail,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_source_context<W: Write>(
    source_line: &str,
    line: usize,
    col: usize,
    severity: Severity,
    writer: &mut W,
    max_line_width: usize,
) {
    let caret_char = match severity {
        Severity::Error => "^".red(),
        Severity::Warning => "^".yellow(),
    };

    let _ = writeln!(
        writer,
        "{:>width$} {}",
        "",
        "|".blue(),
        width = max_line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        line.to_string().blue(),
        "|".blue(),
        source_line,
        width = max_line_width
    );

    // Caret pointing to the column (col is 1-based)
    let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        caret_char,
        width = max_line_width,
        padding = caret_padding
    );
}

fn print_emitted_file<W: Write>(file: &EmittedFile, writer: &mut W) {
    let mut line = format!("{} {}", SUCCESS_MARK.green(), file.name);

    if file.missing > 0 {
        let marker = format!("[!] {} missing translation(s)", file.missing);
        let ratio = file.missing as f64 / file.total.max(1) as f64;
        let marker = if ratio < MISSING_WARNING_RATIO {
            marker.yellow()
        } else {
            marker.red()
        };
        line.push_str(&format!(" {}", marker));
    }

    let _ = writeln!(writer, "{}", line);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} problems ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source { position, .. } => Some(position.line),
            _ => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

// ============================================================
// Tests
// ============================================================
