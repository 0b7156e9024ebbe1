//! Issue types for translation compilation results.
//!
//! Each issue is self-contained with everything the reporter needs to
//! display it. File issues point at a `.tm` file (and a position when the
//! parser knows one); cross-locale issues are about a message key.

use enum_dispatch::enum_dispatch;

use crate::core::extract::FileProblem;
use crate::error::Position;
use crate::utils::join_with_and;

/// How many locales are named before the list is cut short.
const MAX_LOCALES_DISPLAY: usize = 4;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    ParseError,
    InvalidMessage,
    ParameterMismatch,
    DuplicateDefault,
    ObsoleteTranslation,
    MissingTranslation,
    LocaleCollision,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ParseError => write!(f, "parse-error"),
            Rule::InvalidMessage => write!(f, "invalid-message"),
            Rule::ParameterMismatch => write!(f, "parameter-mismatch"),
            Rule::DuplicateDefault => write!(f, "duplicate-default"),
            Rule::ObsoleteTranslation => write!(f, "obsolete-translation"),
            Rule::MissingTranslation => write!(f, "missing-translation"),
            Rule::LocaleCollision => write!(f, "locale-collision"),
        }
    }
}

// ============================================================
// Issue Types - Translation Files
// ============================================================

/// A file that could not be read or parsed. It is left out of compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub position: Option<Position>,
    pub source_line: Option<String>,
    pub error: String,
    pub details: Vec<String>,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

/// A message problem that does not stop compilation (self-reference,
/// unknown interpolation, duplicate key or directive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMessageIssue {
    pub file_path: String,
    pub position: Option<Position>,
    pub source_line: Option<String>,
    pub error: String,
}

impl InvalidMessageIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::InvalidMessage
    }
}

/// Two locale ids map to the same generated name. The later file is left
/// out of compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleCollisionIssue {
    pub file_path: String,
    pub locale: String,
    pub kept: String,
    pub identifier: String,
}

impl LocaleCollisionIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::LocaleCollision
    }
}

// ============================================================
// Issue Types - Cross-Locale Checks
// ============================================================

/// Locales disagree about the parameters of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterMismatchIssue {
    pub key: String,
    /// One description per incompatible signature.
    pub signatures: Vec<String>,
}

impl ParameterMismatchIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParameterMismatch
    }
}

/// More than one translation carries `@default`; the first one wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateDefaultIssue {
    pub locale: String,
    pub kept: String,
}

impl DuplicateDefaultIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::DuplicateDefault
    }
}

/// Key missing from the reference locale. It is dropped from generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObsoleteTranslationIssue {
    pub key: String,
    pub reference: String,
    /// Locales that still define the key.
    pub defined_in: Vec<String>,
}

impl ObsoleteTranslationIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::ObsoleteTranslation
    }
}

/// Key defined somewhere but missing from some locales.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTranslationIssue {
    pub key: String,
    pub missing_in: Vec<String>,
}

impl MissingTranslationIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingTranslation
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A problem found while compiling translations.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ParseError(ParseErrorIssue),
    InvalidMessage(InvalidMessageIssue),
    ParameterMismatch(ParameterMismatchIssue),
    DuplicateDefault(DuplicateDefaultIssue),
    ObsoleteTranslation(ObsoleteTranslationIssue),
    MissingTranslation(MissingTranslationIssue),
    LocaleCollision(LocaleCollisionIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::ParseError(_) => ParseErrorIssue::severity(),
            Issue::InvalidMessage(_) => InvalidMessageIssue::severity(),
            Issue::ParameterMismatch(_) => ParameterMismatchIssue::severity(),
            Issue::DuplicateDefault(_) => DuplicateDefaultIssue::severity(),
            Issue::ObsoleteTranslation(_) => ObsoleteTranslationIssue::severity(),
            Issue::MissingTranslation(_) => MissingTranslationIssue::severity(),
            Issue::LocaleCollision(_) => LocaleCollisionIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::ParseError(_) => ParseErrorIssue::rule(),
            Issue::InvalidMessage(_) => InvalidMessageIssue::rule(),
            Issue::ParameterMismatch(_) => ParameterMismatchIssue::rule(),
            Issue::DuplicateDefault(_) => DuplicateDefaultIssue::rule(),
            Issue::ObsoleteTranslation(_) => ObsoleteTranslationIssue::rule(),
            Issue::MissingTranslation(_) => MissingTranslationIssue::rule(),
            Issue::LocaleCollision(_) => LocaleCollisionIssue::rule(),
        }
    }
}

impl From<FileProblem> for Issue {
    fn from(problem: FileProblem) -> Self {
        let file_path = problem.path.to_string_lossy().to_string();
        if problem.error.is_fatal() {
            Issue::ParseError(ParseErrorIssue {
                file_path,
                position: problem.error.position,
                source_line: problem.source_line,
                error: problem.error.message,
                details: problem.error.details,
            })
        } else {
            Issue::InvalidMessage(InvalidMessageIssue {
                file_path,
                position: problem.error.position,
                source_line: problem.source_line,
                error: problem.error.message,
            })
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// A position inside a translation file.
    Source {
        path: &'a str,
        position: Position,
        source_line: Option<&'a str>,
    },
    /// A whole file.
    File { path: &'a str },
    /// Not tied to a single file.
    Global,
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types; `enum_dispatch` forwards the calls
/// made on `Issue`.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Lines for the "= note:" part.
    fn details(&self) -> Vec<String> {
        Vec::new()
    }
}

fn file_location<'a>(
    path: &'a str,
    position: Option<Position>,
    source_line: Option<&'a str>,
) -> ReportLocation<'a> {
    match position {
        Some(position) => ReportLocation::Source {
            path,
            position,
            source_line,
        },
        None => ReportLocation::File { path },
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        file_location(&self.file_path, self.position, self.source_line.as_deref())
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("this file is skipped until the error is fixed")
    }

    fn details(&self) -> Vec<String> {
        self.details.clone()
    }
}

impl Report for InvalidMessageIssue {
    fn location(&self) -> ReportLocation<'_> {
        file_location(&self.file_path, self.position, self.source_line.as_deref())
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for LocaleCollisionIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        format!(
            "Locale '{}' generates the same names as '{}'",
            self.locale, self.kept
        )
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("rename one of the files; this one is skipped")
    }

    fn details(&self) -> Vec<String> {
        vec![format!("both become `{}`", self.identifier)]
    }
}

impl Report for ParameterMismatchIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Global
    }

    fn message(&self) -> String {
        format!("Different parameters found for message '{}'", self.key)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("every locale must use the same parameters for a message")
    }

    fn details(&self) -> Vec<String> {
        self.signatures.clone()
    }
}

impl Report for DuplicateDefaultIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Global
    }

    fn message(&self) -> String {
        format!("Translation '{}' is also marked @default", self.locale)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Vec<String> {
        vec![format!("'{}' is used as the reference locale", self.kept)]
    }
}

impl Report for ObsoleteTranslationIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Global
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Vec<String> {
        vec![format!(
            "not in reference locale '{}', only found in {}",
            self.reference,
            join_with_and(&self.defined_in, MAX_LOCALES_DISPLAY)
        )]
    }
}

impl Report for MissingTranslationIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Global
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Vec<String> {
        vec![format!("missing in: {}", self.missing_in.join(", "))]
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_file_path(&self) -> Option<&str> {
        match self.location() {
            ReportLocation::Source { path, .. } | ReportLocation::File { path } => Some(path),
            ReportLocation::Global => None,
        }
    }

    fn sort_position(&self) -> Option<Position> {
        match self.location() {
            ReportLocation::Source { position, .. } => Some(position),
            _ => None,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;

        // Files first (by path, then position), then cross-locale issues by rule
        match (self.sort_file_path(), other.sort_file_path()) {
            (Some(a), Some(b)) => a
                .cmp(b)
                .then_with(|| self.sort_position().cmp(&other.sort_position()))
                .then_with(|| self.message().cmp(&other.message())),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self
                .rule()
                .cmp(&other.rule())
                .then_with(|| self.message().cmp(&other.message())),
        }
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::error::TmError;
    use crate::issues::*;

    fn problem(error: TmError) -> FileProblem {
        FileProblem {
            path: PathBuf::from("translations/fr.tm"),
            error,
            source_line: Some("hello = 'oops".to_string()),
        }
    }

    #[test]
    fn test_fatal_problem_becomes_parse_error() {
        let issue = Issue::from(problem(TmError::parser(
            "Unterminated message text",
            Position::new(2, 9),
        )));
        assert_eq!(issue.severity(), Severity::Error);
        assert_eq!(issue.rule(), Rule::ParseError);
        assert_eq!(issue.message(), "Unterminated message text");
        match issue.location() {
            ReportLocation::Source {
                path,
                position,
                source_line,
            } => {
                assert_eq!(path, "translations/fr.tm");
                assert_eq!(position, Position::new(2, 9));
                assert_eq!(source_line, Some("hello = 'oops"));
            }
            _ => panic!("expected a source location"),
        }
    }

    #[test]
    fn test_parse_error_keeps_details() {
        let error = TmError::parser("Unknown escape sequence '\\q'", Position::new(1, 9))
            .with_details(["known escapes: \\n".to_string()]);
        let issue = Issue::from(problem(error));
        assert_eq!(issue.details(), vec!["known escapes: \\n"]);
    }

    #[test]
    fn test_checks_problem_becomes_warning() {
        let issue = Issue::from(problem(TmError::checks("Unknown message \"x\"")));
        assert_eq!(issue.severity(), Severity::Warning);
        assert_eq!(issue.rule(), Rule::InvalidMessage);
        assert!(matches!(issue.location(), ReportLocation::File { .. }));
    }

    #[test]
    fn test_obsolete_details_truncate_locales() {
        let issue = ObsoleteTranslationIssue {
            key: "old".to_string(),
            reference: "en".to_string(),
            defined_in: ["de", "es", "fr", "it", "pt"].map(String::from).to_vec(),
        };
        assert_eq!(
            issue.details(),
            vec!["not in reference locale 'en', only found in de, es, fr, it and \u{2026}"]
        );
    }

    #[test]
    fn test_missing_details() {
        let issue = MissingTranslationIssue {
            key: "k2".to_string(),
            missing_in: vec!["de".to_string(), "fr".to_string()],
        };
        assert_eq!(Issue::from(issue.clone()).rule().to_string(), "missing-translation");
        assert_eq!(issue.details(), vec!["missing in: de, fr"]);
    }

    #[test]
    fn test_sort_files_before_global() {
        let mut issues = vec![
            Issue::MissingTranslation(MissingTranslationIssue {
                key: "a".to_string(),
                missing_in: vec!["fr".to_string()],
            }),
            Issue::ParameterMismatch(ParameterMismatchIssue {
                key: "b".to_string(),
                signatures: vec![],
            }),
            Issue::from(problem(TmError::checks("late"))),
        ];
        issues.sort();
        let rules: Vec<_> = issues.iter().map(Issue::rule).collect();
        assert_eq!(
            rules,
            vec![
                Rule::InvalidMessage,
                Rule::ParameterMismatch,
                Rule::MissingTranslation
            ]
        );
    }
}
