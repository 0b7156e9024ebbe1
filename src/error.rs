//! Error kinds and accumulated error reports.
//!
//! Builders never stop at the first problem they meet. They return a
//! [`Built`] value holding both their result and an [`ErrorReport`]; callers
//! fold nested reports into their own with [`Built::unwrap_into`] and decide
//! afterwards whether the collected errors are fatal.

use std::fmt;

use thiserror::Error;

/// Broad category of an error, used to decide how it is reported and
/// whether it excludes a file from compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
    Config,
    Parser,
    Checks,
    Files,
    Internal,
    Other,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Config => write!(f, "config"),
            ErrorKind::Parser => write!(f, "parser"),
            ErrorKind::Checks => write!(f, "checks"),
            ErrorKind::Files => write!(f, "files"),
            ErrorKind::Internal => write!(f, "internal"),
            ErrorKind::Other => write!(f, "other"),
        }
    }
}

/// 1-based position inside a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TmError {
    pub kind: ErrorKind,
    pub message: String,
    /// Additional lines shown below the main message.
    pub details: Vec<String>,
    pub position: Option<Position>,
}

impl TmError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: Vec::new(),
            position: None,
        }
    }

    pub fn parser(message: impl Into<String>, position: Position) -> Self {
        Self::new(ErrorKind::Parser, message).at(position)
    }

    pub fn checks(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Checks, message)
    }

    /// A broken invariant. Seeing one of these is a bug in the tool.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_details(mut self, details: impl IntoIterator<Item = String>) -> Self {
        self.details.extend(details);
        self
    }

    /// Whether this error prevents the translation it belongs to from being compiled.
    pub fn is_fatal(&self) -> bool {
        !matches!(self.kind, ErrorKind::Checks)
    }
}

/// An ordered collection of non-thrown errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorReport {
    errors: Vec<TmError>,
}

impl ErrorReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: TmError) {
        self.errors.push(error);
    }

    pub fn merge(&mut self, other: ErrorReport) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn has_fatal(&self) -> bool {
        self.errors.iter().any(TmError::is_fatal)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TmError> {
        self.errors.iter()
    }
}

impl IntoIterator for ErrorReport {
    type Item = TmError;
    type IntoIter = std::vec::IntoIter<TmError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl From<TmError> for ErrorReport {
    fn from(error: TmError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

/// The result of a builder together with every error it collected.
#[derive(Debug)]
pub struct Built<T> {
    pub value: T,
    pub errors: ErrorReport,
}

impl<T> Built<T> {
    pub fn new(value: T, errors: ErrorReport) -> Self {
        Self { value, errors }
    }

    /// Moves the collected errors into `report` and returns the value.
    pub fn unwrap_into(self, report: &mut ErrorReport) -> T {
        report.merge(self.errors);
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_order() {
        let mut report = ErrorReport::new();
        report.push(TmError::checks("first"));

        let mut other = ErrorReport::new();
        other.push(TmError::parser("second", Position::new(1, 2)));
        report.merge(other);

        let messages: Vec<_> = report.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn test_fatal_kinds() {
        assert!(!TmError::checks("x").is_fatal());
        assert!(TmError::parser("x", Position::new(1, 1)).is_fatal());
        assert!(TmError::internal("x").is_fatal());

        let mut report = ErrorReport::from(TmError::checks("warn"));
        assert!(!report.has_fatal());
        report.push(TmError::new(ErrorKind::Files, "unreadable"));
        assert!(report.has_fatal());
    }

    #[test]
    fn test_unwrap_into_moves_errors() {
        let built = Built::new(42, ErrorReport::from(TmError::checks("oops")));
        let mut report = ErrorReport::new();
        let value = built.unwrap_into(&mut report);
        assert_eq!(value, 42);
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn test_display_uses_message() {
        let error = TmError::parser("Unknown escape sequence", Position::new(3, 7));
        assert_eq!(error.to_string(), "Unknown escape sequence");
        assert_eq!(error.position.map(|p| p.to_string()), Some("3:7".to_string()));
        assert_eq!(ErrorKind::Checks.to_string(), "checks");
    }
}
