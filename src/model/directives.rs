use std::fmt;

use crate::error::{ErrorKind, TmError};

/// A file-level `@name args...` instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Directive {
    /// Marks the translation as the reference locale.
    Default,
}

impl Directive {
    pub fn name(&self) -> &'static str {
        match self {
            Directive::Default => "default",
        }
    }

    fn arity(&self) -> usize {
        match self {
            Directive::Default => 0,
        }
    }

    /// Builds a directive from its name and raw arguments.
    pub fn build(name: &str, args: &[String]) -> Result<Directive, TmError> {
        let directive = match name {
            "default" => Directive::Default,
            _ => {
                return Err(TmError::new(
                    ErrorKind::Parser,
                    format!("Unknown directive @{}.", name),
                ));
            }
        };

        if args.len() != directive.arity() {
            return Err(TmError::new(
                ErrorKind::Parser,
                format!(
                    "The @{} directive expected {} argument(s) but {} were found.",
                    name,
                    directive.arity(),
                    args.len()
                ),
            ));
        }

        Ok(directive)
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name())
    }
}

/// The directives of one translation. Each kind may appear once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveCollection {
    directives: Vec<Directive>,
}

impl DirectiveCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, directive: Directive) -> Result<(), TmError> {
        if self.has(directive) {
            return Err(TmError::checks(format!(
                "Duplicate {} directive found",
                directive
            )));
        }
        self.directives.push(directive);
        Ok(())
    }

    pub fn has(&self, directive: Directive) -> bool {
        self.directives.contains(&directive)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Directive> {
        self.directives.iter()
    }
}
