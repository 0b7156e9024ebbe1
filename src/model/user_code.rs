use super::TypeHint;

/// A snippet of target-language code embedded in a translation file.
///
/// It is never parsed. It is only printed back verbatim, prefixed, or
/// inspected with a cheap heuristic to guess a [`TypeHint`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserCode {
    code: String,
}

impl UserCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn print(&self) -> &str {
        &self.code
    }

    pub fn type_hint(&self) -> TypeHint {
        if self.code.starts_with("number") {
            TypeHint::Number
        } else {
            TypeHint::None
        }
    }

    pub fn with_prefix(&self, prefix: &str) -> UserCode {
        UserCode::new(format!("{}{}", prefix, self.code))
    }
}
