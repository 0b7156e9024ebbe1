use super::{MessageParameterSet, UserCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    /// Usable through interpolation only; never generated.
    Private,
}

/// Name under which generated code exposes the runtime formatter to
/// shorthand format specs.
pub const FORMATTER_ACCESSOR: &str = "$f";

/// How a parameter value is turned into text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParameterFormat {
    /// `{p|code}`: `code` is a function applied to the value.
    Explicit(UserCode),
    /// `{p:code}`: `code` is a format spec read from the runtime formatter,
    /// stored with the formatter accessor prefix already applied.
    Shorthand(UserCode),
}

impl ParameterFormat {
    pub fn code(&self) -> &UserCode {
        match self {
            ParameterFormat::Explicit(code) | ParameterFormat::Shorthand(code) => code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessagePart {
    Text(String),
    Formatting {
        parameter: String,
        format: Option<ParameterFormat>,
    },
    /// Reference to another message of the same translation. Only present
    /// before interpolations are resolved.
    Interpolation(String),
}

impl MessagePart {
    pub fn text(value: impl Into<String>) -> Self {
        MessagePart::Text(value.into())
    }

    pub fn formatting(parameter: impl Into<String>, format: Option<ParameterFormat>) -> Self {
        MessagePart::Formatting {
            parameter: parameter.into(),
            format,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub visibility: Visibility,
    pub content: Vec<MessagePart>,
    pub parameters: MessageParameterSet,
}

impl Message {
    pub fn new(
        visibility: Visibility,
        content: Vec<MessagePart>,
        parameters: MessageParameterSet,
    ) -> Self {
        Self {
            visibility,
            content: normalize(content),
            parameters,
        }
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

/// Merges adjacent text parts and drops empty ones.
pub fn normalize(parts: Vec<MessagePart>) -> Vec<MessagePart> {
    let mut result: Vec<MessagePart> = Vec::with_capacity(parts.len());
    for part in parts {
        if let MessagePart::Text(text) = &part {
            if text.is_empty() {
                continue;
            }
            if let Some(MessagePart::Text(previous)) = result.last_mut() {
                previous.push_str(text);
                continue;
            }
        }
        result.push(part);
    }
    result
}
