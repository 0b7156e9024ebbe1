//! Recursive-descent parser for `.tm` translation files.
//!
//! ```text
//! # comment
//! @{ import { something } from './somewhere' }
//! @default
//! greeting = 'Hello, {name}!'
//! total = "{count:number} items"
//! (brand) = 'Elzii'
//! welcome = 'Welcome to {@brand}'
//! ```
//!
//! Syntax errors abort the parse of the file. Problems that leave the
//! structure intact (unknown escapes, bad directives, stray braces, reserved
//! parameter names) are collected in the returned [`ErrorReport`] instead.

use crate::error::{Built, ErrorReport, Position, TmError};
use crate::model::{
    Directive, DirectiveCollection, FORMATTER_ACCESSOR, MessageParameter, MessageParameterSet,
    MessagePart, ParameterFormat, UserCode, Visibility, normalize,
};
use crate::utils::{is_identifier_part, is_identifier_start, is_reserved_word};

/// Escape sequences allowed inside message text, after a backslash.
const ESCAPES: &[(char, char)] = &[
    ('\\', '\\'),
    ('n', '\n'),
    ('t', '\t'),
    ('r', '\r'),
    ('\'', '\''),
    ('"', '"'),
];

/// A message as written in the file, before interpolations are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDefinition {
    pub key: String,
    pub visibility: Visibility,
    pub content: Vec<MessagePart>,
    pub parameters: MessageParameterSet,
    pub position: Position,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TmDocument {
    pub header: Option<UserCode>,
    pub directives: DirectiveCollection,
    pub messages: Vec<MessageDefinition>,
}

pub fn parse_tm(source: &str) -> Result<Built<TmDocument>, TmError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut parser = Parser::new(source);
    let document = parser.parse_document()?;
    Ok(Built::new(document, parser.errors))
}

struct Parser {
    chars: Vec<char>,
    index: usize,
    line: usize,
    col: usize,
    errors: ErrorReport,
}

impl Parser {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            index: 0,
            line: 1,
            col: 1,
            errors: ErrorReport::new(),
        }
    }

    // ============================================================
    // Statements
    // ============================================================

    fn parse_document(&mut self) -> Result<TmDocument, TmError> {
        let mut document = TmDocument::default();

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some('#') => self.skip_line(),
                Some('@') if self.peek_at(1) == Some('{') => self.parse_header(&mut document)?,
                Some('@') => self.parse_directive(&mut document.directives)?,
                Some('(') => {
                    let message = self.parse_message(Visibility::Private)?;
                    document.messages.push(message);
                }
                Some(c) if is_identifier_start(c) => {
                    let message = self.parse_message(Visibility::Public)?;
                    document.messages.push(message);
                }
                Some(c) => return Err(self.syntax_error(format!("Unexpected character '{}'", c))),
            }
        }

        Ok(document)
    }

    fn parse_header(&mut self, document: &mut TmDocument) -> Result<(), TmError> {
        let start = self.position();
        self.bump(); // @
        self.bump(); // {

        let mut code = String::new();
        let mut depth = 1;
        loop {
            match self.bump() {
                None => return Err(TmError::parser("Unterminated header block", start)),
                Some('{') => {
                    depth += 1;
                    code.push('{');
                }
                Some('}') => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                    code.push('}');
                }
                Some(c) => code.push(c),
            }
        }

        if document.header.is_some() {
            return Err(TmError::parser(
                "Only one header block is allowed per file",
                start,
            ));
        }
        document.header = Some(UserCode::new(code.trim()));

        self.expect_end_of_statement("header block")
    }

    fn parse_directive(&mut self, directives: &mut DirectiveCollection) -> Result<(), TmError> {
        let start = self.position();
        self.bump(); // @

        let name = self.read_identifier();
        if name.is_empty() {
            return Err(self.syntax_error("Expected a directive name after '@'"));
        }

        let mut rest = String::new();
        while let Some(c) = self.peek() {
            if c == '\n' || c == '#' {
                break;
            }
            rest.push(c);
            self.bump();
        }
        if self.peek() == Some('#') {
            self.skip_line();
        }

        let args: Vec<String> = rest
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|arg| !arg.is_empty())
            .map(String::from)
            .collect();

        match Directive::build(&name, &args) {
            Ok(directive) => {
                if let Err(err) = directives.add(directive) {
                    self.errors.push(err.at(start));
                }
            }
            Err(err) => self.errors.push(err.at(start)),
        }

        Ok(())
    }

    fn parse_message(&mut self, visibility: Visibility) -> Result<MessageDefinition, TmError> {
        let position = self.position();

        let key = match visibility {
            Visibility::Public => self.read_identifier(),
            Visibility::Private => {
                self.bump(); // (
                self.skip_inline_whitespace();
                let key = self.read_identifier();
                self.skip_inline_whitespace();
                if key.is_empty() || !self.eat(')') {
                    return Err(self.syntax_error("Expected a private message key like '(key)'"));
                }
                key
            }
        };

        self.skip_inline_whitespace();
        if !self.eat('=') {
            return Err(self.syntax_error(format!("Expected '=' after message key '{}'", key)));
        }
        self.skip_inline_whitespace();

        let (content, parameters) = match self.peek() {
            Some(quote @ ('\'' | '"')) => self.parse_text(quote)?,
            _ => return Err(self.syntax_error("Expected a quoted message text")),
        };

        self.expect_end_of_statement("message")?;

        Ok(MessageDefinition {
            key,
            visibility,
            content,
            parameters,
            position,
        })
    }

    // ============================================================
    // Message text
    // ============================================================

    fn parse_text(
        &mut self,
        quote: char,
    ) -> Result<(Vec<MessagePart>, MessageParameterSet), TmError> {
        let start = self.position();
        self.bump(); // opening quote

        let mut parts = Vec::new();
        let mut text = String::new();
        let mut parameters = MessageParameterSet::new();

        loop {
            let position = self.position();
            match self.bump() {
                None | Some('\n') => {
                    return Err(TmError::parser("Unterminated message text", start));
                }
                Some(c) if c == quote => break,
                Some('\\') => match self.bump() {
                    None | Some('\n') => {
                        return Err(TmError::parser("Unterminated message text", start));
                    }
                    Some(escaped) => match unescape(escaped) {
                        Some(value) => text.push(value),
                        None => self.errors.push(
                            TmError::parser(
                                format!("Unknown escape sequence '\\{}'", escaped),
                                position,
                            )
                            .with_details([known_escapes()]),
                        ),
                    },
                },
                Some('{') if self.peek() == Some('{') => {
                    self.bump();
                    text.push('{');
                }
                Some('}') if self.peek() == Some('}') => {
                    self.bump();
                    text.push('}');
                }
                Some('}') => self.errors.push(TmError::parser(
                    "Unmatched '}' in message text (use '}}' for a literal brace)",
                    position,
                )),
                Some('{') => {
                    if !text.is_empty() {
                        parts.push(MessagePart::Text(std::mem::take(&mut text)));
                    }
                    parts.push(self.parse_placeholder(&mut parameters)?);
                }
                Some(c) => text.push(c),
            }
        }

        parts.push(MessagePart::Text(text));
        Ok((normalize(parts), parameters))
    }

    /// Parses what follows an opening `{`, up to and including the closing `}`.
    fn parse_placeholder(
        &mut self,
        parameters: &mut MessageParameterSet,
    ) -> Result<MessagePart, TmError> {
        self.skip_inline_whitespace();

        if self.eat('@') {
            let name = self.read_identifier();
            if name.is_empty() {
                return Err(self.syntax_error("Expected a message name after '{@'"));
            }
            self.skip_inline_whitespace();
            if !self.eat('}') {
                return Err(self.syntax_error(format!("Expected '}}' after '{{@{}'", name)));
            }
            return Ok(MessagePart::Interpolation(name));
        }

        let name_position = self.position();
        let name = self.read_identifier();
        if name.is_empty() {
            return Err(self.syntax_error("Expected a parameter name after '{'"));
        }
        if is_reserved_word(&name) {
            self.errors.push(TmError::parser(
                format!("Parameter name '{}' is a reserved word", name),
                name_position,
            ));
        }
        self.skip_inline_whitespace();

        let format = match self.peek() {
            Some('}') => {
                self.bump();
                None
            }
            Some('|') => {
                self.bump();
                Some(ParameterFormat::Explicit(self.read_format_code(&name)?))
            }
            Some(':') => {
                self.bump();
                Some(ParameterFormat::Shorthand(self.read_format_code(&name)?))
            }
            Some(c) => {
                return Err(self.syntax_error(format!(
                    "Unexpected character '{}' in parameter '{}'",
                    c, name
                )));
            }
            None => return Err(self.syntax_error("Unterminated message text")),
        };

        // hints come from the code as written, before any prefixing
        let type_hint = format
            .as_ref()
            .map(|f| f.code().type_hint())
            .unwrap_or_default();
        parameters.add(MessageParameter::new(name.clone(), type_hint));

        let format = format.map(|f| match f {
            ParameterFormat::Shorthand(code) => {
                ParameterFormat::Shorthand(code.with_prefix(&format!("{}.", FORMATTER_ACCESSOR)))
            }
            explicit => explicit,
        });

        Ok(MessagePart::formatting(name, format))
    }

    /// Reads format code up to the `}` closing the placeholder, keeping
    /// nested braces balanced.
    fn read_format_code(&mut self, parameter: &str) -> Result<UserCode, TmError> {
        let start = self.position();
        let mut code = String::new();
        let mut depth = 0usize;

        loop {
            match self.bump() {
                None | Some('\n') => {
                    return Err(TmError::parser(
                        format!("Unterminated format for parameter '{}'", parameter),
                        start,
                    ));
                }
                Some('{') => {
                    depth += 1;
                    code.push('{');
                }
                Some('}') if depth == 0 => break,
                Some('}') => {
                    depth -= 1;
                    code.push('}');
                }
                Some(c) => code.push(c),
            }
        }

        let code = code.trim();
        if code.is_empty() {
            return Err(TmError::parser(
                format!("Empty format for parameter '{}'", parameter),
                start,
            ));
        }
        Ok(UserCode::new(code))
    }

    // ============================================================
    // Cursor helpers
    // ============================================================

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.index + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.index += 1;
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.col)
    }

    fn syntax_error(&self, message: impl Into<String>) -> TmError {
        TmError::parser(message, self.position())
    }

    fn read_identifier(&mut self) -> String {
        let mut name = String::new();
        if let Some(c) = self.peek()
            && is_identifier_start(c)
        {
            while let Some(c) = self.peek() {
                if !is_identifier_part(c) {
                    break;
                }
                name.push(c);
                self.bump();
            }
        }
        name
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn skip_inline_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c != '\n' && c.is_whitespace()) {
            self.bump();
        }
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn expect_end_of_statement(&mut self, what: &str) -> Result<(), TmError> {
        self.skip_inline_whitespace();
        match self.peek() {
            None | Some('\n') => Ok(()),
            Some('#') => {
                self.skip_line();
                Ok(())
            }
            Some(c) => Err(self.syntax_error(format!(
                "Unexpected character '{}' after {}",
                c, what
            ))),
        }
    }
}

fn known_escapes() -> String {
    let escapes: Vec<String> = ESCAPES
        .iter()
        .map(|(escape, _)| format!("\\{}", escape))
        .collect();
    format!("known escapes: {}", escapes.join(" "))
}

fn unescape(c: char) -> Option<char> {
    ESCAPES
        .iter()
        .find(|(escape, _)| *escape == c)
        .map(|(_, value)| *value)
}
