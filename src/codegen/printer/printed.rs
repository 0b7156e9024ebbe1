use std::fmt;

use unicode_width::UnicodeWidthStr;

const INDENTATION: &str = "  ";

/// Printed source code, kept as separate lines so that blocks can be
/// indented and glued together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrintedCode {
    lines: Vec<String>,
}

impl PrintedCode {
    pub fn new(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
        }
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_multiline(&self) -> bool {
        self.lines.len() > 1
    }

    pub fn first_line_width(&self) -> usize {
        self.lines.first().map_or(0, |line| line.width())
    }

    /// Stacks blocks vertically.
    pub fn join(blocks: impl IntoIterator<Item = PrintedCode>) -> Self {
        Self {
            lines: blocks.into_iter().flat_map(|block| block.lines).collect(),
        }
    }

    /// Glues blocks so that each one starts on the last line of the
    /// previous one.
    pub fn join_inline(blocks: impl IntoIterator<Item = PrintedCode>) -> Self {
        let mut result = PrintedCode::empty();
        for block in blocks {
            result.append_inline(block);
        }
        result
    }

    pub fn indent(&mut self) {
        for line in &mut self.lines {
            if !line.is_empty() {
                line.insert_str(0, INDENTATION);
            }
        }
    }

    pub fn prepend(&mut self, code: PrintedCode) {
        let mut lines = code.lines;
        lines.append(&mut self.lines);
        self.lines = lines;
    }

    pub fn append(&mut self, code: PrintedCode) {
        self.lines.extend(code.lines);
    }

    /// Puts `code` before the first line.
    pub fn prepend_inline(&mut self, code: PrintedCode) {
        let mut code = code;
        code.append_inline(std::mem::take(self));
        *self = code;
    }

    /// Puts `code` after the last line.
    pub fn append_inline(&mut self, code: PrintedCode) {
        let mut incoming = code.lines.into_iter();
        match (self.lines.last_mut(), incoming.next()) {
            (Some(last), Some(first)) => last.push_str(&first),
            (None, Some(first)) => self.lines.push(first),
            (_, None) => return,
        }
        self.lines.extend(incoming);
    }

    pub fn push_str(&mut self, text: &str) {
        self.append_inline(PrintedCode::new(text));
    }
}

impl From<&str> for PrintedCode {
    fn from(line: &str) -> Self {
        PrintedCode::new(line)
    }
}

impl From<String> for PrintedCode {
    fn from(line: String) -> Self {
        PrintedCode::new(line)
    }
}

impl fmt::Display for PrintedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}
