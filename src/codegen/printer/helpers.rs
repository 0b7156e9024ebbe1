use super::PrintedCode;
use crate::utils::count_occurrences;

/// Lists whose items fit in this many columns are printed on one line.
pub const INLINE_LIST_MAX_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListLayout {
    /// One line if it fits, one item per line otherwise.
    Auto,
    Inline,
}

const ESCAPE_SEQUENCES: &[(char, &str)] = &[
    ('\\', "\\\\"),
    ('\0', "\\0"),
    ('\n', "\\n"),
    ('\r', "\\r"),
    ('\u{0B}', "\\v"),
    ('\t', "\\t"),
    ('\u{08}', "\\b"),
    ('\u{0C}', "\\f"),
];

fn escape_with(value: &str, extra: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(value.len());
    let mut rest = value;
    'outer: while let Some(c) = rest.chars().next() {
        for (pattern, replacement) in extra {
            if rest.starts_with(pattern) {
                result.push_str(replacement);
                rest = &rest[pattern.len()..];
                continue 'outer;
            }
        }
        match ESCAPE_SEQUENCES.iter().find(|(special, _)| *special == c) {
            Some((_, escaped)) => result.push_str(escaped),
            None => result.push(c),
        }
        rest = &rest[c.len_utf8()..];
    }
    result
}

/// Prints a string literal, quoted with whichever quote needs less
/// escaping. Ties go to single quotes.
pub fn quote_string(value: &str) -> String {
    let single = count_occurrences("'", value);
    let double = count_occurrences("\"", value);
    if single > double {
        format!("\"{}\"", escape_with(value, &[("\"", "\\\"")]))
    } else {
        format!("'{}'", escape_with(value, &[("'", "\\'")]))
    }
}

/// Escapes the raw text of a template literal segment.
pub fn escape_template_string(value: &str) -> String {
    escape_with(value, &[("`", "\\`"), ("${", "\\${")])
}

/// Wraps statements in braces, or prints `{ }` when there are none.
pub fn wrap_in_block(content: PrintedCode) -> PrintedCode {
    if content.line_count() == 0 {
        return PrintedCode::new("{ }");
    }
    let mut block = content;
    block.indent();
    block.prepend(PrintedCode::new("{"));
    block.append(PrintedCode::new("}"));
    block
}

/// Prints a bracketed, comma-separated list of items.
///
/// With [`ListLayout::Auto`] the list stays on one line unless an item
/// spans several lines or the items are wider than
/// [`INLINE_LIST_MAX_WIDTH`] in total.
pub fn print_list(
    open: &str,
    items: Vec<PrintedCode>,
    close: &str,
    layout: ListLayout,
) -> PrintedCode {
    if items.is_empty() {
        return PrintedCode::new(format!("{}{}", open, close));
    }

    let fits = !items.iter().any(PrintedCode::is_multiline)
        && items.iter().map(PrintedCode::first_line_width).sum::<usize>()
            <= INLINE_LIST_MAX_WIDTH;

    if layout == ListLayout::Inline || fits {
        // Braces get inner padding, brackets do not
        let padding = if open == "{" { " " } else { "" };
        let mut line = PrintedCode::new(format!("{}{}", open, padding));
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                line.push_str(", ");
            }
            line.append_inline(item);
        }
        line.push_str(&format!("{}{}", padding, close));
        return line;
    }

    let mut body = PrintedCode::join(items.into_iter().map(|mut item| {
        item.push_str(",");
        item
    }));
    body.indent();
    body.prepend(PrintedCode::new(open));
    body.append(PrintedCode::new(close));
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_quote_string_prefers_single_quotes() {
        assert_eq!(quote_string("hello"), "'hello'");
        assert_eq!(quote_string(""), "''");
        assert_eq!(quote_string("a\"b'c"), "'a\"b\\'c'");
    }

    #[test]
    fn test_quote_string_switches_to_double_quotes() {
        assert_eq!(quote_string("it's"), "\"it's\"");
        assert_eq!(
            quote_string("'one' 'two' \"x\""),
            "\"'one' 'two' \\\"x\\\"\""
        );
    }

    #[test]
    fn test_quote_string_escapes_every_quote() {
        assert_eq!(quote_string("a'b\"c\"d"), "'a\\'b\"c\"d'");
        assert_eq!(quote_string("''x'\"\""), "\"''x'\\\"\\\"\"");
    }

    #[test]
    fn test_quote_string_escapes_control_characters() {
        assert_eq!(
            quote_string("a\\b\nc\td\0e\r\u{0B}\u{08}\u{0C}"),
            "'a\\\\b\\nc\\td\\0e\\r\\v\\b\\f'"
        );
    }

    #[test]
    fn test_escape_template_string() {
        assert_eq!(escape_template_string("cost: ${x} `y`"), "cost: \\${x} \\`y\\`");
        assert_eq!(escape_template_string("$5 {a}"), "$5 {a}");
        assert_eq!(escape_template_string("line\nbreak"), "line\\nbreak");
    }

    #[test]
    fn test_wrap_in_block() {
        assert_eq!(wrap_in_block(PrintedCode::empty()).to_string(), "{ }");
        assert_eq!(
            wrap_in_block(PrintedCode::new("return 1;")).to_string(),
            "{\n  return 1;\n}"
        );
    }

    #[test]
    fn test_print_list_empty() {
        assert_eq!(print_list("{", vec![], "}", ListLayout::Auto).to_string(), "{}");
        assert_eq!(print_list("[", vec![], "]", ListLayout::Auto).to_string(), "[]");
    }

    #[test]
    fn test_print_list_inline_when_short() {
        let items = vec![PrintedCode::new("id: 'en'"), PrintedCode::new("x: 1")];
        assert_eq!(
            print_list("{", items, "}", ListLayout::Auto).to_string(),
            "{ id: 'en', x: 1 }"
        );

        let items = vec![PrintedCode::new("a"), PrintedCode::new("b")];
        assert_eq!(print_list("[", items, "]", ListLayout::Auto).to_string(), "[a, b]");
    }

    #[test]
    fn test_print_list_breaks_when_too_wide() {
        let items = vec![
            PrintedCode::new("a".repeat(30)),
            PrintedCode::new("b".repeat(31)),
        ];
        assert_eq!(
            print_list("[", items, "]", ListLayout::Auto).to_string(),
            format!("[\n  {},\n  {},\n]", "a".repeat(30), "b".repeat(31))
        );
    }

    #[test]
    fn test_print_list_width_threshold_is_inclusive() {
        let items = vec![
            PrintedCode::new("a".repeat(30)),
            PrintedCode::new("b".repeat(30)),
        ];
        assert!(!print_list("[", items, "]", ListLayout::Auto).is_multiline());
    }

    #[test]
    fn test_print_list_breaks_around_multiline_item() {
        let nested = PrintedCode::from_lines(vec!["{".into(), "  a: 1,".into(), "}".into()]);
        let items = vec![nested, PrintedCode::new("b")];
        assert_eq!(
            print_list("[", items, "]", ListLayout::Auto).to_string(),
            "[\n  {\n    a: 1,\n  },\n  b,\n]"
        );
    }

    #[test]
    fn test_print_list_forced_inline() {
        let items = vec![
            PrintedCode::new("a".repeat(40)),
            PrintedCode::new("b".repeat(40)),
        ];
        let printed = print_list("{", items, "}", ListLayout::Inline);
        assert_eq!(printed.line_count(), 1);
    }
}
