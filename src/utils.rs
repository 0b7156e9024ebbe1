//! Common utility functions shared across the codebase.

use rand::RngCore;

/// Returns 8 random lowercase hexadecimal digits.
pub fn random_hex() -> String {
    format!("{:08x}", rand::thread_rng().next_u32())
}

/// Counts non-overlapping occurrences of `pattern` in `text`.
///
/// # Examples
///
/// ```
/// use elzii_tools::utils::count_occurrences;
///
/// assert_eq!(count_occurrences("'", "it's 'quoted'"), 3);
/// assert_eq!(count_occurrences("aa", "aaaa"), 2);
/// assert_eq!(count_occurrences("x", ""), 0);
/// ```
pub fn count_occurrences(pattern: &str, text: &str) -> usize {
    if pattern.is_empty() {
        return text.chars().count() + 1;
    }
    text.matches(pattern).count()
}

/// Whether `name` is a valid JavaScript identifier (ASCII subset).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_identifier_start(c) => chars.all(is_identifier_part),
        _ => false,
    }
}

/// Words that cannot name a parameter in strict-mode TypeScript.
const RESERVED_WORDS: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Whether `name` is reserved and cannot be used as a parameter name.
///
/// # Examples
///
/// ```
/// use elzii_tools::utils::is_reserved_word;
///
/// assert!(is_reserved_word("class"));
/// assert!(!is_reserved_word("className"));
/// ```
pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

pub fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}

/// Turns an arbitrary string into a valid identifier by replacing
/// forbidden characters with `_`.
///
/// # Examples
///
/// ```
/// use elzii_tools::utils::to_identifier;
///
/// assert_eq!(to_identifier("en-UK_Locale"), "en_UK_Locale");
/// assert_eq!(to_identifier("1st"), "_1st");
/// ```
pub fn to_identifier(name: &str) -> String {
    let mut result: String = name
        .chars()
        .map(|c| if is_identifier_part(c) { c } else { '_' })
        .collect();
    if !result.starts_with(is_identifier_start) {
        result.insert(0, '_');
    }
    result
}

/// Joins items as English prose: `a`, `a and b`, `a, b and c`.
///
/// At most `limit` items are shown; the rest collapse into `…`.
pub fn join_with_and<S: AsRef<str>>(items: &[S], limit: usize) -> String {
    let items: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
    match items.len() {
        0 => String::new(),
        1 => items[0].to_string(),
        n if n <= limit => format!("{} and {}", items[..n - 1].join(", "), items[n - 1]),
        _ => format!("{} and \u{2026}", items[..limit].join(", ")),
    }
}
