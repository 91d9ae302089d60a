//! String escaping for values substituted into quoted SQL literals.

/// How string values are escaped before substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeMode {
    /// Delegate to the connection's own escaping routine, which is correct
    /// for the connection's current character set.
    Native,
    /// Portable backslash escaping of quote and control characters.
    #[default]
    Backslash,
}

/// Backslash-escape quote and control characters.
///
/// Escapes single quote, double quote, backslash, NUL, LF, CR and ctrl-Z.
/// The output is safe inside a single-quoted literal for backends that honor
/// backslash escapes.
#[must_use]
pub fn backslash_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{1a}' => out.push_str("\\Z"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape by doubling single quotes, the standard-SQL rule used by backends
/// that do not honor backslash escapes.
#[must_use]
pub fn quote_escape(raw: &str) -> String {
    raw.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backslash_escapes_quotes_and_controls() {
        assert_eq!(backslash_escape("it's"), "it\\'s");
        assert_eq!(backslash_escape(r#"a"b"#), "a\\\"b");
        assert_eq!(backslash_escape("a\\b"), "a\\\\b");
        assert_eq!(backslash_escape("a\nb\rc\0d"), "a\\nb\\rc\\0d");
    }

    #[test]
    fn backslash_leaves_plain_text_alone() {
        assert_eq!(backslash_escape("plain text 123"), "plain text 123");
    }

    #[test]
    fn quote_escape_doubles_single_quotes() {
        assert_eq!(quote_escape("it's"), "it''s");
        assert_eq!(quote_escape("no quotes"), "no quotes");
    }
}
