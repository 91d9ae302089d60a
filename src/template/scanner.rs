use crate::types::FormatSpec;

pub(super) enum Token<'a> {
    /// Verbatim template text.
    Fragment(&'a str),
    /// `%d`, `%f` or `%s` — consumes one argument.
    Placeholder(FormatSpec),
    /// `%%` — renders one literal percent, consumes nothing.
    Percent,
}

/// Split a template into fragments and placeholders.
///
/// `%` followed by anything other than `d`, `f`, `s` or `%` is ordinary
/// text; the mini-language has no width/precision/sign/positional forms.
pub(super) fn tokenize(sql: &str) -> Vec<Token<'_>> {
    let bytes = sql.as_bytes();
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut idx = 0;
    while idx < bytes.len() {
        if bytes[idx] == b'%' && idx + 1 < bytes.len() {
            let token = match bytes[idx + 1] {
                b'd' => Some(Token::Placeholder(FormatSpec::Integer)),
                b'f' => Some(Token::Placeholder(FormatSpec::Float)),
                b's' => Some(Token::Placeholder(FormatSpec::Text)),
                b'%' => Some(Token::Percent),
                _ => None,
            };
            if let Some(token) = token {
                if start < idx {
                    tokens.push(Token::Fragment(&sql[start..idx]));
                }
                tokens.push(token);
                idx += 2;
                start = idx;
                continue;
            }
        }
        idx += 1;
    }
    if start < bytes.len() {
        tokens.push(Token::Fragment(&sql[start..]));
    }
    tokens
}
