//! The query template compiler.
//!
//! Rewrites a placeholder-bearing SQL template into a fully-substituted,
//! escaped SQL string. The placeholder mini-language is deliberately small:
//! `%d` (integer), `%f` (float), `%s` (string, auto-quoted) and `%%` for a
//! literal percent sign. There is no width, precision, sign or positional
//! support.
//!
//! ```rust
//! use sql_prep::escape::backslash_escape;
//! use sql_prep::template::compile;
//! use sql_prep::SqlValue;
//!
//! let sql = compile(
//!     "SELECT * FROM t WHERE c = %s AND n = %d",
//!     &[SqlValue::Text("it's".into()), SqlValue::Int(7)],
//!     backslash_escape,
//! )
//! .unwrap();
//! assert_eq!(sql, "SELECT * FROM t WHERE c = 'it\\'s' AND n = 7");
//! ```

use std::borrow::Cow;

mod scanner;

use scanner::{Token, tokenize};

use crate::error::SqlPrepError;
use crate::types::{FormatSpec, SqlValue};

/// Compile a template into final SQL.
///
/// Passes, in order: already-quoted `'%s'`/`"%s"` placeholders are unquoted
/// so the quoting step cannot double-quote; every `%s` is wrapped in single
/// quotes; each argument is escaped through `escape` in positional order;
/// placeholders are filled positionally. `%d` and `%f` emit bare numeric
/// literals.
///
/// # Errors
///
/// `TemplateMismatch` when placeholder and argument counts disagree,
/// `ParameterError` when a value cannot be rendered under its specifier.
pub fn compile<F>(template: &str, args: &[SqlValue], escape: F) -> Result<String, SqlPrepError>
where
    F: Fn(&str) -> String,
{
    let normalized = unquote_prequoted(template);
    let tokens = tokenize(&normalized);

    let expected = tokens
        .iter()
        .filter(|t| matches!(t, Token::Placeholder(_)))
        .count();
    if expected != args.len() {
        return Err(SqlPrepError::TemplateMismatch {
            expected,
            provided: args.len(),
        });
    }

    let mut out = String::with_capacity(normalized.len() + 16 * args.len());
    let mut taken = 0;
    for token in tokens {
        match token {
            Token::Fragment(text) => out.push_str(text),
            Token::Percent => out.push('%'),
            Token::Placeholder(spec) => {
                render_into(&mut out, spec, &args[taken], &escape)?;
                taken += 1;
            }
        }
    }
    Ok(out)
}

/// Undo caller quoting of `%s` so the quoting pass stays idempotent.
fn unquote_prequoted(template: &str) -> Cow<'_, str> {
    if template.contains("'%s'") || template.contains("\"%s\"") {
        Cow::Owned(template.replace("'%s'", "%s").replace("\"%s\"", "%s"))
    } else {
        Cow::Borrowed(template)
    }
}

fn render_into<F>(
    out: &mut String,
    spec: FormatSpec,
    value: &SqlValue,
    escape: &F,
) -> Result<(), SqlPrepError>
where
    F: Fn(&str) -> String,
{
    match spec {
        FormatSpec::Integer => {
            out.push_str(&integer_literal(value)?.to_string());
        }
        FormatSpec::Float => {
            // Fixed six fractional digits.
            out.push_str(&format!("{:.6}", float_literal(value)?));
        }
        FormatSpec::Text => {
            out.push('\'');
            out.push_str(&escape(&text_form(value)?));
            out.push('\'');
        }
    }
    Ok(())
}

fn integer_literal(value: &SqlValue) -> Result<i64, SqlPrepError> {
    match value {
        SqlValue::Null => Ok(0),
        SqlValue::Int(i) => Ok(*i),
        // Truncation toward zero.
        SqlValue::Float(f) => Ok(f.trunc() as i64),
        SqlValue::Bool(b) => Ok(i64::from(*b)),
        SqlValue::Text(s) => {
            let trimmed = s.trim();
            if let Ok(i) = trimmed.parse::<i64>() {
                return Ok(i);
            }
            if let Ok(f) = trimmed.parse::<f64>() {
                return Ok(f.trunc() as i64);
            }
            Err(SqlPrepError::ParameterError(format!(
                "cannot render {s:?} as an integer literal"
            )))
        }
        SqlValue::Blob(_) => Err(SqlPrepError::ParameterError(
            "cannot render binary data as an integer literal".into(),
        )),
    }
}

fn float_literal(value: &SqlValue) -> Result<f64, SqlPrepError> {
    match value {
        SqlValue::Null => Ok(0.0),
        SqlValue::Int(i) => Ok(*i as f64),
        SqlValue::Float(f) => Ok(*f),
        SqlValue::Bool(b) => Ok(f64::from(u8::from(*b))),
        SqlValue::Text(s) => s.trim().parse::<f64>().map_err(|_| {
            SqlPrepError::ParameterError(format!("cannot render {s:?} as a float literal"))
        }),
        SqlValue::Blob(_) => Err(SqlPrepError::ParameterError(
            "cannot render binary data as a float literal".into(),
        )),
    }
}

fn text_form(value: &SqlValue) -> Result<Cow<'_, str>, SqlPrepError> {
    match value {
        SqlValue::Null => Ok(Cow::Borrowed("")),
        SqlValue::Int(i) => Ok(Cow::Owned(i.to_string())),
        SqlValue::Float(f) => Ok(Cow::Owned(f.to_string())),
        SqlValue::Bool(b) => Ok(Cow::Borrowed(if *b { "1" } else { "0" })),
        SqlValue::Text(s) => Ok(Cow::Borrowed(s)),
        SqlValue::Blob(_) => Err(SqlPrepError::ParameterError(
            "cannot render binary data as a string literal".into(),
        )),
    }
}
