//! Synchronous SQL string utilities.
//!
//! `format`, `escape` and `escape_id` are pure string functions with MySQL
//! quoting rules. They never touch the network and never fail, and behave
//! identically no matter which client flavor they are reached through.

use serde_json::Value;

/// Escape a value for interpolation into SQL text.
///
/// Strings are single-quoted with backslash escapes, numbers and booleans
/// render bare, `null` renders as `NULL`, arrays render comma-separated
/// (nested arrays parenthesized), and objects render as
/// `` `key` = value `` pairs.
pub fn escape(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => quote_string(text),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Array(_) => format!("({})", escape_items(item)),
                other => escape(other),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(entries) => entries
            .iter()
            .map(|(key, val)| format!("{} = {}", escape_id(key), escape(val)))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn escape_items(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(escape)
            .collect::<Vec<_>>()
            .join(", "),
        other => escape(other),
    }
}

/// Escape an identifier, quoting each dotted segment in backticks.
pub fn escape_id(identifier: &str) -> String {
    identifier
        .split('.')
        .map(|part| format!("`{}`", part.replace('`', "``")))
        .collect::<Vec<_>>()
        .join(".")
}

/// Render a SQL template, replacing `?` with escaped values and `??` with
/// escaped identifiers, in order. Placeholders beyond the provided values are
/// left in place.
pub fn format(template: &str, values: &[Value]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut next = 0usize;

    while let Some(ch) = chars.next() {
        if ch != '?' {
            out.push(ch);
            continue;
        }
        let doubled = chars.peek() == Some(&'?');
        if doubled {
            chars.next();
        }
        match values.get(next) {
            Some(value) if doubled => {
                next += 1;
                match value {
                    Value::String(identifier) => out.push_str(&escape_id(identifier)),
                    other => out.push_str(&escape(other)),
                }
            }
            Some(value) => {
                next += 1;
                out.push_str(&escape(value));
            }
            None => {
                out.push('?');
                if doubled {
                    out.push('?');
                }
            }
        }
    }
    out
}

fn quote_string(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for ch in text.chars() {
        match ch {
            '\0' => quoted.push_str("\\0"),
            '\u{8}' => quoted.push_str("\\b"),
            '\t' => quoted.push_str("\\t"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\u{1a}' => quoted.push_str("\\Z"),
            '\'' => quoted.push_str("\\'"),
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            other => quoted.push(other),
        }
    }
    quoted.push('\'');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_interpolates_values() {
        assert_eq!(
            format("SELECT ? AS `now`", &[json!(1)]),
            "SELECT 1 AS `now`"
        );
    }

    #[test]
    fn format_handles_identifier_placeholders() {
        assert_eq!(
            format("SELECT ?? FROM ?? WHERE id = ?", &[json!("name"), json!("users"), json!(7)]),
            "SELECT `name` FROM `users` WHERE id = 7"
        );
    }

    #[test]
    fn format_leaves_extra_placeholders_in_place() {
        assert_eq!(format("a = ? AND b = ?", &[json!(1)]), "a = 1 AND b = ?");
    }

    #[test]
    fn escape_quotes_strings() {
        assert_eq!(escape(&json!("userId")), "'userId'");
        assert_eq!(escape(&json!("it's")), r"'it\'s'");
        assert_eq!(escape(&json!("a\nb")), r"'a\nb'");
    }

    #[test]
    fn escape_renders_scalars_bare() {
        assert_eq!(escape(&json!(42)), "42");
        assert_eq!(escape(&json!(1.5)), "1.5");
        assert_eq!(escape(&json!(true)), "true");
        assert_eq!(escape(&Value::Null), "NULL");
    }

    #[test]
    fn escape_joins_arrays() {
        assert_eq!(escape(&json!([1, "a", null])), "1, 'a', NULL");
        assert_eq!(escape(&json!([[1, 2], [3]])), "(1, 2), (3)");
    }

    #[test]
    fn escape_id_quotes_dotted_identifiers() {
        assert_eq!(escape_id("posts.date"), "`posts`.`date`");
        assert_eq!(escape_id("id"), "`id`");
        assert_eq!(escape_id("weird`name"), "`weird``name`");
    }
}
