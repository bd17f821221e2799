//! Literal rendering: typed SQL literals from runtime values.
//!
//! Every value-bearing literal path in the crate goes through
//! [`render_literal`]. String-ish types single-quote their value with
//! embedded quotes doubled, which is the injection defense for all
//! caller-supplied data.

use serde_json::{Number, Value};

use crate::compile::{CompileError, CompileResult};
use crate::model::FilterType;

/// Render one value as a SQL literal of the declared type.
///
/// List and range types do not reach this function whole; their callers
/// render each element with [`FilterType::element_type`].
pub fn render_literal(key: &str, value: &Value, filter_type: FilterType) -> CompileResult<String> {
    match filter_type {
        FilterType::Number | FilterType::NumberList => render_number(key, value),
        FilterType::Boolean => render_boolean(key, value),
        // string, date, timestamp and the list/range element fallbacks
        // all render as escaped single-quoted strings.
        FilterType::String
        | FilterType::Date
        | FilterType::Timestamp
        | FilterType::StringList
        | FilterType::DateRange
        | FilterType::TimestampRange => render_quoted(key, value),
    }
}

/// Single-quote a string with embedded `'` doubled.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn render_number(key: &str, value: &Value) -> CompileResult<String> {
    match value {
        Value::Number(n) => Ok(format_number(n)),
        // The authoring format frequently carries numbers as strings;
        // coerce, rejecting anything non-numeric.
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(i) = trimmed.parse::<i64>() {
                return Ok(i.to_string());
            }
            match trimmed.parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(format_float(f)),
                _ => Err(invalid(
                    key,
                    format!("'{}' is not a valid number", s),
                )),
            }
        }
        other => Err(invalid(
            key,
            format!("expected a number, got {}", kind_name(other)),
        )),
    }
}

fn render_boolean(key: &str, value: &Value) -> CompileResult<String> {
    match value {
        Value::Bool(true) => Ok("TRUE".to_string()),
        Value::Bool(false) => Ok("FALSE".to_string()),
        other => Err(invalid(
            key,
            format!("expected a boolean, got {}", kind_name(other)),
        )),
    }
}

fn render_quoted(key: &str, value: &Value) -> CompileResult<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        // Numbers and booleans handed to a string-ish type are
        // stringified, then quoted like any other value.
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => {
            // Emptiness is filtered out by the resolver; a null here is
            // a compiler invariant breach, not a silent empty literal.
            return Err(invalid(key, "null cannot be rendered as a SQL literal"));
        }
        Value::Array(_) | Value::Object(_) => {
            return Err(invalid(
                key,
                format!("cannot render {} as a scalar literal", kind_name(value)),
            ));
        }
    };
    Ok(quote_string(&text))
}

fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        // serde_json numbers are never NaN or infinite.
        format_float(n.as_f64().unwrap_or_default())
    }
}

fn format_float(f: f64) -> String {
    let mut buffer = ryu::Buffer::new();
    buffer.format(f).to_string()
}

/// Human-readable shape name for error messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn invalid(key: &str, message: impl Into<String>) -> CompileError {
    CompileError::InvalidValue {
        key: key.to_string(),
        message: message.into(),
    }
}
