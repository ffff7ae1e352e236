//! Coercion of raw values into the JSON value a field binds to.
//!
//! Path and query values arrive as text, body values as JSON; both end up as a [`Value`]
//! the target type is deserialized from.

use crate::binding::error::ErrorDetail;
use crate::binding::field::{Field, Kind, Presence};
use serde_json::{Number, Value};

/// A raw field value, as found in the request.
#[derive(Debug)]
pub(crate) enum Raw<'a> {
    Absent,
    /// every occurrence in the query string (or the single path segment), in order
    Text(Vec<&'a str>),
    Json(&'a Value),
}

pub(crate) fn resolve(field: &Field, raw: Raw<'_>) -> Result<Value, ErrorDetail> {
    match raw {
        Raw::Absent => absent(field),
        Raw::Text(values) if values.is_empty() => absent(field),
        Raw::Text(values) if field.kind() == Kind::StrList => {
            Ok(Value::Array(values.into_iter().map(Value::from).collect()))
        }
        // repeated scalar keys: the last occurrence wins
        Raw::Text(values) => from_text(field, values[values.len() - 1]),
        Raw::Json(Value::Null) if !field.is_required() => absent(field),
        Raw::Json(value) => from_json(field, value),
    }
}

fn absent(field: &Field) -> Result<Value, ErrorDetail> {
    match field.presence() {
        Presence::Required => Err(ErrorDetail::missing(field)),
        Presence::Optional => Ok(Value::Null),
        Presence::Default(default) => Ok(default.to_json()),
    }
}

fn from_text(field: &Field, text: &str) -> Result<Value, ErrorDetail> {
    match field.kind() {
        Kind::Str => check_length(field, text).map(|()| Value::from(text)),
        Kind::Int => parse_int(text).map(Value::from).ok_or_else(|| ErrorDetail::int_parsing(field, text.into())),
        Kind::Float => parse_float(text).ok_or_else(|| ErrorDetail::float_parsing(field, text.into())),
        Kind::Bool => parse_bool(text).map(Value::Bool).ok_or_else(|| ErrorDetail::bool_parsing(field, text.into())),
        Kind::Enum(values) => {
            if values.contains(&text) {
                Ok(Value::from(text))
            } else {
                Err(ErrorDetail::not_one_of(field, values, text.into()))
            }
        }
        Kind::StrList => Ok(Value::Array(vec![Value::from(text)])),
    }
}

fn from_json(field: &Field, value: &Value) -> Result<Value, ErrorDetail> {
    match (field.kind(), value) {
        (Kind::Str | Kind::Enum(_), Value::String(text)) => from_text(field, text),
        (Kind::Str | Kind::Enum(_), other) => Err(ErrorDetail::string_type(field, other.clone())),

        (Kind::Int, Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15).map(|f| f as i64))
            .map(Value::from)
            .ok_or_else(|| ErrorDetail::int_type(field, value.clone())),
        (Kind::Float, Value::Number(n)) => {
            n.as_f64().and_then(Number::from_f64).map(Value::Number).ok_or_else(|| ErrorDetail::float_type(field, value.clone()))
        }
        (Kind::Int | Kind::Float | Kind::Bool, Value::String(text)) => from_text(field, text),
        (Kind::Int, other) => Err(ErrorDetail::int_type(field, other.clone())),
        (Kind::Float, other) => Err(ErrorDetail::float_type(field, other.clone())),

        (Kind::Bool, Value::Bool(b)) => Ok(Value::Bool(*b)),
        (Kind::Bool, Value::Number(n)) => match n.as_u64() {
            Some(0) => Ok(Value::Bool(false)),
            Some(1) => Ok(Value::Bool(true)),
            _ => Err(ErrorDetail::bool_parsing(field, value.clone())),
        },
        (Kind::Bool, other) => Err(ErrorDetail::bool_type(field, other.clone())),

        (Kind::StrList, Value::Array(items)) => {
            if items.iter().all(Value::is_string) {
                Ok(value.clone())
            } else {
                Err(ErrorDetail::string_type(field, value.clone()))
            }
        }
        (Kind::StrList, other) => Err(ErrorDetail::list_type(field, other.clone())),
    }
}

fn check_length(field: &Field, text: &str) -> Result<(), ErrorDetail> {
    let len = text.chars().count();
    if let Some(min) = field.min_len().filter(|min| len < *min) {
        return Err(ErrorDetail::string_too_short(field, min, text.into()));
    }
    if let Some(max) = field.max_len().filter(|max| len > *max) {
        return Err(ErrorDetail::string_too_long(field, max, text.into()));
    }
    Ok(())
}

fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

fn parse_float(text: &str) -> Option<Value> {
    let f = text.trim().parse::<f64>().ok()?;
    Number::from_f64(f).map(Value::Number)
}

/// `1/true/on/yes/t/y` and `0/false/off/no/f/n`, case-insensitively.
pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" | "t" | "y" => Some(true),
        "0" | "false" | "off" | "no" | "f" | "n" => Some(false),
        _ => None,
    }
}
