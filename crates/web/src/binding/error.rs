use crate::binding::field::{Field, Location};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// One failing field, rendered as an entry of the `detail` array of a 422 response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    kind: &'static str,
    /// `[location, name]`, or `["body", offset]` when the body isn't valid JSON
    loc: Vec<Value>,
    msg: String,
    input: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    ctx: Option<Value>,
}

impl ErrorDetail {
    fn new(kind: &'static str, field: &Field, msg: impl Into<String>, input: Value) -> Self {
        Self {
            kind,
            loc: vec![Value::from(field.location().as_str()), Value::from(field.wire_name())],
            msg: msg.into(),
            input,
            ctx: None,
        }
    }

    fn with_ctx(self, ctx: Value) -> Self {
        Self { ctx: Some(ctx), ..self }
    }

    pub fn missing(field: &Field) -> Self {
        Self::new("missing", field, "Field required", Value::Null)
    }

    pub fn string_too_short(field: &Field, min_length: usize, input: Value) -> Self {
        let msg = format!("String should have at least {min_length} {}", characters(min_length));
        Self::new("string_too_short", field, msg, input).with_ctx(json!({ "min_length": min_length }))
    }

    pub fn string_too_long(field: &Field, max_length: usize, input: Value) -> Self {
        let msg = format!("String should have at most {max_length} {}", characters(max_length));
        Self::new("string_too_long", field, msg, input).with_ctx(json!({ "max_length": max_length }))
    }

    pub fn string_type(field: &Field, input: Value) -> Self {
        Self::new("string_type", field, "Input should be a valid string", input)
    }

    pub fn int_parsing(field: &Field, input: Value) -> Self {
        Self::new("int_parsing", field, "Input should be a valid integer, unable to parse string as an integer", input)
    }

    pub fn int_type(field: &Field, input: Value) -> Self {
        Self::new("int_type", field, "Input should be a valid integer", input)
    }

    pub fn float_parsing(field: &Field, input: Value) -> Self {
        Self::new("float_parsing", field, "Input should be a valid number, unable to parse string as a number", input)
    }

    pub fn float_type(field: &Field, input: Value) -> Self {
        Self::new("float_type", field, "Input should be a valid number", input)
    }

    pub fn bool_parsing(field: &Field, input: Value) -> Self {
        Self::new("bool_parsing", field, "Input should be a valid boolean, unable to interpret input", input)
    }

    pub fn bool_type(field: &Field, input: Value) -> Self {
        Self::new("bool_type", field, "Input should be a valid boolean", input)
    }

    pub fn list_type(field: &Field, input: Value) -> Self {
        Self::new("list_type", field, "Input should be a valid list", input)
    }

    pub fn not_one_of(field: &Field, expected: &[&str], input: Value) -> Self {
        let expected = expected_literals(expected);
        Self::new("enum", field, format!("Input should be {expected}"), input).with_ctx(json!({ "expected": expected }))
    }

    /// A required body was sent empty.
    pub fn missing_body() -> Self {
        Self {
            kind: "missing",
            loc: vec![Value::from(Location::Body.as_str())],
            msg: "Field required".to_owned(),
            input: Value::Null,
            ctx: None,
        }
    }

    /// The body is not valid JSON at all, `loc` ends with the character offset of the error.
    pub fn json_invalid(error: &serde_json::Error, body: &[u8]) -> Self {
        Self {
            kind: "json_invalid",
            loc: vec![Value::from(Location::Body.as_str()), Value::from(char_offset(body, error.line(), error.column()))],
            msg: "JSON decode error".to_owned(),
            input: json!({}),
            ctx: Some(json!({ "error": error.to_string() })),
        }
    }

    /// The body is valid JSON, but not an object.
    pub fn not_an_object(input: Value) -> Self {
        Self {
            kind: "model_attributes_type",
            loc: vec![Value::from(Location::Body.as_str())],
            msg: "Input should be a valid dictionary or object to extract fields from".to_owned(),
            input,
            ctx: None,
        }
    }

    /// Every field bound, but the values don't fit the target type.
    pub fn model(location: Location, error: &serde_json::Error) -> Self {
        Self {
            kind: "value_error",
            loc: vec![Value::from(location.as_str())],
            msg: error.to_string(),
            input: Value::Null,
            ctx: None,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn loc(&self) -> &[Value] {
        &self.loc
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }
}

/// Turns serde_json's 1-based `line` and `column` (in bytes) into a 0-based character offset.
fn char_offset(body: &[u8], line: usize, column: usize) -> usize {
    let text = String::from_utf8_lossy(body);
    let line_start = text.split_inclusive('\n').take(line.saturating_sub(1)).map(str::len).sum::<usize>();
    let byte_offset = (line_start + column.saturating_sub(1)).min(text.len());
    text.char_indices().take_while(|(i, _)| *i < byte_offset).count()
}

fn characters(n: usize) -> &'static str {
    if n == 1 { "character" } else { "characters" }
}

/// `'a', 'b' or 'c'`
fn expected_literals(values: &[&str]) -> String {
    let quoted = values.iter().map(|v| format!("'{v}'")).collect::<Vec<_>>();
    match quoted.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {last}", rest.join(", ")),
    }
}

/// The request could not be bound, `details` lists every failing field.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("request validation failed with {} error(s)", .details.len())]
pub struct ValidationError {
    details: Vec<ErrorDetail>,
}

impl ValidationError {
    pub fn new(details: Vec<ErrorDetail>) -> Self {
        Self { details }
    }

    pub fn details(&self) -> &[ErrorDetail] {
        &self.details
    }

    /// The response body, `{"detail": [...]}`.
    pub fn to_json(&self) -> Value {
        json!({ "detail": self.details })
    }
}

impl From<ErrorDetail> for ValidationError {
    fn from(detail: ErrorDetail) -> Self {
        Self { details: vec![detail] }
    }
}
