use serde_json::{Map, Value};
use thiserror::Error;

/// A lookup into the raw state tree that did not find what it expected.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RawError {
    #[error("missing field `{field}`")]
    Missing { field: String },

    #[error("field `{field}` is {found}, expected {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// The state document exactly as decoded, with no schema applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RawState(Value);

impl RawState {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn resources(&self) -> Result<&[Value], RawError> {
        let root = expect_object(&self.0, "state")?;
        Ok(root.require_array("resources")?.as_slice())
    }
}

/// Typed lookups on a JSON object that report failures as [`RawError`].
pub trait RawMapExt {
    fn require(&self, field: &str) -> Result<&Value, RawError>;
    fn require_str(&self, field: &str) -> Result<&str, RawError>;
    fn require_array(&self, field: &str) -> Result<&Vec<Value>, RawError>;
    fn require_object(&self, field: &str) -> Result<&Map<String, Value>, RawError>;
}

impl RawMapExt for Map<String, Value> {
    fn require(&self, field: &str) -> Result<&Value, RawError> {
        self.get(field).ok_or_else(|| RawError::Missing {
            field: field.to_string(),
        })
    }

    fn require_str(&self, field: &str) -> Result<&str, RawError> {
        let value = self.require(field)?;
        value.as_str().ok_or_else(|| wrong_type(field, "a string", value))
    }

    fn require_array(&self, field: &str) -> Result<&Vec<Value>, RawError> {
        let value = self.require(field)?;
        value
            .as_array()
            .ok_or_else(|| wrong_type(field, "an array", value))
    }

    fn require_object(&self, field: &str) -> Result<&Map<String, Value>, RawError> {
        expect_object(self.require(field)?, field)
    }
}

/// Treats `value` as an object, naming it `field` in the error otherwise.
pub fn expect_object<'v>(
    value: &'v Value,
    field: &str,
) -> Result<&'v Map<String, Value>, RawError> {
    value
        .as_object()
        .ok_or_else(|| wrong_type(field, "an object", value))
}

pub fn str_field<'v>(object: &'v Map<String, Value>, field: &str) -> Option<&'v str> {
    object.get(field).and_then(Value::as_str)
}

fn wrong_type(field: &str, expected: &'static str, value: &Value) -> RawError {
    RawError::WrongType {
        field: field.to_string(),
        expected,
        found: type_name(value),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
