//! Caller-supplied policy metadata.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::PolicyError;

/// JSON key holding the company name.
pub const COMPANY_NAME_FIELD: &str = "companyName";

/// JSON key holding the policy title.
pub const TITLE_FIELD: &str = "title";

/// Free-form policy fields as submitted by the frontend.
///
/// Only `companyName` and `title` matter to the pipeline; every other field
/// is carried along untouched. The identifiers are validated lazily so that a
/// missing or non-text value surfaces as [`PolicyError::InvalidInput`] at the
/// point where the base name is derived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyInput(Map<String, Value>);

impl PolicyInput {
    /// Creates an input carrying just the two identifiers.
    pub fn new(company_name: impl Into<String>, title: impl Into<String>) -> Self {
        Self::default()
            .with_field(COMPANY_NAME_FIELD, company_name.into())
            .with_field(TITLE_FIELD, title.into())
    }

    /// Wraps an arbitrary JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, PolicyError> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            Value::Null => Err(PolicyError::invalid_input("policy data is missing")),
            _ => Err(PolicyError::invalid_input("policy data must be a JSON object")),
        }
    }

    /// Adds or replaces a field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns a raw field value.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The company name; must be present and a string.
    pub fn company_name(&self) -> Result<&str, PolicyError> {
        self.text_field(COMPANY_NAME_FIELD)
    }

    /// The policy title; must be present and a string.
    pub fn title(&self) -> Result<&str, PolicyError> {
        self.text_field(TITLE_FIELD)
    }

    fn text_field(&self, key: &str) -> Result<&str, PolicyError> {
        match self.0.get(key) {
            Some(Value::String(text)) => Ok(text),
            Some(Value::Null) | None => Err(PolicyError::invalid_input(format!(
                "'{}' is required",
                key
            ))),
            Some(other) => Err(PolicyError::invalid_input(format!(
                "'{}' must be text, got {}",
                key,
                json_kind(other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
