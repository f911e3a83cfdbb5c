//! The `jsonb` scalar.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Scalar, ScalarError};

/// Hasura `jsonb` scalar: a string-keyed map of arbitrary JSON values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Jsonb(Map<String, Value>);

impl Jsonb {
    /// Wrap an existing map unchanged.
    #[must_use]
    pub const fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Look up a top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Borrow the wrapped map.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Unwrap into the raw map.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl Scalar for Jsonb {
    const TYPE_NAME: &'static str = "jsonb";
}

impl From<Map<String, Value>> for Jsonb {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

impl From<Jsonb> for Value {
    fn from(value: Jsonb) -> Self {
        Self::Object(value.0)
    }
}

impl TryFrom<Value> for Jsonb {
    type Error = ScalarError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ScalarError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }
}

impl FromIterator<(String, Value)> for Jsonb {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
