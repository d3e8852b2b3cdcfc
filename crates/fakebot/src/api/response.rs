use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

static NULL: Value = Value::Null;

/// A Bot API answer with dotted-path access
///
/// `get("result.chat.id")` walks objects by key and arrays by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiResponse(Value);

impl ApiResponse {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Value at a dotted path; an empty path is the whole body
    pub fn get(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(&self.0);
        }
        path.split('.').try_fold(&self.0, |current, segment| match current {
            Value::Object(fields) => fields.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|index| items.get(index)),
            _ => None,
        })
    }

    /// The `result` member of an `{ok, result}` envelope, or the whole body
    pub fn result(&self) -> &Value {
        match &self.0 {
            Value::Object(fields) if fields.contains_key("ok") => fields.get("result").unwrap_or(&NULL),
            body => body,
        }
    }

    /// `false` only for an explicit `ok: false`
    pub fn is_ok(&self) -> bool {
        self.0.get("ok").and_then(Value::as_bool).unwrap_or(true)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }

    pub fn to_json(&self) -> String {
        self.0.to_string()
    }
}

impl From<Value> for ApiResponse {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
