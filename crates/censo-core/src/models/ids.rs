use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Normalize a loosely-typed code (number or numeric string) to its string form.
///
/// Integral floats lose their fractional part (`12.0` becomes `"12"`) so that a
/// code delivered as a JSON number compares equal to the same code delivered
/// as a string.
fn normalize_value(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                n.as_f64().map(normalize_float)
            }
        }
        Value::String(s) => normalize_text(s),
        _ => None,
    }
}

fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn normalize_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Record number of a census issue
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Parse a record number, rejecting blank input
    pub fn parse(raw: &str) -> Option<Self> {
        normalize_text(raw).map(Self)
    }

    /// Accept a JSON number or numeric string
    pub fn from_json(value: &Value) -> Option<Self> {
        normalize_value(value).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i32> for RecordId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Workflow status code, compared in its normalized string form
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StatusId(String);

impl StatusId {
    pub fn parse(raw: &str) -> Option<Self> {
        normalize_text(raw).map(Self)
    }

    pub fn from_json(value: &Value) -> Option<Self> {
        normalize_value(value).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i32> for StatusId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for StatusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CodeRepr {
    Int(i64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for StatusId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let normalized = match CodeRepr::deserialize(deserializer)? {
            CodeRepr::Int(i) => Some(i.to_string()),
            CodeRepr::Float(f) => Some(normalize_float(f)),
            CodeRepr::Text(s) => normalize_text(&s),
        };
        normalized
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom("status code cannot be empty"))
    }
}
