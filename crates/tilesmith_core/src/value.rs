//! Generic property value type (typed like Tiled's `<property>`)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Custom property value as declared on a tileset or tile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Value {
    /// Parse a raw attribute value according to a Tiled property type name.
    ///
    /// Unknown types (`color`, `file`, `object`, `class`, ...) are kept as strings.
    /// Returns `None` when the text doesn't fit the declared type.
    pub fn parse_typed(type_name: &str, raw: &str) -> Option<Self> {
        match type_name {
            "bool" => match raw {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            "int" => raw.trim().parse().ok().map(Value::Int),
            "float" => raw.trim().parse().ok().map(Value::Float),
            _ => Some(Value::String(raw.to_string())),
        }
    }

    /// Tiled type name this value is written back as
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "{s:?}"),
        }
    }
}
