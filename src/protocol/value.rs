use std::fmt;

use bincode::{Decode, Encode};

/// Single unit exchanged on the wire.
///
/// Requests and responses are flat sequences of these; there is no
/// envelope around a whole request.
#[derive(Debug, Clone, Encode, Decode, PartialEq)]
pub enum Value {
    Int(i32),
    Float(f64),
    Text(String),
}

/// Type of a [`Value`], used when the reader expects a specific kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    Float,
    Text,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Text(_) => ValueKind::Text,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Int => "integer",
            ValueKind::Float => "floating point",
            ValueKind::Text => "text",
        };
        f.write_str(name)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}
