use std::fmt;

use serde_json::Value;

/// Primitive kinds a record field may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Integer,
    String,
    Boolean,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Integer => "integer",
            Kind::String => "string",
            Kind::Boolean => "boolean",
        })
    }
}

pub trait Field: Sized {
    const KIND: Kind;

    fn from_value(value: &Value) -> Option<Self>;
    fn to_value(&self) -> Value;
}

impl Field for i64 {
    const KIND: Kind = Kind::Integer;

    // `as_i64` is `None` for floats (even `1.0`) and for u64 past i64::MAX.
    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }

    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

impl Field for String {
    const KIND: Kind = Kind::String;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Field for bool {
    const KIND: Kind = Kind::Boolean;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}
