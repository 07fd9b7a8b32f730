use std::fmt;

use log::trace;
use serde_json::{Map, Value};

use super::field::{Field, Kind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    NotAnObject,
    MissingField(&'static str),
    InvalidType { field: &'static str, expected: Kind },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::NotAnObject => f.write_str("record is not a key-value object"),
            DecodeError::MissingField(field) => write!(f, "missing field `{}`", field),
            DecodeError::InvalidType { field, expected } => {
                write!(f, "field `{}` is not of type {}", field, expected)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

pub trait Decode {
    fn decode(decoder: &Decoder) -> Result<Self, DecodeError>
    where
        Self: Sized;
}

pub struct Decoder<'a> {
    pub(self) fields: &'a Map<String, Value>,
}

impl Decoder<'_> {
    /// Reads one required field. Keys the shape doesn't ask for are never looked at.
    pub fn field<F: Field>(&self, name: &'static str) -> Result<F, DecodeError> {
        let value = self
            .fields
            .get(name)
            .ok_or(DecodeError::MissingField(name))?;

        F::from_value(value).ok_or(DecodeError::InvalidType {
            field: name,
            expected: F::KIND,
        })
    }
}

pub fn decode_from_map<R: Decode>(fields: &Map<String, Value>) -> Result<R, DecodeError> {
    let decoder = Decoder { fields };
    trace!("Decoding record with {} keys", fields.len());
    <R as Decode>::decode(&decoder)
}

pub fn decode_from_value<R: Decode>(value: &Value) -> Result<R, DecodeError> {
    match value {
        Value::Object(fields) => decode_from_map(fields),
        _ => Err(DecodeError::NotAnObject),
    }
}
