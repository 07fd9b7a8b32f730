use std::fmt;

use serde_json::{Map, Value};

use super::field::Field;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    DuplicateField(&'static str),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::DuplicateField(field) => {
                write!(f, "field `{}` written more than once", field)
            }
        }
    }
}

impl std::error::Error for EncodeError {}

pub trait Encode {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError>;
}

#[derive(Default)]
pub struct Encoder {
    fields: Map<String, Value>,
}

impl Encoder {
    pub fn field<F: Field>(&mut self, name: &'static str, value: &F) -> Result<(), EncodeError> {
        if self.fields.contains_key(name) {
            return Err(EncodeError::DuplicateField(name));
        }

        self.fields.insert(name.to_owned(), value.to_value());
        Ok(())
    }
}

pub fn encode_to_map<E: Encode>(encode: &E) -> Result<Map<String, Value>, EncodeError> {
    let mut encoder = Encoder::default();
    Encode::encode(encode, &mut encoder)?;
    Ok(encoder.fields)
}

pub fn encode_to_value<E: Encode>(encode: &E) -> Result<Value, EncodeError> {
    encode_to_map(encode).map(Value::Object)
}
