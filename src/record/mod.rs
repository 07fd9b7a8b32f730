//! Conformance of plain key-value objects to record shapes.
//!
//! A record is a flat JSON object. Decoding checks that every field a shape
//! declares is present with the right kind; keys the shape doesn't declare are
//! ignored, so a value of an extended shape also decodes as its base.

pub mod decode;
pub mod encode;
pub mod field;

pub use decode::{decode_from_map, decode_from_value, Decode, DecodeError, Decoder};
pub use encode::{encode_to_map, encode_to_value, Encode, EncodeError, Encoder};
pub use field::{Field, Kind};

/// Declares a record struct along with its `Decode` and `Encode` impls.
///
/// The `extends Base as base` form embeds `Base` in a field named `base`. The
/// base fields share the same flat object as the new ones, both on the wire
/// and through serde.
macro_rules! record {
    {
        $(#[$meta:meta])*
        pub struct $name:ident extends $base:ident as $basefield:ident {
            $($(#[$fmeta:meta])* pub $field:ident : $type:ty),* $(,)?
        }
    } => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            #[serde(flatten)]
            pub $basefield: $base,
            $($(#[$fmeta])* pub $field: $type),*
        }

        impl $crate::record::Decode for $name {
            fn decode(
                _decoder: &$crate::record::Decoder,
            ) -> Result<Self, $crate::record::DecodeError> {
                Ok(Self {
                    $basefield: <$base as $crate::record::Decode>::decode(_decoder)?,
                    $($field: _decoder.field(stringify!($field))?),*
                })
            }
        }

        impl $crate::record::Encode for $name {
            fn encode(
                &self,
                _encoder: &mut $crate::record::Encoder,
            ) -> Result<(), $crate::record::EncodeError> {
                $crate::record::Encode::encode(&self.$basefield, _encoder)?;
                $(_encoder.field(stringify!($field), &self.$field)?;)*

                Ok(())
            }
        }

        impl std::ops::Deref for $name {
            type Target = $base;

            fn deref(&self) -> &$base {
                &self.$basefield
            }
        }

        impl std::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut $base {
                &mut self.$basefield
            }
        }

        impl AsRef<$base> for $name {
            fn as_ref(&self) -> &$base {
                &self.$basefield
            }
        }

        impl From<$name> for $base {
            fn from(value: $name) -> Self {
                value.$basefield
            }
        }
    };
    {
        $(#[$meta:meta])*
        pub struct $name:ident {
            $($(#[$fmeta:meta])* pub $field:ident : $type:ty),* $(,)?
        }
    } => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            $($(#[$fmeta])* pub $field: $type),*
        }

        impl $crate::record::Decode for $name {
            fn decode(
                _decoder: &$crate::record::Decoder,
            ) -> Result<Self, $crate::record::DecodeError> {
                Ok(Self {
                    $($field: _decoder.field(stringify!($field))?),*
                })
            }
        }

        impl $crate::record::Encode for $name {
            fn encode(
                &self,
                _encoder: &mut $crate::record::Encoder,
            ) -> Result<(), $crate::record::EncodeError> {
                $(_encoder.field(stringify!($field), &self.$field)?;)*

                Ok(())
            }
        }

        impl AsRef<$name> for $name {
            fn as_ref(&self) -> &$name {
                self
            }
        }
    };
}

pub(crate) use record;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    record! {
        pub struct Point {
            pub x: i64,
            pub y: i64,
        }
    }

    record! {
        pub struct Tagged extends Point as point {
            pub tag: String,
        }
    }

    record! {
        pub struct Shadowing extends Point as point {
            pub x: i64,
        }
    }

    #[test]
    fn extension_decodes_base_from_same_object() {
        let tagged: Tagged = decode_from_value(&json!({"x": 1, "y": 2, "tag": "a"})).unwrap();
        assert_eq!(tagged.point, Point { x: 1, y: 2 });
        assert_eq!(tagged.x, 1);
        assert_eq!(tagged.tag, "a");
    }

    #[test]
    fn base_fields_are_checked_first() {
        let err = decode_from_value::<Tagged>(&json!({"tag": "a", "y": 2}))
            .err()
            .unwrap();
        assert_eq!(err, DecodeError::MissingField("x"));
    }

    #[test]
    fn extension_encodes_flat() {
        let tagged = Tagged {
            point: Point { x: 3, y: 4 },
            tag: "b".to_owned(),
        };
        assert_eq!(
            encode_to_value(&tagged).unwrap(),
            json!({"x": 3, "y": 4, "tag": "b"})
        );
        assert_eq!(serde_json::to_value(&tagged).unwrap(), json!({"x": 3, "y": 4, "tag": "b"}));
    }

    #[test]
    fn redeclared_base_field_fails_to_encode() {
        let shadowing = Shadowing {
            point: Point { x: 1, y: 2 },
            x: 9,
        };
        assert_eq!(
            encode_to_map(&shadowing).err(),
            Some(EncodeError::DuplicateField("x"))
        );
    }
}
