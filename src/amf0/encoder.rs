//! Encoding AMF0 values to a byte sink.

use std::io;

use byteorder::{BigEndian, WriteBytesExt};

use super::error::Amf0EncodeError;
use super::value::{Amf0Value, marker};

/// A stateless AMF0 encoder: every method takes the `io::Write` to encode into.
pub struct Amf0Encoder;

impl Amf0Encoder {
    fn encode_short_string(io: &mut impl io::Write, value: &str) -> Result<(), Amf0EncodeError> {
        let bytes = value.as_bytes();
        let len: u16 = bytes.len().try_into().map_err(|_| Amf0EncodeError::StringTooLong(bytes.len()))?;
        io.write_u16::<BigEndian>(len)?;
        io.write_all(bytes)?;
        Ok(())
    }

    fn encode_object_body(io: &mut impl io::Write, props: &[(String, Amf0Value)]) -> Result<(), Amf0EncodeError> {
        for (key, value) in props {
            Self::encode_short_string(io, key)?;
            Self::encode_value(io, value)?;
        }

        // Object-end sentinel: an empty key followed by the Object End marker.
        io.write_u16::<BigEndian>(0)?;
        io.write_u8(marker::OBJECT_END)?;
        Ok(())
    }

    /// Encode a single [`Amf0Value`], including its marker byte.
    pub fn encode_value(io: &mut impl io::Write, value: &Amf0Value) -> Result<(), Amf0EncodeError> {
        match value {
            Amf0Value::Number(n) => {
                io.write_u8(marker::NUMBER)?;
                io.write_f64::<BigEndian>(*n)?;
            }
            Amf0Value::Boolean(b) => {
                io.write_u8(marker::BOOLEAN)?;
                io.write_u8(*b as u8)?;
            }
            Amf0Value::String(s) => {
                io.write_u8(marker::STRING)?;
                Self::encode_short_string(io, s)?;
            }
            Amf0Value::Object(props) => {
                io.write_u8(marker::OBJECT)?;
                Self::encode_object_body(io, props)?;
            }
            Amf0Value::Null => {
                io.write_u8(marker::NULL)?;
            }
            Amf0Value::EcmaArray(props) => {
                io.write_u8(marker::ECMA_ARRAY)?;
                io.write_u32::<BigEndian>(props.len() as u32)?;
                Self::encode_object_body(io, props)?;
            }
            Amf0Value::StrictArray(values) => {
                io.write_u8(marker::STRICT_ARRAY)?;
                io.write_u32::<BigEndian>(values.len() as u32)?;
                for value in values {
                    Self::encode_value(io, value)?;
                }
            }
        }

        Ok(())
    }

    /// Convenience: encode a [`f64`] as a Number.
    pub fn encode_number(io: &mut impl io::Write, value: f64) -> Result<(), Amf0EncodeError> {
        Self::encode_value(io, &Amf0Value::Number(value))
    }

    /// Convenience: encode a `&str` as a String.
    pub fn encode_string(io: &mut impl io::Write, value: &str) -> Result<(), Amf0EncodeError> {
        Self::encode_value(io, &Amf0Value::String(value.to_owned()))
    }

    /// Convenience: encode the Null marker.
    pub fn encode_null(io: &mut impl io::Write) -> Result<(), Amf0EncodeError> {
        Self::encode_value(io, &Amf0Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amf0::decoder::Amf0Decoder;

    fn roundtrip(value: Amf0Value) {
        let mut buf = Vec::new();
        Amf0Encoder::encode_value(&mut buf, &value).unwrap();
        let mut decoder = Amf0Decoder::new(&buf);
        assert_eq!(decoder.decode_value().unwrap(), value);
        assert!(!decoder.has_remaining());
    }

    #[test]
    fn roundtrip_number() {
        roundtrip(Amf0Value::Number(4096.0));
        roundtrip(Amf0Value::Number(-1.5));
        roundtrip(Amf0Value::Number(0.0));
    }

    #[test]
    fn roundtrip_boolean() {
        roundtrip(Amf0Value::Boolean(true));
        roundtrip(Amf0Value::Boolean(false));
    }

    #[test]
    fn roundtrip_string() {
        roundtrip(Amf0Value::String("rtmp://host/live".to_string()));
        roundtrip(Amf0Value::String(String::new()));
    }

    #[test]
    fn roundtrip_object_key_order() {
        let props = vec![
            ("z_first".to_string(), Amf0Value::Number(1.0)),
            ("a_second".to_string(), Amf0Value::Boolean(true)),
        ];
        roundtrip(Amf0Value::Object(props));
    }

    #[test]
    fn roundtrip_null() {
        roundtrip(Amf0Value::Null);
    }

    #[test]
    fn roundtrip_ecma_array() {
        roundtrip(Amf0Value::EcmaArray(vec![("width".to_string(), Amf0Value::Number(1920.0))]));
    }

    #[test]
    fn roundtrip_strict_array() {
        roundtrip(Amf0Value::StrictArray(vec![Amf0Value::Number(1.0), Amf0Value::Number(2.0)]));
    }

    #[test]
    fn connect_command_wire_shape() {
        // command name, transaction id, command object: the shape used by `Command::read`.
        let mut buf = Vec::new();
        Amf0Encoder::encode_string(&mut buf, "connect").unwrap();
        Amf0Encoder::encode_number(&mut buf, 1.0).unwrap();
        Amf0Encoder::encode_value(
            &mut buf,
            &Amf0Value::Object(vec![("app".to_string(), Amf0Value::String("live".to_string()))]),
        )
        .unwrap();

        let mut decoder = Amf0Decoder::new(&buf);
        assert_eq!(decoder.decode_string().unwrap(), "connect");
        assert_eq!(decoder.decode_number().unwrap(), 1.0);
        assert_eq!(
            decoder.decode_value().unwrap().get("app"),
            Some(&Amf0Value::String("live".to_string()))
        );
    }
}
