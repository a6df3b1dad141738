//! Decoding AMF0 values from a byte buffer.
//!
//! Every length field is bounds-checked against the remaining buffer before use; a truncated
//! field yields [`Amf0DecodeError::UnexpectedEof`] rather than panicking or reading garbage.

use super::error::Amf0DecodeError;
use super::value::{Amf0Object, Amf0Value, marker};

/// A cursor-style decoder over a byte slice.
pub struct Amf0Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Amf0Decoder<'a> {
    /// Construct a decoder over `buf`, starting at its first byte.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Whether any bytes remain to be decoded.
    pub fn has_remaining(&self) -> bool {
        self.pos < self.buf.len()
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], Amf0DecodeError> {
        let end = self.pos.checked_add(len).ok_or(Amf0DecodeError::UnexpectedEof)?;
        let slice = self.buf.get(self.pos..end).ok_or(Amf0DecodeError::UnexpectedEof)?;
        self.pos = end;
        Ok(slice)
    }

    fn take_u8(&mut self) -> Result<u8, Amf0DecodeError> {
        Ok(self.take(1)?[0])
    }

    fn take_u16(&mut self) -> Result<u16, Amf0DecodeError> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn take_u32(&mut self) -> Result<u32, Amf0DecodeError> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn take_f64(&mut self) -> Result<f64, Amf0DecodeError> {
        let bytes = self.take(8)?;
        Ok(f64::from_be_bytes(bytes.try_into().expect("8 bytes")))
    }

    /// Decode a length-prefixed UTF-8 string (the `2-byte length + bytes` form used everywhere
    /// except [`Amf0Value`] doesn't support AMF0's rarely-seen long-string variant).
    fn take_short_string(&mut self) -> Result<String, Amf0DecodeError> {
        let len = self.take_u16()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| Amf0DecodeError::InvalidUtf8)
    }

    /// Decode the ordered key/value pairs of an Object/ECMA-array body, up to the
    /// `0x00 0x00 0x09` object-end sentinel.
    fn take_object_body(&mut self) -> Result<Amf0Object, Amf0DecodeError> {
        let mut props = Vec::new();

        loop {
            // An object-end sentinel is a zero-length string key followed by the Object End
            // marker; peek for it without consuming a key we'd otherwise try to decode a
            // value for.
            if self.buf[self.pos..].starts_with(&[0x00, 0x00, marker::OBJECT_END]) {
                self.pos += 3;
                return Ok(props);
            }

            if !self.has_remaining() {
                return Err(Amf0DecodeError::UnterminatedObject);
            }

            let key = self.take_short_string()?;
            let value = self.decode_value()?;
            props.push((key, value));
        }
    }

    /// Decode one [`Amf0Value`], dispatching on its marker byte.
    pub fn decode_value(&mut self) -> Result<Amf0Value, Amf0DecodeError> {
        let marker = self.take_u8()?;

        match marker {
            marker::NUMBER => Ok(Amf0Value::Number(self.take_f64()?)),
            marker::BOOLEAN => Ok(Amf0Value::Boolean(self.take_u8()? != 0)),
            marker::STRING => Ok(Amf0Value::String(self.take_short_string()?)),
            marker::OBJECT => Ok(Amf0Value::Object(self.take_object_body()?)),
            marker::NULL => Ok(Amf0Value::Null),
            marker::ECMA_ARRAY => {
                // The 4-byte count is informational; we decode exactly as for Object and trust
                // the sentinel to terminate the property list.
                let _count = self.take_u32()?;
                Ok(Amf0Value::EcmaArray(self.take_object_body()?))
            }
            marker::STRICT_ARRAY => {
                let count = self.take_u32()? as usize;
                let mut values = Vec::with_capacity(count.min(1 << 16));
                for _ in 0..count {
                    values.push(self.decode_value()?);
                }
                Ok(Amf0Value::StrictArray(values))
            }
            marker::OBJECT_END => Err(Amf0DecodeError::UnsupportedMarker(marker::OBJECT_END)),
            other => Err(Amf0DecodeError::UnsupportedMarker(other)),
        }
    }

    /// Decode a value and require it to be a [`Amf0Value::Number`].
    pub fn decode_number(&mut self) -> Result<f64, Amf0DecodeError> {
        match self.decode_value()? {
            Amf0Value::Number(n) => Ok(n),
            other => Err(Amf0DecodeError::WrongType {
                expected: "Number",
                got: other.type_name(),
            }),
        }
    }

    /// Decode a value and require it to be a [`Amf0Value::String`].
    pub fn decode_string(&mut self) -> Result<String, Amf0DecodeError> {
        match self.decode_value()? {
            Amf0Value::String(s) => Ok(s),
            other => Err(Amf0DecodeError::WrongType {
                expected: "String",
                got: other.type_name(),
            }),
        }
    }

    /// Decode a value and require it to be a [`Amf0Value::Boolean`].
    pub fn decode_boolean(&mut self) -> Result<bool, Amf0DecodeError> {
        match self.decode_value()? {
            Amf0Value::Boolean(b) => Ok(b),
            other => Err(Amf0DecodeError::WrongType {
                expected: "Boolean",
                got: other.type_name(),
            }),
        }
    }

    /// Decode a value and require it to be [`Amf0Value::Null`].
    pub fn decode_null(&mut self) -> Result<(), Amf0DecodeError> {
        match self.decode_value()? {
            Amf0Value::Null => Ok(()),
            other => Err(Amf0DecodeError::WrongType {
                expected: "Null",
                got: other.type_name(),
            }),
        }
    }

    /// Decode every remaining top-level value in the buffer, in order. Used to decode the
    /// optional-arguments tail of a command message.
    pub fn decode_all(&mut self) -> Result<Vec<Amf0Value>, Amf0DecodeError> {
        let mut values = Vec::new();
        while self.has_remaining() {
            values.push(self.decode_value()?);
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amf0::encoder::Amf0Encoder;

    fn encode(value: &Amf0Value) -> Vec<u8> {
        let mut buf = Vec::new();
        Amf0Encoder::encode_value(&mut buf, value).unwrap();
        buf
    }

    #[test]
    fn decode_number() {
        let wire = encode(&Amf0Value::Number(2_500_000.0));
        let mut decoder = Amf0Decoder::new(&wire);
        assert_eq!(decoder.decode_value().unwrap(), Amf0Value::Number(2_500_000.0));
    }

    #[test]
    fn decode_boolean() {
        let wire = [marker::BOOLEAN, 1];
        let mut decoder = Amf0Decoder::new(&wire);
        assert_eq!(decoder.decode_value().unwrap(), Amf0Value::Boolean(true));
    }

    #[test]
    fn decode_string() {
        let wire = encode(&Amf0Value::String("live".to_string()));
        let mut decoder = Amf0Decoder::new(&wire);
        assert_eq!(decoder.decode_value().unwrap(), Amf0Value::String("live".to_string()));
    }

    #[test]
    fn decode_object_preserves_order() {
        let obj = Amf0Value::Object(vec![
            ("app".to_string(), Amf0Value::String("live".to_string())),
            ("type".to_string(), Amf0Value::String("nonprivate".to_string())),
        ]);
        let wire = encode(&obj);
        let mut decoder = Amf0Decoder::new(&wire);
        let decoded = decoder.decode_value().unwrap();
        assert_eq!(decoded, obj);
    }

    #[test]
    fn decode_null_and_ecma_array() {
        let mut buf = Vec::new();
        Amf0Encoder::encode_value(&mut buf, &Amf0Value::Null).unwrap();
        Amf0Encoder::encode_value(
            &mut buf,
            &Amf0Value::EcmaArray(vec![("duration".to_string(), Amf0Value::Number(0.0))]),
        )
        .unwrap();

        let mut decoder = Amf0Decoder::new(&buf);
        assert_eq!(decoder.decode_value().unwrap(), Amf0Value::Null);
        assert_eq!(
            decoder.decode_value().unwrap(),
            Amf0Value::EcmaArray(vec![("duration".to_string(), Amf0Value::Number(0.0))])
        );
    }

    #[test]
    fn decode_strict_array() {
        let arr = Amf0Value::StrictArray(vec![Amf0Value::Number(1.0), Amf0Value::String("x".to_string())]);
        let wire = encode(&arr);
        let mut decoder = Amf0Decoder::new(&wire);
        assert_eq!(decoder.decode_value().unwrap(), arr);
    }

    #[test]
    fn truncated_string_length_is_malformed() {
        let wire = [marker::STRING, 0x00, 0x10, b'h', b'i'];
        let mut decoder = Amf0Decoder::new(&wire);
        assert!(matches!(decoder.decode_value(), Err(Amf0DecodeError::UnexpectedEof)));
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let wire = [marker::STRING, 0x00, 0x01, 0xFF];
        let mut decoder = Amf0Decoder::new(&wire);
        assert!(matches!(decoder.decode_value(), Err(Amf0DecodeError::InvalidUtf8)));
    }

    #[test]
    fn unterminated_object_is_malformed() {
        let mut wire = vec![marker::OBJECT];
        wire.extend_from_slice(&[0x00, 0x03]);
        wire.extend_from_slice(b"key");
        wire.push(marker::NULL);
        // no terminating sentinel
        let mut decoder = Amf0Decoder::new(&wire);
        assert!(matches!(decoder.decode_value(), Err(Amf0DecodeError::UnterminatedObject)));
    }

    #[test]
    fn unknown_marker_is_unsupported() {
        let wire = [0x42];
        let mut decoder = Amf0Decoder::new(&wire);
        assert!(matches!(decoder.decode_value(), Err(Amf0DecodeError::UnsupportedMarker(0x42))));
    }

    #[test]
    fn decode_all_reads_sequential_top_level_values() {
        let mut buf = Vec::new();
        Amf0Encoder::encode_value(&mut buf, &Amf0Value::String("connect".to_string())).unwrap();
        Amf0Encoder::encode_value(&mut buf, &Amf0Value::Number(1.0)).unwrap();
        Amf0Encoder::encode_value(&mut buf, &Amf0Value::Null).unwrap();

        let mut decoder = Amf0Decoder::new(&buf);
        let values = decoder.decode_all().unwrap();
        assert_eq!(
            values,
            vec![Amf0Value::String("connect".to_string()), Amf0Value::Number(1.0), Amf0Value::Null]
        );
    }
}
