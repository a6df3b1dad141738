//! AMF0 codec error types.

use std::io;

/// Errors that can occur while decoding an AMF0 value.
#[derive(Debug, thiserror::Error)]
pub enum Amf0DecodeError {
    /// The buffer ran out before a length-prefixed field could be fully read.
    #[error("unexpected end of buffer while decoding amf0 value")]
    UnexpectedEof,
    /// A string field was not valid UTF-8.
    #[error("invalid utf-8 in amf0 string")]
    InvalidUtf8,
    /// An object was not terminated by the `0x00 0x00 0x09` sentinel.
    #[error("unterminated amf0 object")]
    UnterminatedObject,
    /// A marker byte did not match any of the supported AMF0 types.
    #[error("unsupported amf0 marker: {0:#04x}")]
    UnsupportedMarker(u8),
    /// A decoded value was not of the type the caller expected.
    #[error("wrong amf0 type: expected {expected}, got {got}")]
    WrongType {
        /// The type name the caller expected.
        expected: &'static str,
        /// The type name that was actually decoded.
        got: &'static str,
    },
}

/// Errors that can occur while encoding an AMF0 value.
#[derive(Debug, thiserror::Error)]
pub enum Amf0EncodeError {
    /// I/O error while writing to the underlying stream.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// A string was too long to be represented by AMF0's 2-byte length prefix.
    #[error("string too long for amf0 encoding: {0} bytes")]
    StringTooLong(usize),
}
