//! Command message error types.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("amf0 decode: {0}")]
    Amf0Decode(#[from] crate::amf0::Amf0DecodeError),
    #[error("amf0 encode: {0}")]
    Amf0Encode(#[from] crate::amf0::Amf0EncodeError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("chunk write error: {0}")]
    ChunkWrite(#[from] crate::chunk::ChunkWriteError),
    #[error("missing required field '{0}' in command object")]
    MissingField(&'static str),
}
