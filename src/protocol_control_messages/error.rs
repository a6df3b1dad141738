use std::io;

#[derive(Debug, thiserror::Error)]
pub enum ProtocolControlMessageError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("chunk write error: {0}")]
    ChunkWrite(#[from] crate::chunk::ChunkWriteError),
}
