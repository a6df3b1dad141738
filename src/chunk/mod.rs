//! The chunk-stream codec: frames and de-frames the RTMP message stream.
//!
//! Defined by:
//! - Legacy RTMP spec, 5.3, 5.4

mod define;
mod error;
pub mod reader;
pub mod writer;

pub use self::define::{
    AUDIO_CHUNK_STREAM_ID, COMMAND_CHUNK_STREAM_ID, Chunk, ChunkBasicHeader, ChunkMessageHeader, ChunkType,
    ON_STATUS_CHUNK_STREAM_ID, PROTOCOL_CONTROL_CHUNK_STREAM_ID, VIDEO_CHUNK_STREAM_ID,
};
pub use self::error::{ChunkReadError, ChunkWriteError};
pub use self::reader::ChunkReader;
pub use self::writer::ChunkWriter;
