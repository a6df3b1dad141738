//! Chunk codec error types.

use std::io;

/// Errors that can occur while decoding a chunk stream.
#[derive(Debug, thiserror::Error)]
pub enum ChunkReadError {
    /// I/O error while reading from the underlying stream.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// A Type-1/2/3 header arrived for a CSID that has never seen a Type-0 header.
    #[error("missing previous chunk header for chunk stream id {0}")]
    MissingPreviousChunkHeader(u32),
    /// A Type-0 header arrived for a CSID whose reassembly buffer is not empty.
    #[error("interleaved message on chunk stream id {0}")]
    InterleavedMessage(u32),
    /// Too many distinct chunk stream ids are being tracked at once.
    #[error("too many concurrent chunk streams")]
    TooManyChunkStreams,
    /// A single partial message grew larger than is reasonable to buffer.
    #[error("partial chunk too large: {0}")]
    PartialChunkTooLarge(usize),
    /// The extended timestamp field disagreed with the recorded delta in a way that overflowed.
    #[error("timestamp overflow: timestamp {0}, delta {1}")]
    TimestampOverflow(u32, u32),
}

/// Errors that can occur while encoding a chunk stream.
#[derive(Debug, thiserror::Error)]
pub enum ChunkWriteError {
    /// I/O error while writing to the underlying stream.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
