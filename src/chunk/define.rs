//! Chunk and chunk-header types.
//!
//! Defined by:
//! - Legacy RTMP spec, 5.3

use bytes::Bytes;

use crate::messages::MessageType;

/// Chunk stream id reserved for protocol control messages (Set Chunk Size, Window Ack Size,
/// Set Peer Bandwidth, User Control).
pub const PROTOCOL_CONTROL_CHUNK_STREAM_ID: u32 = 2;
/// Chunk stream id used for AMF0 command messages on the NetConnection.
pub const COMMAND_CHUNK_STREAM_ID: u32 = 3;
/// Chunk stream id used for `onStatus` events on a NetStream.
pub const ON_STATUS_CHUNK_STREAM_ID: u32 = 4;
/// Chunk stream id used for inbound audio messages.
pub const AUDIO_CHUNK_STREAM_ID: u32 = 6;
/// Chunk stream id used for inbound video messages.
pub const VIDEO_CHUNK_STREAM_ID: u32 = 7;

/// The chunk size in effect until the first Set Chunk Size message.
pub const INIT_CHUNK_SIZE: usize = 128;
/// A sentinel timestamp value: timestamps at or above this require the extended timestamp field.
pub const EXTENDED_TIMESTAMP_THRESHOLD: u32 = 0xFFFFFF;

/// The chunk basic header format, selecting how much of the message header is present.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, num_derive::FromPrimitive)]
#[repr(u8)]
pub enum ChunkType {
    /// 11-byte message header, absolute timestamp.
    Type0 = 0,
    /// 7-byte message header, timestamp delta, inherited message stream id.
    Type1 = 1,
    /// 3-byte message header, timestamp delta only.
    Type2 = 2,
    /// No message header; everything is inherited from the previous chunk on this CSID.
    Type3 = 3,
}

/// The basic header of a chunk: format plus chunk stream id.
#[derive(Debug, Clone, Copy)]
pub struct ChunkBasicHeader {
    /// The chunk format.
    pub format: ChunkType,
    /// The chunk stream id.
    pub chunk_stream_id: u32,
}

/// The message header of a chunk, fully resolved (after inheritance from previous chunks on
/// the same CSID has been applied).
#[derive(Debug, Clone, Copy)]
pub struct ChunkMessageHeader {
    /// The (possibly extended) timestamp of the message this chunk belongs to.
    pub timestamp: u32,
    /// The total length, in bytes, of the message this chunk belongs to.
    pub msg_length: u32,
    /// The message type id.
    pub msg_type_id: MessageType,
    /// The message stream id.
    pub msg_stream_id: u32,
}

impl ChunkMessageHeader {
    /// Whether this header requires the 4-byte extended timestamp field on the wire.
    pub fn is_extended_timestamp(&self) -> bool {
        self.timestamp >= EXTENDED_TIMESTAMP_THRESHOLD
    }
}

/// A fully assembled chunk: basic header, message header and payload.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// The basic header.
    pub basic_header: ChunkBasicHeader,
    /// The message header.
    pub message_header: ChunkMessageHeader,
    /// The (complete, for a decoded chunk) message payload.
    pub payload: Bytes,
}

impl Chunk {
    /// Construct a new chunk. Always uses a [`ChunkType::Type0`] basic header; the encoder
    /// downgrades subsequent chunks of the same message to Type3 as it splits the payload.
    pub fn new(chunk_stream_id: u32, timestamp: u32, msg_type_id: MessageType, msg_stream_id: u32, payload: Bytes) -> Self {
        Self {
            basic_header: ChunkBasicHeader {
                format: ChunkType::Type0,
                chunk_stream_id,
            },
            message_header: ChunkMessageHeader {
                timestamp,
                msg_length: payload.len() as u32,
                msg_type_id,
                msg_stream_id,
            },
            payload,
        }
    }
}
