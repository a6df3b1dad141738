//! Reading (de-chunking) an inbound chunk stream into whole messages.
//!
//! This is a pull parser: [`ChunkReader::read_chunk`] consumes as many wire-level chunks as are
//! currently buffered, and returns `Ok(Some(chunk))` as soon as any chunk stream's reassembly
//! buffer reaches its message length. Chunk streams are otherwise independent of each other, so
//! interleaved chunks from two different CSIDs are reassembled concurrently.

use std::collections::HashMap;

use bytes::{Buf, Bytes, BytesMut};
use num_traits::FromPrimitive;

use super::define::{Chunk, ChunkBasicHeader, ChunkMessageHeader, ChunkType, EXTENDED_TIMESTAMP_THRESHOLD, INIT_CHUNK_SIZE};
use super::error::ChunkReadError;
use crate::messages::MessageType;

/// Per-CSID reassembly context. Created on the first Type-0 header seen for a chunk stream id
/// and kept for the lifetime of the connection.
struct CsidContext {
    last_timestamp: u32,
    last_timestamp_delta: u32,
    last_message_length: u32,
    last_type_id: MessageType,
    last_message_stream_id: u32,
    extended_timestamp_present: bool,
    partial_payload: BytesMut,
}

impl CsidContext {
    fn from_type0(timestamp: u32, extended: bool, msg_length: u32, msg_type_id: MessageType, msg_stream_id: u32) -> Self {
        Self {
            last_timestamp: timestamp,
            last_timestamp_delta: 0,
            last_message_length: msg_length,
            last_type_id: msg_type_id,
            last_message_stream_id: msg_stream_id,
            extended_timestamp_present: extended,
            partial_payload: BytesMut::new(),
        }
    }
}

/// Maximum size a single in-flight reassembly buffer is allowed to grow to. RTMP message
/// lengths are bounded to 3 bytes (16,777,215) by the wire format itself, so this is mostly a
/// defensive bound against a peer that lies about `message_length`.
const MAX_PARTIAL_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// A chunk-stream decoder.
pub struct ChunkReader {
    in_chunk_size: usize,
    contexts: HashMap<u32, CsidContext>,
}

impl Default for ChunkReader {
    fn default() -> Self {
        Self {
            in_chunk_size: INIT_CHUNK_SIZE,
            contexts: HashMap::new(),
        }
    }
}

impl ChunkReader {
    /// Update the chunk size used to bound subsequent payload reads. Per the control-message
    /// emission policy, this takes effect for chunks parsed *after* this call, not retroactively.
    pub fn set_chunk_size(&mut self, chunk_size: usize) {
        self.in_chunk_size = chunk_size;
    }

    /// Attempt to read one complete [`Chunk`] (a whole reassembled message) from `buf`.
    ///
    /// Returns `Ok(None)` if the buffer does not yet contain a complete wire-level chunk, or
    /// contains only chunks that do not complete any message's reassembly. Bytes belonging to
    /// completed wire-level chunks are always consumed from `buf`, even when `Ok(None)` is
    /// returned, so repeated calls make progress as more bytes arrive.
    pub fn read_chunk(&mut self, buf: &mut BytesMut) -> Result<Option<Chunk>, ChunkReadError> {
        loop {
            match self.try_read_one(buf)? {
                ReadOutcome::Incomplete => return Ok(None),
                ReadOutcome::Progressed => continue,
                ReadOutcome::Message(chunk) => return Ok(Some(chunk)),
            }
        }
    }

    /// Try to parse and consume exactly one wire-level chunk from the front of `buf`.
    fn try_read_one(&mut self, buf: &mut BytesMut) -> Result<ReadOutcome, ChunkReadError> {
        let data = &buf[..];

        let Some((format, csid, basic_header_len)) = read_basic_header(data) else {
            return Ok(ReadOutcome::Incomplete);
        };

        let rest = &data[basic_header_len..];

        let mid_message = self
            .contexts
            .get(&csid)
            .is_some_and(|ctx| !ctx.partial_payload.is_empty());

        if mid_message && format != ChunkType::Type3 {
            return Err(ChunkReadError::InterleavedMessage(csid));
        }

        let header_len = match format {
            ChunkType::Type0 => 11,
            ChunkType::Type1 => 7,
            ChunkType::Type2 => 3,
            ChunkType::Type3 => 0,
        };

        if rest.len() < header_len {
            return Ok(ReadOutcome::Incomplete);
        }

        // Peek whether an extended timestamp field follows, and how large it is, before
        // committing to consuming anything.
        let extended_len = match format {
            ChunkType::Type0 | ChunkType::Type1 | ChunkType::Type2 => {
                let raw_ts = u32::from_be_bytes([0, rest[0], rest[1], rest[2]]);
                if raw_ts == EXTENDED_TIMESTAMP_THRESHOLD { 4 } else { 0 }
            }
            ChunkType::Type3 => {
                if self.contexts.get(&csid).is_some_and(|ctx| ctx.extended_timestamp_present) {
                    4
                } else {
                    0
                }
            }
        };

        if rest.len() < header_len + extended_len {
            return Ok(ReadOutcome::Incomplete);
        }

        // Resolve the (possibly-inherited) logical header fields for this chunk without yet
        // touching the payload.
        let (timestamp, extended_present, msg_length, msg_type_id, msg_stream_id, new_delta) = match format {
            ChunkType::Type0 => {
                let msg_length = u32::from_be_bytes([0, rest[3], rest[4], rest[5]]);
                let raw_type_id = rest[6];
                let msg_type_id = MessageType(raw_type_id);
                let msg_stream_id = u32::from_le_bytes([rest[7], rest[8], rest[9], rest[10]]);

                let (timestamp, extended) = if extended_len == 4 {
                    (u32::from_be_bytes([rest[11], rest[12], rest[13], rest[14]]), true)
                } else {
                    (u32::from_be_bytes([0, rest[0], rest[1], rest[2]]), false)
                };

                (timestamp, extended, msg_length, msg_type_id, msg_stream_id, 0)
            }
            ChunkType::Type1 => {
                let ctx = self
                    .contexts
                    .get(&csid)
                    .ok_or(ChunkReadError::MissingPreviousChunkHeader(csid))?;

                let msg_length = u32::from_be_bytes([0, rest[3], rest[4], rest[5]]);
                let msg_type_id = MessageType(rest[6]);
                let msg_stream_id = ctx.last_message_stream_id;

                let (delta, extended) = if extended_len == 4 {
                    (u32::from_be_bytes([rest[7], rest[8], rest[9], rest[10]]), true)
                } else {
                    (u32::from_be_bytes([0, rest[0], rest[1], rest[2]]), false)
                };

                let timestamp = ctx
                    .last_timestamp
                    .checked_add(delta)
                    .ok_or(ChunkReadError::TimestampOverflow(ctx.last_timestamp, delta))?;

                (timestamp, extended, msg_length, msg_type_id, msg_stream_id, delta)
            }
            ChunkType::Type2 => {
                let ctx = self
                    .contexts
                    .get(&csid)
                    .ok_or(ChunkReadError::MissingPreviousChunkHeader(csid))?;

                let (delta, extended) = if extended_len == 4 {
                    (u32::from_be_bytes([rest[3], rest[4], rest[5], rest[6]]), true)
                } else {
                    (u32::from_be_bytes([0, rest[0], rest[1], rest[2]]), false)
                };

                let timestamp = ctx
                    .last_timestamp
                    .checked_add(delta)
                    .ok_or(ChunkReadError::TimestampOverflow(ctx.last_timestamp, delta))?;

                (
                    timestamp,
                    extended,
                    ctx.last_message_length,
                    ctx.last_type_id,
                    ctx.last_message_stream_id,
                    delta,
                )
            }
            ChunkType::Type3 => {
                let ctx = self
                    .contexts
                    .get(&csid)
                    .ok_or(ChunkReadError::MissingPreviousChunkHeader(csid))?;

                if !ctx.partial_payload.is_empty() {
                    // Continuation of the message currently being reassembled: timestamp does
                    // not advance, and no new header fields are introduced.
                    (
                        ctx.last_timestamp,
                        ctx.extended_timestamp_present,
                        ctx.last_message_length,
                        ctx.last_type_id,
                        ctx.last_message_stream_id,
                        ctx.last_timestamp_delta,
                    )
                } else {
                    // Shorthand for "a new message with the same header as before".
                    let delta = ctx.last_timestamp_delta;
                    let timestamp = ctx
                        .last_timestamp
                        .checked_add(delta)
                        .ok_or(ChunkReadError::TimestampOverflow(ctx.last_timestamp, delta))?;

                    (
                        timestamp,
                        ctx.extended_timestamp_present,
                        ctx.last_message_length,
                        ctx.last_type_id,
                        ctx.last_message_stream_id,
                        delta,
                    )
                }
            }
        };

        let total_header_len = basic_header_len + header_len + extended_len;
        let remaining_for_message = msg_length as usize - self.partial_len(csid);
        let payload_chunk_len = remaining_for_message.min(self.in_chunk_size);

        if buf.len() < total_header_len + payload_chunk_len {
            return Ok(ReadOutcome::Incomplete);
        }

        if msg_length as usize > MAX_PARTIAL_CHUNK_SIZE {
            return Err(ChunkReadError::PartialChunkTooLarge(msg_length as usize));
        }

        buf.advance(total_header_len);
        let payload_piece = buf.split_to(payload_chunk_len).freeze();

        let ctx = self.contexts.entry(csid).or_insert_with(|| {
            CsidContext::from_type0(timestamp, extended_present, msg_length, msg_type_id, msg_stream_id)
        });
        ctx.last_timestamp = timestamp;
        ctx.last_timestamp_delta = new_delta;
        ctx.last_message_length = msg_length;
        ctx.last_type_id = msg_type_id;
        ctx.last_message_stream_id = msg_stream_id;
        ctx.extended_timestamp_present = extended_present;
        ctx.partial_payload.extend_from_slice(&payload_piece);

        if ctx.partial_payload.len() as u32 >= msg_length {
            let payload: Bytes = std::mem::take(&mut ctx.partial_payload).freeze();

            Ok(ReadOutcome::Message(Chunk {
                basic_header: ChunkBasicHeader {
                    format,
                    chunk_stream_id: csid,
                },
                message_header: ChunkMessageHeader {
                    timestamp,
                    msg_length,
                    msg_type_id,
                    msg_stream_id,
                },
                payload,
            }))
        } else {
            Ok(ReadOutcome::Progressed)
        }
    }

    fn partial_len(&self, csid: u32) -> usize {
        self.contexts.get(&csid).map(|ctx| ctx.partial_payload.len()).unwrap_or(0)
    }
}

enum ReadOutcome {
    /// Not enough bytes buffered yet to make progress.
    Incomplete,
    /// A wire chunk was consumed but no message completed.
    Progressed,
    /// A wire chunk was consumed and completed a message's reassembly.
    Message(Chunk),
}

/// Parse the basic header at the start of `data`, returning `(format, csid, bytes consumed)`,
/// or `None` if `data` does not yet hold a complete basic header.
fn read_basic_header(data: &[u8]) -> Option<(ChunkType, u32, usize)> {
    let first = *data.first()?;
    let format = ChunkType::from_u8(first >> 6)?;
    let low6 = first & 0b0011_1111;

    match low6 {
        0 => {
            let b0 = *data.get(1)?;
            Some((format, 64 + b0 as u32, 2))
        }
        1 => {
            let b0 = *data.get(1)?;
            let b1 = *data.get(2)?;
            Some((format, 64 + b0 as u32 + 256 * b1 as u32, 3))
        }
        csid => Some((format, csid as u32, 1)),
    }
}

#[cfg(test)]
#[cfg_attr(all(test, coverage_nightly), coverage(off))]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::chunk::writer::ChunkWriter;
    use crate::messages::MessageType;

    fn roundtrip(csid: u32, timestamp: u32, msg_type_id: MessageType, msg_stream_id: u32, payload: Vec<u8>, chunk_size: usize) {
        let mut writer = ChunkWriter::default();
        writer.set_chunk_size(chunk_size);

        let mut buf = Vec::new();
        writer
            .write_chunk(
                &mut buf,
                Chunk::new(csid, timestamp, msg_type_id, msg_stream_id, Bytes::from(payload.clone())),
            )
            .unwrap();

        let mut reader = ChunkReader::default();
        reader.set_chunk_size(chunk_size);

        let mut bytes_mut = BytesMut::from(&buf[..]);
        let chunk = reader.read_chunk(&mut bytes_mut).unwrap().expect("a full message");

        assert_eq!(chunk.basic_header.chunk_stream_id, csid);
        assert_eq!(chunk.message_header.timestamp, timestamp);
        assert_eq!(chunk.message_header.msg_type_id.0, msg_type_id.0);
        assert_eq!(chunk.message_header.msg_stream_id, msg_stream_id);
        assert_eq!(&chunk.payload[..], &payload[..]);
        assert!(bytes_mut.is_empty());
    }

    #[test]
    fn small_message_roundtrip() {
        roundtrip(3, 0, MessageType::CommandAMF0, 0, vec![1, 2, 3, 4], 128);
    }

    #[test]
    fn multi_chunk_message_roundtrip() {
        let payload: Vec<u8> = (0..500u32).map(|v| v as u8).collect();
        roundtrip(6, 100, MessageType::Video, 1, payload, 128);
    }

    #[test]
    fn extended_timestamp_roundtrip() {
        roundtrip(7, 0x0100_0000, MessageType::Audio, 1, vec![9, 9, 9], 4096);
    }

    #[test]
    fn extended_csid_roundtrip() {
        roundtrip(320, 0, MessageType::Audio, 1, vec![1], 4096);
    }

    #[test]
    fn type0_requires_empty_partial() {
        let mut reader = ChunkReader::default();
        reader.set_chunk_size(5);

        let mut buf = BytesMut::new();
        // Type0 header on csid 3, message_length = 10, only 5 payload bytes supplied: the
        // message is left half-assembled.
        buf.extend_from_slice(&[0x03, 0, 0, 0, 0, 0, 10, 0x09, 1, 0, 0, 0]);
        buf.extend_from_slice(&[0u8; 5]);
        assert!(matches!(reader.read_chunk(&mut buf), Ok(None)));

        // Another Type0 header for the same CSID while reassembly is in progress is illegal.
        buf.extend_from_slice(&[0x03, 0, 0, 0, 0, 0, 10, 0x09, 1, 0, 0, 0]);
        buf.extend_from_slice(&[0u8; 5]);

        let err = reader.read_chunk(&mut buf).unwrap_err();
        assert!(matches!(err, ChunkReadError::InterleavedMessage(3)));
    }

    #[test]
    fn missing_previous_header_on_type3() {
        let mut reader = ChunkReader::default();
        // fmt=3, csid=3, no prior Type0 header recorded for this CSID. This is also the
        // literal 0xC3 byte that a buggy source implementation is known to strip from
        // payloads; it must be treated as an ordinary (if erroneous here) basic header.
        let mut buf = BytesMut::from(&[0xC3u8][..]);

        let err = reader.read_chunk(&mut buf).unwrap_err();
        assert!(matches!(err, ChunkReadError::MissingPreviousChunkHeader(3)));
    }

    #[test]
    fn interleaved_csids_reassemble_independently() {
        let writer = ChunkWriter::default();
        let mut buf = Vec::new();

        // Manually write two Type0 single-chunk messages on different CSIDs back to back; this
        // simulates chunk-level interleaving since each is independently addressed by CSID.
        writer
            .write_chunk(&mut buf, Chunk::new(6, 0, MessageType::Audio, 1, Bytes::from_static(b"audio")))
            .unwrap();
        writer
            .write_chunk(&mut buf, Chunk::new(7, 0, MessageType::Video, 1, Bytes::from_static(b"video")))
            .unwrap();

        let mut reader = ChunkReader::default();
        let mut bytes_mut = BytesMut::from(&buf[..]);

        let first = reader.read_chunk(&mut bytes_mut).unwrap().unwrap();
        let second = reader.read_chunk(&mut bytes_mut).unwrap().unwrap();

        assert_eq!(&first.payload[..], b"audio");
        assert_eq!(&second.payload[..], b"video");
    }
}
