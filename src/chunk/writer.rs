//! Writing chunks.

use std::io;

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

use super::define::{Chunk, ChunkMessageHeader, ChunkType, INIT_CHUNK_SIZE};
use super::error::ChunkWriteError;

/// A chunk writer.
///
/// Always writes a Type0 (full) header for the first chunk of a message and Type3 headers for
/// every subsequent chunk of the same message, per the server's encode policy: peers are never
/// required to decompress Type1/Type2 headers we never send.
pub struct ChunkWriter {
    chunk_size: usize,
}

impl Default for ChunkWriter {
    fn default() -> Self {
        Self {
            chunk_size: INIT_CHUNK_SIZE,
        }
    }
}

impl ChunkWriter {
    /// Set the chunk size used to split subsequent messages.
    pub fn set_chunk_size(&mut self, chunk_size: usize) {
        self.chunk_size = chunk_size;
    }

    #[inline]
    fn write_basic_header(io: &mut impl io::Write, fmt: ChunkType, csid: u32) -> Result<(), ChunkWriteError> {
        let fmt = fmt as u8;

        if csid >= 64 + 255 {
            io.write_u8((fmt << 6) | 1)?;
            let csid = csid - 64;

            let div = csid / 256;
            let rem = csid % 256;

            io.write_u8(rem as u8)?;
            io.write_u8(div as u8)?;
        } else if csid >= 64 {
            io.write_u8(fmt << 6)?;
            io.write_u8((csid - 64) as u8)?;
        } else {
            io.write_u8((fmt << 6) | csid as u8)?;
        }

        Ok(())
    }

    #[inline]
    fn write_message_header(io: &mut impl io::Write, message_header: &ChunkMessageHeader) -> Result<(), ChunkWriteError> {
        let timestamp = if message_header.timestamp >= 0xFFFFFF {
            0xFFFFFF
        } else {
            message_header.timestamp
        };

        io.write_u24::<BigEndian>(timestamp)?;
        io.write_u24::<BigEndian>(message_header.msg_length)?;
        io.write_u8(message_header.msg_type_id.0)?;
        io.write_u32::<LittleEndian>(message_header.msg_stream_id)?;

        if message_header.is_extended_timestamp() {
            Self::write_extended_timestamp(io, message_header.timestamp)?;
        }

        Ok(())
    }

    #[inline]
    fn write_extended_timestamp(io: &mut impl io::Write, timestamp: u32) -> Result<(), ChunkWriteError> {
        io.write_u32::<BigEndian>(timestamp)?;
        Ok(())
    }

    /// Write a chunk, splitting the payload into `chunk_size`-sized pieces as needed.
    pub fn write_chunk(&self, io: &mut impl io::Write, mut chunk_info: Chunk) -> Result<(), ChunkWriteError> {
        Self::write_basic_header(io, ChunkType::Type0, chunk_info.basic_header.chunk_stream_id)?;
        Self::write_message_header(io, &chunk_info.message_header)?;

        // A zero-length message still needs its (empty) header written; the loop below
        // intentionally does nothing more in that case.
        while !chunk_info.payload.is_empty() {
            let cur_payload_size = chunk_info.payload.len().min(self.chunk_size);

            let payload_bytes = chunk_info.payload.split_to(cur_payload_size);
            io.write_all(&payload_bytes[..])?;

            if !chunk_info.payload.is_empty() {
                Self::write_basic_header(io, ChunkType::Type3, chunk_info.basic_header.chunk_stream_id)?;

                if chunk_info.message_header.is_extended_timestamp() {
                    Self::write_extended_timestamp(io, chunk_info.message_header.timestamp)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(all(test, coverage_nightly), coverage(off))]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::messages::MessageType;

    #[test]
    fn write_small_chunk() {
        let writer = ChunkWriter::default();
        let mut buf = Vec::new();

        let chunk = Chunk::new(
            0,
            0,
            MessageType::Abort,
            0,
            Bytes::from(vec![0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07]),
        );

        writer.write_chunk(&mut buf, chunk).unwrap();

        #[rustfmt::skip]
        assert_eq!(
            buf,
            vec![
                0x00 << 6,
                0x00, 0x00, 0x00,
                0x00, 0x00, 0x08,
                0x02,
                0x00, 0x00, 0x00, 0x00,
                0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07,
            ]
        );
    }

    #[test]
    fn write_large_chunk_splits() {
        let writer = ChunkWriter::default();
        let mut buf = Vec::new();

        let payload: Vec<u8> = (0..129).collect();
        let chunk = Chunk::new(10, 100, MessageType::Audio, 13, Bytes::from(payload));

        writer.write_chunk(&mut buf, chunk).unwrap();

        #[rustfmt::skip]
        let mut expected = vec![
            0x0A,
            0x00, 0x00, 0x64,
            0x00, 0x00, 0x81,
            0x08,
            0x0D, 0x00, 0x00, 0x00,
        ];
        expected.extend(0u8..128);
        expected.push((0x03 << 6) | 0x0A);
        expected.push(128);

        assert_eq!(buf, expected);
    }

    #[test]
    fn write_extended_timestamp() {
        let writer = ChunkWriter::default();
        let mut buf = Vec::new();

        let chunk = Chunk::new(0, 0xFFFFFFFF, MessageType::Abort, 0, Bytes::from(vec![0x01]));

        writer.write_chunk(&mut buf, chunk).unwrap();

        #[rustfmt::skip]
        assert_eq!(
            buf,
            vec![
                0x00 << 6,
                0xFF, 0xFF, 0xFF,
                0x00, 0x00, 0x01,
                0x02,
                0x00, 0x00, 0x00, 0x00,
                0xFF, 0xFF, 0xFF, 0xFF,
                0x01,
            ]
        );
    }

    #[test]
    fn write_extended_csid() {
        let writer = ChunkWriter::default();
        let mut buf = Vec::new();

        let chunk = Chunk::new(320, 0, MessageType::Abort, 0, Bytes::from(vec![0x01]));

        writer.write_chunk(&mut buf, chunk).unwrap();

        #[rustfmt::skip]
        assert_eq!(
            buf,
            vec![
                0x01,
                0x00,
                0x01,
                0x00, 0x00, 0x00,
                0x00, 0x00, 0x01,
                0x02,
                0x00, 0x00, 0x00, 0x00,
                0x01,
            ]
        );
    }
}
