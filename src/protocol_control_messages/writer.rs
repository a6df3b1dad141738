//! Writing protocol control messages. All are carried on
//! [`crate::chunk::PROTOCOL_CONTROL_CHUNK_STREAM_ID`] with `message_stream_id = 0`.

use std::io;

use byteorder::{BigEndian, WriteBytesExt};
use bytes::Bytes;

use super::{
    ProtocolControlMessageAcknowledgement, ProtocolControlMessageError, ProtocolControlMessageSetChunkSize,
    ProtocolControlMessageSetPeerBandwidth, ProtocolControlMessageWindowAcknowledgementSize,
};
use crate::chunk::{Chunk, ChunkWriter, PROTOCOL_CONTROL_CHUNK_STREAM_ID};
use crate::messages::MessageType;

impl ProtocolControlMessageSetChunkSize {
    /// Writes this message to `io`.
    pub fn write(&self, io: &mut impl io::Write, writer: &ChunkWriter) -> Result<(), ProtocolControlMessageError> {
        let chunk_size = self.chunk_size & 0x7FFF_FFFF;

        writer.write_chunk(
            io,
            Chunk::new(
                PROTOCOL_CONTROL_CHUNK_STREAM_ID,
                0,
                MessageType::SetChunkSize,
                0,
                Bytes::from(chunk_size.to_be_bytes().to_vec()),
            ),
        )?;

        Ok(())
    }
}

impl ProtocolControlMessageAcknowledgement {
    /// Writes this message to `io`.
    pub fn write(&self, io: &mut impl io::Write, writer: &ChunkWriter) -> Result<(), ProtocolControlMessageError> {
        writer.write_chunk(
            io,
            Chunk::new(
                PROTOCOL_CONTROL_CHUNK_STREAM_ID,
                0,
                MessageType::Acknowledgement,
                0,
                Bytes::from(self.sequence_number.to_be_bytes().to_vec()),
            ),
        )?;

        Ok(())
    }
}

impl ProtocolControlMessageWindowAcknowledgementSize {
    /// Writes this message to `io`.
    pub fn write(&self, io: &mut impl io::Write, writer: &ChunkWriter) -> Result<(), ProtocolControlMessageError> {
        writer.write_chunk(
            io,
            Chunk::new(
                PROTOCOL_CONTROL_CHUNK_STREAM_ID,
                0,
                MessageType::WindowAcknowledgementSize,
                0,
                Bytes::from(self.acknowledgement_window_size.to_be_bytes().to_vec()),
            ),
        )?;

        Ok(())
    }
}

impl ProtocolControlMessageSetPeerBandwidth {
    /// Writes this message to `io`.
    pub fn write(&self, io: &mut impl io::Write, writer: &ChunkWriter) -> Result<(), ProtocolControlMessageError> {
        let mut data = Vec::with_capacity(5);
        data.write_u32::<BigEndian>(self.acknowledgement_window_size).expect("vec write");
        data.write_u8(self.limit_type as u8).expect("vec write");

        writer.write_chunk(
            io,
            Chunk::new(PROTOCOL_CONTROL_CHUNK_STREAM_ID, 0, MessageType::SetPeerBandwidth, 0, Bytes::from(data)),
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;
    use crate::chunk::ChunkReader;
    use crate::protocol_control_messages::ProtocolControlMessageSetPeerBandwidthLimitType;

    #[test]
    fn write_set_chunk_size() {
        let writer = ChunkWriter::default();
        let mut buf = Vec::new();

        ProtocolControlMessageSetChunkSize { chunk_size: 4096 }.write(&mut buf, &writer).unwrap();

        let mut reader = ChunkReader::default();
        let mut bytes_mut = BytesMut::from(&buf[..]);
        let chunk = reader.read_chunk(&mut bytes_mut).unwrap().unwrap();

        assert_eq!(chunk.basic_header.chunk_stream_id, 2);
        assert_eq!(chunk.message_header.msg_type_id.0, 0x01);
        assert_eq!(&chunk.payload[..], &[0x00, 0x00, 0x10, 0x00]);
    }

    #[test]
    fn write_set_peer_bandwidth() {
        let writer = ChunkWriter::default();
        let mut buf = Vec::new();

        ProtocolControlMessageSetPeerBandwidth {
            acknowledgement_window_size: 2_500_000,
            limit_type: ProtocolControlMessageSetPeerBandwidthLimitType::Dynamic,
        }
        .write(&mut buf, &writer)
        .unwrap();

        let mut reader = ChunkReader::default();
        let mut bytes_mut = BytesMut::from(&buf[..]);
        let chunk = reader.read_chunk(&mut bytes_mut).unwrap().unwrap();

        assert_eq!(chunk.message_header.msg_type_id.0, 0x06);
        assert_eq!(&chunk.payload[..], &[0x00, 0x26, 0x25, 0xA0, 0x02]);
    }
}
