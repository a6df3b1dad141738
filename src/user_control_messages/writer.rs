//! Writing user control messages. Only Stream Begin is ever written by this server.

use std::io;

use byteorder::{BigEndian, WriteBytesExt};

use super::define::{EventMessageStreamBegin, EventType};
use crate::chunk::{Chunk, ChunkWriter, ChunkWriteError, PROTOCOL_CONTROL_CHUNK_STREAM_ID};
use crate::messages::MessageType;

impl EventMessageStreamBegin {
    /// Writes this event on [`PROTOCOL_CONTROL_CHUNK_STREAM_ID`].
    pub fn write(&self, io: &mut impl io::Write, writer: &ChunkWriter) -> Result<(), ChunkWriteError> {
        let mut data = Vec::with_capacity(6);
        data.write_u16::<BigEndian>(EventType::StreamBegin.0).expect("vec write");
        data.write_u32::<BigEndian>(self.stream_id).expect("vec write");

        writer.write_chunk(
            io,
            Chunk::new(PROTOCOL_CONTROL_CHUNK_STREAM_ID, 0, MessageType::UserControlEvent, 0, data.into()),
        )
    }
}
