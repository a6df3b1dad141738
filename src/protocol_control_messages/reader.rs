//! Reading protocol control messages from a message payload.

use std::io;

use byteorder::{BigEndian, ReadBytesExt};

use super::{ProtocolControlMessageSetChunkSize, ProtocolControlMessageWindowAcknowledgementSize};

impl ProtocolControlMessageSetChunkSize {
    /// Reads a [`ProtocolControlMessageSetChunkSize`] from a message payload.
    pub fn read(data: &[u8]) -> io::Result<Self> {
        let mut cursor = io::Cursor::new(data);
        let chunk_size = cursor.read_u32::<BigEndian>()? & 0x7FFF_FFFF;
        Ok(Self { chunk_size })
    }
}

impl ProtocolControlMessageWindowAcknowledgementSize {
    /// Reads a [`ProtocolControlMessageWindowAcknowledgementSize`] from a message payload.
    pub fn read(data: &[u8]) -> io::Result<Self> {
        let mut cursor = io::Cursor::new(data);
        let acknowledgement_window_size = cursor.read_u32::<BigEndian>()?;
        Ok(Self {
            acknowledgement_window_size,
        })
    }
}
