//! Writing [`OnStatus`].

use std::io;

use bytes::{BufMut, BytesMut};

use super::OnStatus;
use crate::amf0::{Amf0Encoder, Amf0Value};
use crate::chunk::{Chunk, ChunkWriter, ON_STATUS_CHUNK_STREAM_ID};
use crate::command_messages::error::CommandError;
use crate::messages::MessageType;

impl OnStatus {
    /// Writes an `onStatus` command addressed to `stream_id`, on
    /// [`ON_STATUS_CHUNK_STREAM_ID`].
    pub fn write(self, io: &mut impl io::Write, writer: &ChunkWriter, stream_id: u32) -> Result<(), CommandError> {
        let mut buf = BytesMut::new();
        let mut buf_writer = (&mut buf).writer();

        Amf0Encoder::encode_string(&mut buf_writer, "onStatus")?;
        Amf0Encoder::encode_number(&mut buf_writer, 0.0)?;
        Amf0Encoder::encode_null(&mut buf_writer)?;

        let mut info = vec![
            ("level".to_string(), Amf0Value::String(self.level.as_str().to_string())),
            ("code".to_string(), Amf0Value::String(self.code)),
        ];
        if let Some(description) = self.description {
            info.push(("description".to_string(), Amf0Value::String(description)));
        }
        info.extend(self.others);

        Amf0Encoder::encode_value(&mut buf_writer, &Amf0Value::Object(info))?;

        writer.write_chunk(
            io,
            Chunk::new(ON_STATUS_CHUNK_STREAM_ID, 0, MessageType::CommandAMF0, stream_id, buf.freeze()),
        )?;

        Ok(())
    }
}
