//! Writing [`NetConnectionCommand`] results onto the wire.

use std::io;

use bytes::{BufMut, BytesMut};

use super::error::CommandError;
use super::netconnection::NetConnectionCommand;
use crate::amf0::Amf0Encoder;
use crate::chunk::{COMMAND_CHUNK_STREAM_ID, Chunk, ChunkWriter};
use crate::messages::MessageType;

/// Writes a [`NetConnectionCommand`] `_result` reply on [`COMMAND_CHUNK_STREAM_ID`], with
/// `message_stream_id = 0` (`_result` replies are not addressed to any particular NetStream).
pub fn write_netconnection_result(
    io: &mut impl io::Write,
    writer: &ChunkWriter,
    transaction_id: f64,
    command: NetConnectionCommand,
) -> Result<(), CommandError> {
    let mut buf = BytesMut::new();
    command.write(&mut (&mut buf).writer(), transaction_id)?;

    writer.write_chunk(
        io,
        Chunk::new(COMMAND_CHUNK_STREAM_ID, 0, MessageType::CommandAMF0, 0, buf.freeze()),
    )?;

    Ok(())
}

/// Writes a bare `_result(transactionId, null)` reply, used to neutrally acknowledge commands
/// (`releaseStream`, `FCPublish`, `FCUnpublish`) that carry no result payload of their own.
pub fn write_neutral_result(io: &mut impl io::Write, writer: &ChunkWriter, transaction_id: f64) -> Result<(), CommandError> {
    let mut buf = BytesMut::new();
    let mut buf_writer = (&mut buf).writer();

    Amf0Encoder::encode_string(&mut buf_writer, "_result")?;
    Amf0Encoder::encode_number(&mut buf_writer, transaction_id)?;
    Amf0Encoder::encode_null(&mut buf_writer)?;

    writer.write_chunk(
        io,
        Chunk::new(COMMAND_CHUNK_STREAM_ID, 0, MessageType::CommandAMF0, 0, buf.freeze()),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;
    use crate::amf0::Amf0Decoder;
    use crate::chunk::ChunkReader;
    use crate::command_messages::CommandResultLevel;

    #[test]
    fn writes_create_stream_result_on_command_csid() {
        let writer = ChunkWriter::default();
        let mut buf = Vec::new();

        write_netconnection_result(&mut buf, &writer, 4.0, NetConnectionCommand::CreateStreamResult { stream_id: 1.0 }).unwrap();

        let mut reader = ChunkReader::default();
        let mut bytes_mut = BytesMut::from(&buf[..]);
        let chunk = reader.read_chunk(&mut bytes_mut).unwrap().unwrap();

        assert_eq!(chunk.basic_header.chunk_stream_id, COMMAND_CHUNK_STREAM_ID);
        assert_eq!(chunk.message_header.msg_stream_id, 0);

        let mut decoder = Amf0Decoder::new(&chunk.payload);
        let values = decoder.decode_all().unwrap();
        assert_eq!(values[0].as_str(), Some("_result"));
        assert_eq!(values[3].as_f64(), Some(1.0));
    }

    #[test]
    fn writes_connect_result() {
        let writer = ChunkWriter::default();
        let mut buf = Vec::new();

        write_netconnection_result(
            &mut buf,
            &writer,
            1.0,
            NetConnectionCommand::ConnectResult {
                fmsver: "FMS/3,0,1,123".to_string(),
                capabilities: 31.0,
                level: CommandResultLevel::Status,
                code: "NetConnection.Connect.Success".to_string(),
                description: "Connection succeeded.".to_string(),
                encoding: 0.0,
            },
        )
        .unwrap();

        let mut reader = ChunkReader::default();
        let mut bytes_mut = BytesMut::from(&buf[..]);
        let chunk = reader.read_chunk(&mut bytes_mut).unwrap().unwrap();
        assert_eq!(chunk.message_header.msg_type_id.0, 20);
    }

    #[test]
    fn writes_neutral_result() {
        let writer = ChunkWriter::default();
        let mut buf = Vec::new();

        write_neutral_result(&mut buf, &writer, 3.0).unwrap();

        let mut reader = ChunkReader::default();
        let mut bytes_mut = BytesMut::from(&buf[..]);
        let chunk = reader.read_chunk(&mut bytes_mut).unwrap().unwrap();

        let mut decoder = Amf0Decoder::new(&chunk.payload);
        let values = decoder.decode_all().unwrap();
        assert_eq!(values[0].as_str(), Some("_result"));
        assert_eq!(values[1].as_f64(), Some(3.0));
        assert_eq!(values[2], crate::amf0::Amf0Value::Null);
    }
}
