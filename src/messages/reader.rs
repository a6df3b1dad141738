//! Dispatching an assembled [`Chunk`](crate::chunk::Chunk) payload into a [`MessageData`].

use super::{MessageData, MessageType};
use crate::chunk::Chunk;
use crate::command_messages::Command;
use crate::command_messages::error::CommandError;
use crate::protocol_control_messages::{ProtocolControlMessageSetChunkSize, ProtocolControlMessageWindowAcknowledgementSize};

/// Errors that can occur while interpreting a chunk's payload as a message.
#[derive(Debug, thiserror::Error)]
pub enum MessageReadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("command error: {0}")]
    Command(#[from] CommandError),
}

impl MessageData {
    /// Parses a fully-assembled chunk's payload, dispatching on its message type id.
    pub fn read(chunk: &Chunk) -> Result<Self, MessageReadError> {
        let msg_type_id = chunk.message_header.msg_type_id;
        let data = chunk.payload.clone();

        match msg_type_id {
            MessageType::SetChunkSize => Ok(Self::SetChunkSize(ProtocolControlMessageSetChunkSize::read(&data)?)),
            MessageType::WindowAcknowledgementSize => Ok(Self::WindowAcknowledgementSize(
                ProtocolControlMessageWindowAcknowledgementSize::read(&data)?,
            )),
            MessageType::SetPeerBandwidth => Ok(Self::SetPeerBandwidth),
            MessageType::Abort => Ok(Self::Abort),
            MessageType::Acknowledgement => Ok(Self::Acknowledgement),
            MessageType::UserControlEvent => Ok(Self::UserControl),
            MessageType::CommandAMF0 => Ok(Self::Amf0Command(Command::read(&data)?)),
            MessageType::DataAMF0 => Ok(Self::Amf0Data { data }),
            MessageType::Audio => Ok(Self::Audio { data }),
            MessageType::Video => Ok(Self::Video { data }),
            other => Ok(Self::Unknown {
                msg_type_id: other,
                data,
            }),
        }
    }
}
