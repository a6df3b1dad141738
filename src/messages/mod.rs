//! RTMP message types and their type-id taxonomy.
//!
//! A logical [`MessageData`] is what the chunk codec assembles a full message's payload into,
//! dispatched on the message's `msg_type_id`. Type ids outside the recognised set are not an
//! error at this layer: they are surfaced as [`MessageData::Unknown`] and it is up to the
//! session state machine to decide whether to ignore them.

pub mod reader;

nutype_enum::nutype_enum! {
    /// One byte field identifying the kind of an RTMP message.
    ///
    /// Defined by:
    /// - Legacy RTMP spec, 5.4 (type ids 1-6)
    /// - Legacy RTMP spec, 7.1 (type ids 8, 9, 15-22)
    pub enum MessageType(u8) {
        /// Set Chunk Size
        SetChunkSize = 1,
        /// Abort Message
        Abort = 2,
        /// Acknowledgement
        Acknowledgement = 3,
        /// User Control Message
        UserControlEvent = 4,
        /// Window Acknowledgement Size
        WindowAcknowledgementSize = 5,
        /// Set Peer Bandwidth
        SetPeerBandwidth = 6,
        /// Audio Data
        Audio = 8,
        /// Video Data
        Video = 9,
        /// Amf3-encoded Metadata
        DataAMF3 = 15,
        /// Amf3-encoded Shared Object
        SharedObjAMF3 = 16,
        /// Amf3-encoded Command
        CommandAMF3 = 17,
        /// Amf0-encoded Metadata
        DataAMF0 = 18,
        /// Amf0-encoded Shared Object
        SharedObjAMF0 = 19,
        /// Amf0-encoded Command
        CommandAMF0 = 20,
        /// Aggregate Message
        Aggregate = 22,
    }
}

/// A decoded, type-dispatched RTMP message, paired with the envelope fields the session state
/// machine needs (stream id, timestamp) which [`reader::read_message`] attaches separately.
#[derive(Debug)]
pub enum MessageData {
    /// Set Chunk Size protocol control message.
    SetChunkSize(crate::protocol_control_messages::ProtocolControlMessageSetChunkSize),
    /// Window Acknowledgement Size protocol control message.
    WindowAcknowledgementSize(crate::protocol_control_messages::ProtocolControlMessageWindowAcknowledgementSize),
    /// Set Peer Bandwidth protocol control message (recognised but not acted upon; ingest-only
    /// servers have no peer to which they'd apply it).
    SetPeerBandwidth,
    /// Abort Message (recognised but unused by an ingest-only server).
    Abort,
    /// Acknowledgement of bytes received (recognised but unused; acknowledgement is one-way
    /// from server to publisher in this deployment).
    Acknowledgement,
    /// User Control Message (recognised but the server does not act on client-sent events).
    UserControl,
    /// An AMF0 command message.
    Amf0Command(crate::command_messages::Command),
    /// An AMF0 data message (e.g. `@setDataFrame`/`onMetaData`).
    Amf0Data {
        /// Raw AMF0-encoded payload.
        data: bytes::Bytes,
    },
    /// Audio payload (FLV AUDIODATA body).
    Audio {
        /// Raw payload.
        data: bytes::Bytes,
    },
    /// Video payload (FLV VIDEODATA body).
    Video {
        /// Raw payload.
        data: bytes::Bytes,
    },
    /// Any message whose type id is not part of the recognised taxonomy, or is recognised but
    /// not handled above (AMF3 variants). Forwarded so the session can log-and-ignore it.
    Unknown {
        /// The raw message type id.
        msg_type_id: MessageType,
        /// Raw payload.
        data: bytes::Bytes,
    },
}
