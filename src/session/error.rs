//! Error type for server sessions.

use std::io;

/// Errors that can occur while driving a server session.
///
/// Defined by:
/// - spec.md section 7 "Error handling design"
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Clean EOF from the peer. Routine; not logged as a failure.
    #[error("peer closed the connection")]
    PeerClosed,
    /// The handshake or idle read deadline elapsed.
    #[error("timed out waiting for the peer")]
    Timeout,
    /// A command arrived in a phase that does not permit it (e.g. anything but `connect`
    /// while `AwaitConnect`).
    #[error("unexpected command: {0}")]
    UnexpectedCommand(&'static str),
    /// `publish`'s stream name did not match the configured stream key.
    #[error("stream key mismatch")]
    BadStreamKey,
    /// The handshake engine failed.
    #[error("handshake error: {0}")]
    Handshake(#[from] crate::handshake::HandshakeError),
    /// The chunk stream was malformed.
    #[error("malformed chunk stream: {0}")]
    MalformedChunk(#[from] crate::chunk::ChunkReadError),
    /// A chunk could not be written.
    #[error("chunk write error: {0}")]
    ChunkWrite(#[from] crate::chunk::ChunkWriteError),
    /// A protocol control message could not be built or written.
    #[error("protocol control message error: {0}")]
    ProtocolControl(#[from] crate::protocol_control_messages::ProtocolControlMessageError),
    /// A message payload could not be dispatched by type id.
    #[error("malformed message: {0}")]
    Message(#[from] crate::messages::reader::MessageReadError),
    /// An AMF0 command could not be decoded or encoded.
    #[error("malformed amf0 command: {0}")]
    MalformedAmf(#[from] crate::command_messages::error::CommandError),
    /// The media sink returned an error.
    #[error("media sink error: {0}")]
    SinkError(Box<dyn std::error::Error + Send + Sync>),
    /// I/O error on the underlying socket.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl SessionError {
    /// Whether this error represents a routine peer-initiated close, as opposed to a protocol
    /// violation worth logging loudly.
    pub fn is_peer_closed(&self) -> bool {
        matches!(self, Self::PeerClosed)
    }
}
