//! The crate's aggregate error type.

/// Any error a caller driving a session or the raw codecs directly might see.
#[derive(Debug, thiserror::Error)]
pub enum RtmpError {
    /// I/O error on the underlying socket.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The chunk stream was malformed.
    #[error("chunk read error: {0}")]
    ChunkRead(#[from] crate::chunk::ChunkReadError),
    /// A chunk could not be written.
    #[error("chunk write error: {0}")]
    ChunkWrite(#[from] crate::chunk::ChunkWriteError),
    /// An AMF0 command could not be decoded or encoded.
    #[error("command error: {0}")]
    Command(#[from] crate::command_messages::error::CommandError),
    /// The handshake failed.
    #[error("handshake error: {0}")]
    Handshake(#[from] crate::handshake::HandshakeError),
    /// A session-level protocol error.
    #[error("session error: {0}")]
    Session(#[from] crate::session::SessionError),
}

impl RtmpError {
    /// Returns true if the error indicates a routine peer-initiated close, as opposed to a
    /// protocol violation worth logging loudly.
    pub fn is_client_closed(&self) -> bool {
        match self {
            Self::Io(err) => matches!(
                err.kind(),
                std::io::ErrorKind::ConnectionAborted | std::io::ErrorKind::ConnectionReset | std::io::ErrorKind::UnexpectedEof
            ),
            Self::Session(session_err) => session_err.is_peer_closed(),
            _ => false,
        }
    }
}
