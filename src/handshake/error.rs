#[derive(Debug, thiserror::Error)]
pub enum HandshakeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// C0 did not carry RTMP protocol version 3.
    #[error("unsupported handshake version {0}")]
    BadVersion(u8),
}
