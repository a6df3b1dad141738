/// The size, in bytes, of C1/S1/C2/S2 (the 4-byte timestamp and 4-byte zero/version fields,
/// plus 1528 bytes of arbitrary data).
pub const RTMP_HANDSHAKE_SIZE: usize = 1536;
/// The combined length of the timestamp and zero fields that precede the random data in C1/S1.
pub const TIME_VERSION_LENGTH: usize = 8;

/// The server's position in the simple handshake state machine.
///
/// Defined by:
/// - Legacy RTMP spec, 5.2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerHandshakeState {
    /// Waiting to read C0 and C1.
    ReadC0C1,
    /// S0/S1/S2 have been written; waiting to read C2.
    ReadC2,
    /// The handshake is complete.
    Finish,
}
