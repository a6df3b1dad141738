/// Notifies the peer of a new maximum chunk size.
///
/// Defined by:
/// - Legacy RTMP spec, 5.4.1
#[derive(Debug, Clone, Copy)]
pub struct ProtocolControlMessageSetChunkSize {
    /// The new chunk size, in bytes. Valid range is `1..=0x7FFFFFFF`; the high bit is reserved
    /// and must be zero.
    pub chunk_size: u32,
}

/// Acknowledges receipt of data, carrying the total byte count received so far.
///
/// Defined by:
/// - Legacy RTMP spec, 5.4.3
#[derive(Debug, Clone, Copy)]
pub struct ProtocolControlMessageAcknowledgement {
    /// Total bytes received so far.
    pub sequence_number: u32,
}

/// Informs the peer of the window size to use between acknowledgements.
///
/// Defined by:
/// - Legacy RTMP spec, 5.4.4
#[derive(Debug, Clone, Copy)]
pub struct ProtocolControlMessageWindowAcknowledgementSize {
    /// The window size.
    pub acknowledgement_window_size: u32,
}

/// Limits the peer's output bandwidth to a window size.
///
/// Defined by:
/// - Legacy RTMP spec, 5.4.5
#[derive(Debug, Clone, Copy)]
pub struct ProtocolControlMessageSetPeerBandwidth {
    /// The window size to limit output bandwidth to.
    pub acknowledgement_window_size: u32,
    /// The limit type.
    pub limit_type: ProtocolControlMessageSetPeerBandwidthLimitType,
}

/// The limit type for [`ProtocolControlMessageSetPeerBandwidth`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, num_derive::FromPrimitive)]
#[repr(u8)]
pub enum ProtocolControlMessageSetPeerBandwidthLimitType {
    /// The peer must limit its output bandwidth to the indicated window size.
    Hard = 0,
    /// The peer must limit output bandwidth to the indicated window or its current limit,
    /// whichever is smaller.
    Soft = 1,
    /// Treated as Hard if the previous limit type was Hard, otherwise ignored.
    Dynamic = 2,
}
