//! Per-connection session state.
//!
//! Defined by:
//! - Legacy RTMP spec, section 7 (NetConnection/NetStream lifecycle)

use std::collections::HashMap;

use crate::command_messages::netstream::NetStreamCommandPublishType;
use crate::protocol_control_messages::ProtocolControlMessageSetPeerBandwidthLimitType;

/// Where a connection is in the session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The RTMP handshake has not yet completed.
    Handshaking,
    /// Waiting for the client's `connect` command.
    AwaitConnect,
    /// `connect` has succeeded; waiting for `releaseStream`/`FCPublish`/`createStream`.
    Connected,
    /// `createStream` has succeeded; waiting for `publish` on the new stream id.
    AwaitCreateStream,
    /// A publisher is actively sending media.
    Publishing,
    /// The connection is tearing down.
    Closing,
}

/// The state of one NetStream allocated via `createStream`.
#[derive(Debug, Clone)]
pub struct StreamState {
    /// The stream id, as returned from `createStream`.
    pub id: u32,
    /// The stream (key) name given to `publish`. Empty until `publish` arrives.
    pub name: String,
    /// The publish type argument of `publish`.
    pub publish_type: NetStreamCommandPublishType,
    /// Whether a publisher is currently sending media on this stream.
    pub publisher_alive: bool,
}

/// All per-connection state the session state machine tracks.
#[derive(Debug)]
pub struct SessionState {
    /// Current lifecycle phase.
    pub phase: Phase,
    /// The chunk size currently in effect for inbound messages.
    pub in_chunk_size: usize,
    /// The chunk size currently in effect for outbound messages.
    pub out_chunk_size: usize,
    /// The peer's requested acknowledgement window, once known from the client's own Window Ack
    /// Size message (clients rarely send one; this stays 0, disabling the check, until they do).
    pub window_ack_size_in: u32,
    /// The acknowledgement window this server advertised to the peer.
    pub window_ack_size_out: u32,
    /// Total bytes received from the peer so far.
    pub bytes_received: u64,
    /// Total bytes acknowledged so far.
    pub bytes_acked: u64,
    /// The limit type last sent with Set Peer Bandwidth.
    pub peer_bw_limit_type: ProtocolControlMessageSetPeerBandwidthLimitType,
    /// The next stream id `createStream` will allocate.
    pub next_stream_id: u32,
    /// Streams created via `createStream`, keyed by stream id.
    pub streams: HashMap<u32, StreamState>,
    /// The stream name `publish` must match, if access control is configured.
    pub expected_stream_key: Option<String>,
    /// The application name given to `connect`, once known.
    pub app_name: Option<String>,
}

impl SessionState {
    /// Constructs the initial state of a fresh connection.
    pub fn new(expected_stream_key: Option<String>) -> Self {
        Self {
            phase: Phase::Handshaking,
            in_chunk_size: 128,
            out_chunk_size: 128,
            window_ack_size_in: 0,
            window_ack_size_out: 0,
            bytes_received: 0,
            bytes_acked: 0,
            peer_bw_limit_type: ProtocolControlMessageSetPeerBandwidthLimitType::Dynamic,
            next_stream_id: 1,
            streams: HashMap::new(),
            expected_stream_key,
            app_name: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_starts_in_handshaking_with_default_chunk_size() {
        let state = SessionState::new(None);
        assert_eq!(state.phase, Phase::Handshaking);
        assert_eq!(state.in_chunk_size, 128);
        assert_eq!(state.next_stream_id, 1);
        assert!(state.streams.is_empty());
    }
}
