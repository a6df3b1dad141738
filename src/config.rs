//! Server configuration.
//!
//! Defined by:
//! - spec.md section 6 "External interfaces"

use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for one listening RTMP server.
///
/// There is no file/env parsing layer here: the core is a library, and the application
/// embedding it is expected to populate this from whatever configuration source it already
/// uses.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address to accept TCP connections on.
    pub bind_address: SocketAddr,
    /// The application name `connect` is expected to name, e.g. `"live"` for `rtmp://host/live`.
    ///
    /// Not currently enforced by [`crate::session::ServerSession`]; `connect`'s `app` argument
    /// is accepted as given and only recorded, since nothing downstream depends on rejecting an
    /// unexpected one. Kept here so an embedder has a documented place to put it to validate it
    /// in an `on_publish_begin` hook of its own.
    pub application_name: String,
    /// If set, `publish`'s stream name must equal this for the publisher to be accepted.
    pub expected_stream_key: Option<String>,
    /// The chunk size this server advertises to the peer via `Set Chunk Size` on `connect`.
    pub initial_out_chunk_size: u32,
    /// The acknowledgement window this server advertises via `Window Acknowledgement Size`.
    pub window_ack_size: u32,
    /// The bandwidth limit this server advertises via `Set Peer Bandwidth`.
    pub peer_bandwidth: u32,
    /// How long to wait for a handshake step before giving up on the connection.
    pub handshake_timeout_ms: u64,
    /// How long to wait for any bytes from the peer before giving up on the connection.
    pub idle_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 1935)),
            application_name: "live".to_string(),
            expected_stream_key: None,
            initial_out_chunk_size: 4096,
            window_ack_size: 2_500_000,
            peer_bandwidth: 2_500_000,
            handshake_timeout_ms: 10_000,
            idle_timeout_ms: 60_000,
        }
    }
}

impl ServerConfig {
    /// The handshake timeout as a [`Duration`].
    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_millis(self.handshake_timeout_ms)
    }

    /// The idle-read timeout as a [`Duration`].
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_binds_standard_rtmp_port() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address.port(), 1935);
        assert_eq!(config.application_name, "live");
        assert!(config.expected_stream_key.is_none());
    }
}
