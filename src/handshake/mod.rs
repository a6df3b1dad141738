//! The RTMP handshake.
//!
//! Only the simple (non-digest) handshake variant is implemented: the digest/"complex"
//! handshake exists to let Flash Player verify it is talking to genuine Adobe server software,
//! which has no bearing on an ingest-only server that never needs to pass that check.
//!
//! Defined by:
//! - Legacy RTMP spec, 5.2

mod define;
mod error;
mod server;

pub use self::define::{RTMP_HANDSHAKE_SIZE, ServerHandshakeState};
pub use self::error::HandshakeError;
pub use self::server::HandshakeServer;
