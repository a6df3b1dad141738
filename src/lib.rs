//! An ingest-only RTMP 1.0 server.
//!
//! This crate accepts TCP connections from publishing clients (FFmpeg, OBS, and similar),
//! performs the RTMP handshake, de-chunks the duplex message stream, drives the
//! NetConnection/NetStream control dialogue required to let a publisher start sending media,
//! and hands decoded audio/video/data payloads to an application-provided
//! [`session::SessionHandler`].
//!
//! Playback, relaying, multi-publisher fan-out, and the secure/digest handshake variant are
//! out of scope: see the module docs on [`session`] for the state machine this crate drives.
//!
//! ```no_run
//! use rtmp_ingest::config::ServerConfig;
//! use rtmp_ingest::session::{MediaKind, PublishEndReason, SessionHandler};
//!
//! struct LoggingHandler;
//!
//! impl SessionHandler for LoggingHandler {
//!     type Error = std::convert::Infallible;
//!
//!     async fn on_publish_begin(
//!         &mut self,
//!         stream_id: u32,
//!         app: &str,
//!         stream_name: &str,
//!         _metadata: Option<bytes::Bytes>,
//!     ) -> Result<(), Self::Error> {
//!         println!("publish begin: {stream_id} {app}/{stream_name}");
//!         Ok(())
//!     }
//!
//!     async fn on_media(
//!         &mut self,
//!         _stream_id: u32,
//!         _kind: MediaKind,
//!         _timestamp: u32,
//!         _payload: bytes::Bytes,
//!     ) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//!
//!     async fn on_publish_end(&mut self, _stream_id: u32, _reason: PublishEndReason) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let (ctx, _handle) = scuffle_context::Context::new();
//!     rtmp_ingest::listener::serve(ServerConfig::default(), ctx, || LoggingHandler).await
//! }
//! ```
#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]

pub mod amf0;
pub mod chunk;
pub mod command_messages;
pub mod config;
pub mod error;
pub mod handshake;
pub mod listener;
pub mod messages;
pub mod protocol_control_messages;
pub mod session;
pub mod user_control_messages;

pub use self::config::ServerConfig;
pub use self::error::RtmpError;
pub use self::session::ServerSession;
