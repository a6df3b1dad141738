//! User control messages.
//!
//! Defined by:
//! - Legacy RTMP spec, 6.2
//!
//! Only Stream Begin is emitted by this server; the other event types exist in the protocol
//! but are not produced by an ingest-only implementation.

mod define;
pub mod writer;

pub use self::define::{EventMessageStreamBegin, EventType};
