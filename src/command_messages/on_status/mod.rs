//! `onStatus` events.
//!
//! The legacy RTMP spec describes `onStatus` under NetStream (7.2.2) while in practice it also
//! answers NetConnection-level conditions; it gets its own module rather than picking a side.

mod define;
mod writer;

pub use self::define::{OnStatus, codes};
