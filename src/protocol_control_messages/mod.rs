//! Protocol control messages.
//!
//! Defined by:
//! - Legacy RTMP spec, 5.4

mod define;
mod error;
pub mod reader;
pub mod writer;

pub use self::define::{
    ProtocolControlMessageAcknowledgement, ProtocolControlMessageSetChunkSize, ProtocolControlMessageSetPeerBandwidth,
    ProtocolControlMessageSetPeerBandwidthLimitType, ProtocolControlMessageWindowAcknowledgementSize,
};
pub use self::error::ProtocolControlMessageError;
