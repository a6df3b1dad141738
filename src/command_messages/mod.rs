//! The AMF0 command dialogue carried over NetConnection/NetStream: `connect`, `releaseStream`,
//! `FCPublish`, `createStream`, `publish`, `deleteStream`, and the server's `_result`/`onStatus`
//! replies.
//!
//! Defined by:
//! - Legacy RTMP spec, section 7.1.1, 7.2

mod define;
pub mod error;
pub mod netconnection;
pub mod netstream;
pub mod on_status;
mod reader;
mod writer;

pub use self::define::CommandResultLevel;
pub use self::writer::{write_neutral_result, write_netconnection_result};
use self::netconnection::NetConnectionCommand;
use self::netstream::NetStreamCommand;
use crate::amf0::Amf0Value;

/// A command message: a name, a transaction id, and a type-dispatched payload.
///
/// Defined by:
/// - Legacy RTMP spec, section 7.1.1
#[derive(Debug, Clone)]
pub struct Command {
    /// The transaction id the peer expects echoed back in the matching reply.
    pub transaction_id: f64,
    pub command_type: CommandType,
}

/// The recognized command families, plus a catch-all for anything else a client sends (real
/// encoders are not shy about sending vendor commands outside any spec).
#[derive(Debug, Clone)]
pub enum CommandType {
    NetConnection(NetConnectionCommand),
    NetStream(NetStreamCommand),
    /// An unrecognized command name, carried with whatever argument values followed it.
    Unknown { name: String, values: Vec<Amf0Value> },
}
