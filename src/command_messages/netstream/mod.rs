//! NetStream commands (legacy RTMP spec, section 7.2.2).

mod define;
mod reader;

pub use self::define::{NetStreamCommand, NetStreamCommandPublishType};
