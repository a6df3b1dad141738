use crate::amf0::Amf0Object;
use crate::command_messages::CommandResultLevel;

/// `onStatus`: the server-to-client status event sent in reply to stream-level commands.
///
/// It is not very clear from the legacy RTMP spec whether `onStatus` belongs to NetConnection or
/// NetStream; in practice it is used as a reply to both, so it gets its own module.
#[derive(Debug, Clone, PartialEq)]
pub struct OnStatus {
    pub level: CommandResultLevel,
    pub code: String,
    pub description: Option<String>,
    /// Additional info-object properties beyond `level`/`code`/`description`.
    pub others: Amf0Object,
}

/// Well-known `onStatus` codes this server emits.
#[allow(unused)]
pub mod codes {
    pub const NET_CONNECTION_CONNECT_SUCCESS: &str = "NetConnection.Connect.Success";
    pub const NET_CONNECTION_CONNECT_REJECTED: &str = "NetConnection.Connect.Rejected";
    pub const NET_CONNECTION_CONNECT_CLOSED: &str = "NetConnection.Connect.Closed";

    pub const NET_STREAM_PUBLISH_START: &str = "NetStream.Publish.Start";
    pub const NET_STREAM_PUBLISH_BAD_NAME: &str = "NetStream.Publish.BadName";
    pub const NET_STREAM_UNPUBLISH_SUCCESS: &str = "NetStream.Unpublish.Success";
    pub const NET_STREAM_DELETE_STREAM_SUCCESS: &str = "NetStream.DeleteStream.Success";
}
