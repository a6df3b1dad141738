nutype_enum::nutype_enum! {
    /// The event type of a User Control Message.
    pub enum EventType(u16) {
        /// Notifies the client that a stream has become functional and can be used for
        /// communication. The 4-byte event data is the stream id.
        StreamBegin = 0,
        /// Notifies the client that playback has ended.
        StreamEOF = 1,
        /// Notifies the client that there is no more data on the stream.
        StreamDry = 2,
        /// Client-sent buffer length hint.
        SetBufferLength = 3,
        /// Notifies the client that the stream is a recorded stream.
        StreamIsRecorded = 4,
        /// Server ping.
        PingRequest = 6,
        /// Client pong.
        PingResponse = 7,
    }
}

/// Notifies a client that a stream id has become functional.
///
/// Defined by:
/// - Legacy RTMP spec, 6.2.1
pub struct EventMessageStreamBegin {
    /// The stream id that became functional.
    pub stream_id: u32,
}
