/// NetStream commands, as defined in the legacy RTMP spec section 7.2.2, restricted to the
/// publish-side subset an ingest-only server needs to understand.
#[derive(Debug, Clone, PartialEq)]
pub enum NetStreamCommand {
    /// `publish`: the client wants to begin publishing a stream.
    Publish {
        publishing_name: String,
        publishing_type: NetStreamCommandPublishType,
    },
    /// `deleteStream`: the client is done with a NetStream it previously created.
    DeleteStream {
        stream_id: f64,
    },
    /// `FCUnpublish`: legacy pre-unpublish notification.
    FcUnpublish {
        stream_name: String,
    },
}

/// The publishing type argument of `publish`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetStreamCommandPublishType {
    /// A live stream; the server does not record it to disk.
    Live,
    /// The server records the stream, replacing any existing file of the same name.
    Record,
    /// The server records the stream, appending to any existing file of the same name.
    Append,
}

impl NetStreamCommandPublishType {
    pub fn from_str(s: &str) -> Self {
        match s {
            "record" => Self::Record,
            "append" => Self::Append,
            _ => Self::Live,
        }
    }
}
