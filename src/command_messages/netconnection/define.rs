use crate::command_messages::CommandResultLevel;

/// NetConnection commands, as defined in the legacy RTMP spec section 7.2.1, plus the
/// `releaseStream`/`FCPublish` pair that every publishing client sends before `createStream`
/// even though neither appears in that spec.
#[derive(Debug, Clone)]
pub enum NetConnectionCommand {
    /// `connect`: opens the NetConnection to an application.
    Connect {
        /// The application name the client is connecting to.
        app: String,
    },
    /// The `_result` response to `connect`.
    ConnectResult {
        fmsver: String,
        capabilities: f64,
        level: CommandResultLevel,
        code: String,
        description: String,
        encoding: f64,
    },
    /// `releaseStream`: tells the server to tear down any previous publisher of this name.
    ReleaseStream {
        stream_name: String,
    },
    /// `FCPublish`: legacy pre-publish notification sent by Flash-derived encoders.
    FcPublish {
        stream_name: String,
    },
    /// `createStream`: allocates a new NetStream.
    CreateStream,
    /// The `_result` response to `createStream`.
    CreateStreamResult {
        stream_id: f64,
    },
}
