//! The media-sink interface the session hands decoded payloads to.
//!
//! Defined by:
//! - spec.md section 6 "Sink interface"

use bytes::Bytes;

/// Distinguishes audio from video payloads handed to the sink. Both carry their FLV tag body
/// (codec/frame-type nibbles in the first byte) unparsed; interpreting it is the sink's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// An FLV `AUDIODATA` body.
    Audio,
    /// An FLV `VIDEODATA` body.
    Video,
}

/// Why a publisher's stream ended, passed to [`SessionHandler::on_publish_end`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishEndReason {
    /// The client closed the connection, or sent `deleteStream`/`FCUnpublish`.
    PeerClosed,
    /// No bytes arrived from the publisher within the configured idle timeout.
    Timeout,
}

/// An application-level consumer of a publisher's stream.
///
/// Implementations run on the connection's own task: a suspending call suspends the
/// connection, which is this server's only backpressure mechanism toward the publisher.
/// Ordering within a stream id is preserved; nothing about thread affinity across different
/// stream ids is guaranteed or required.
pub trait SessionHandler: Send {
    /// The error type this sink returns, propagated to the connection as
    /// [`crate::session::error::SessionError::SinkError`].
    type Error: std::error::Error + Send + Sync + 'static;

    /// Called once a publisher has been accepted on `stream_id`.
    ///
    /// `metadata` is always `None`: `@setDataFrame`/`onMetaData` only ever arrives after
    /// `publish` has already completed, so there is never metadata on hand at this point. The
    /// parameter is kept so a future metadata-caching change doesn't need to touch this trait.
    fn on_publish_begin(
        &mut self,
        stream_id: u32,
        app: &str,
        stream_name: &str,
        metadata: Option<Bytes>,
    ) -> impl std::future::Future<Output = Result<(), Self::Error>> + Send;

    /// Called for every audio/video payload received on `stream_id`.
    fn on_media(
        &mut self,
        stream_id: u32,
        kind: MediaKind,
        timestamp: u32,
        payload: Bytes,
    ) -> impl std::future::Future<Output = Result<(), Self::Error>> + Send;

    /// Called once a publisher's stream has ended, however it ended.
    fn on_publish_end(
        &mut self,
        stream_id: u32,
        reason: PublishEndReason,
    ) -> impl std::future::Future<Output = Result<(), Self::Error>> + Send;
}
