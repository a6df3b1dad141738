use bytes::Bytes;
use rtmp_ingest::config::ServerConfig;
use rtmp_ingest::session::{MediaKind, PublishEndReason, SessionHandler};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

struct Handler;

impl SessionHandler for Handler {
    type Error = std::convert::Infallible;

    async fn on_publish_begin(
        &mut self,
        stream_id: u32,
        app: &str,
        stream_name: &str,
        _metadata: Option<Bytes>,
    ) -> Result<(), Self::Error> {
        tracing::info!(stream_id, app, stream_name, "publish begin");
        Ok(())
    }

    async fn on_media(&mut self, stream_id: u32, kind: MediaKind, timestamp: u32, payload: Bytes) -> Result<(), Self::Error> {
        tracing::debug!(stream_id, ?kind, timestamp, len = payload.len(), "media");
        Ok(())
    }

    async fn on_publish_end(&mut self, stream_id: u32, reason: PublishEndReason) -> Result<(), Self::Error> {
        tracing::info!(stream_id, ?reason, "publish end");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .ok();

    let (ctx, _handler) = scuffle_context::Context::new();
    let config = ServerConfig::default();

    rtmp_ingest::listener::serve(config, ctx, || Handler).await
}
