//! The TCP accept loop: one [`ServerSession`](crate::session::ServerSession) per connection.

use scuffle_context::ContextFutExt;
use tokio::net::TcpListener;
use tracing::Instrument;

use crate::config::ServerConfig;
use crate::session::{ServerSession, SessionHandler};

/// Binds `config.bind_address` and drives one [`ServerSession`] per accepted connection until
/// `ctx` is cancelled.
///
/// `new_handler` is called once per accepted connection to build that connection's sink; this
/// lets an embedder hand out a fresh handler (e.g. one bound to a per-stream channel) for every
/// publisher rather than sharing one across connections.
pub async fn serve<H, F>(config: ServerConfig, ctx: scuffle_context::Context, new_handler: F) -> std::io::Result<()>
where
    H: SessionHandler + Send + 'static,
    F: Fn() -> H + Send + Sync + 'static,
{
    let listener = TcpListener::bind(config.bind_address).await?;
    tracing::info!(addr = %config.bind_address, "listening for rtmp connections");

    loop {
        let (stream, addr) = match listener.accept().with_context(&ctx).await {
            Some(Ok(accepted)) => accepted,
            Some(Err(err)) => {
                tracing::warn!(%err, "failed to accept connection");
                continue;
            }
            None => {
                tracing::debug!("context cancelled, stopping listener");
                return Ok(());
            }
        };

        tracing::debug!(%addr, "accepted connection");

        let session = ServerSession::new(stream, new_handler(), config.clone()).with_context(ctx.clone());

        tokio::spawn(
            async move {
                if let Err(err) = session.run().await {
                    if err.is_peer_closed() {
                        tracing::debug!("session ended");
                    } else {
                        tracing::warn!(%err, "session ended with an error");
                    }
                }
            }
            .instrument(tracing::info_span!("rtmp_session", %addr)),
        );
    }
}
