//! The per-connection RTMP server session: drives the handshake, then the command dialogue
//! and media forwarding, through to teardown.

use std::io;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use scuffle_bytes_util::BytesCursorExt;
use scuffle_context::ContextFutExt;
use scuffle_future_ext::FutureExt;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use super::error::SessionError;
use super::handler::{MediaKind, PublishEndReason, SessionHandler};
use super::state::{Phase, SessionState, StreamState};
use crate::chunk::{ChunkReader, ChunkWriter};
use crate::command_messages::netconnection::NetConnectionCommand;
use crate::command_messages::netstream::{NetStreamCommand, NetStreamCommandPublishType};
use crate::command_messages::on_status::{OnStatus, codes};
use crate::command_messages::{self, Command, CommandResultLevel, CommandType};
use crate::config::ServerConfig;
use crate::handshake::{self, HandshakeServer};
use crate::messages::MessageData;
use crate::protocol_control_messages::{
    ProtocolControlMessageAcknowledgement, ProtocolControlMessageSetChunkSize, ProtocolControlMessageSetPeerBandwidth,
    ProtocolControlMessageSetPeerBandwidthLimitType, ProtocolControlMessageWindowAcknowledgementSize,
};
use crate::user_control_messages::EventMessageStreamBegin;

/// Reads more than `READ_SIZE` would ever need to hold so a single syscall can usually satisfy
/// the rest of the handshake read loop.
const IDLE_READ_RESERVE: usize = 4096;

/// An RTMP server session driving one TCP connection from a publishing client.
///
/// Owns the connection's buffers and state exclusively between suspension points; there is no
/// shared mutable state across connections.
pub struct ServerSession<S, H> {
    /// The context that, when cancelled, ends the session at its next suspension point.
    ctx: Option<scuffle_context::Context>,
    io: S,
    handler: H,
    config: ServerConfig,
    state: SessionState,
    chunk_reader: ChunkReader,
    chunk_writer: ChunkWriter,
    read_buf: BytesMut,
    write_buf: Vec<u8>,
    /// Set when the handshake read buffer held bytes past the end of C2; those bytes are the
    /// start of the chunk stream and must be parsed before reading more from the socket.
    skip_read: bool,
}

impl<S, H> ServerSession<S, H> {
    /// Creates a new session over `io`, to be driven with `handler` as the media sink.
    pub fn new(io: S, handler: H, config: ServerConfig) -> Self {
        let expected_stream_key = config.expected_stream_key.clone();
        Self {
            ctx: None,
            io,
            handler,
            config,
            state: SessionState::new(expected_stream_key),
            chunk_reader: ChunkReader::default(),
            chunk_writer: ChunkWriter::default(),
            read_buf: BytesMut::new(),
            write_buf: Vec::new(),
            skip_read: false,
        }
    }

    /// Attaches a cancellation context; the session ends at its next suspension point once it
    /// is cancelled.
    pub fn with_context(mut self, ctx: scuffle_context::Context) -> Self {
        self.ctx = Some(ctx);
        self
    }
}

impl<S, H> ServerSession<S, H>
where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
    H: SessionHandler,
{
    /// Runs the session to completion: handshake, then the command dialogue and media
    /// forwarding, until the peer disconnects or a fatal protocol error occurs.
    pub async fn run(mut self) -> Result<(), SessionError> {
        let ctx = self.ctx.clone().unwrap_or_else(scuffle_context::Context::global);

        let mut handshaker = HandshakeServer::default();
        loop {
            match self.drive_handshake(&mut handshaker).with_context(&ctx).await {
                Some(Ok(false)) => self.flush().await?,
                Some(Ok(true)) => break,
                Some(Err(e)) => return Err(e),
                None => return Ok(()),
            }
        }
        drop(handshaker);

        self.state.phase = Phase::AwaitConnect;
        tracing::debug!("handshake complete");

        let outcome = loop {
            match self.drive().with_context(&ctx).await {
                Some(Ok(true)) => {
                    if let Err(e) = self.flush().await {
                        break Err(e);
                    }
                }
                Some(Ok(false)) => break Ok(PublishEndReason::PeerClosed),
                Some(Err(SessionError::Timeout)) => break Ok(PublishEndReason::Timeout),
                Some(Err(e)) if e.is_peer_closed() => break Ok(PublishEndReason::PeerClosed),
                Some(Err(e)) => break Err(e),
                None => break Ok(PublishEndReason::PeerClosed),
            }
        };

        match outcome {
            Ok(reason) => self.teardown(reason).await,
            Err(e) => {
                // Best-effort: tell the sink its stream is gone even though the session failed.
                let _ = self.teardown(PublishEndReason::PeerClosed).await;
                Err(e)
            }
        }
    }

    /// Drives one step of the handshake. Returns `Ok(true)` once it has completed.
    async fn drive_handshake(&mut self, handshaker: &mut HandshakeServer) -> Result<bool, SessionError> {
        const READ_SIZE: usize = handshake::RTMP_HANDSHAKE_SIZE + 1;
        self.read_buf.reserve(READ_SIZE);

        let mut bytes_read = 0;
        while bytes_read < READ_SIZE {
            let n = self
                .io
                .read_buf(&mut self.read_buf)
                .with_timeout(Duration::from_millis(self.config.handshake_timeout_ms))
                .await
                .map_err(|_| SessionError::Timeout)??;

            if n == 0 {
                return Err(SessionError::PeerClosed);
            }

            bytes_read += n;
        }

        let mut cursor = io::Cursor::new(self.read_buf.split().freeze());
        handshaker.handshake(&mut cursor, &mut self.write_buf)?;

        if handshaker.is_finished() {
            let over_read = cursor.extract_remaining();
            if !over_read.is_empty() {
                self.skip_read = true;
                self.read_buf.extend_from_slice(&over_read);
            }

            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Drives one step of the main session loop: read, account for acknowledgement, process
    /// whatever whole messages are now buffered. Returns `Ok(false)` on a clean peer close.
    async fn drive(&mut self) -> Result<bool, SessionError> {
        if self.skip_read {
            self.skip_read = false;
        } else {
            self.read_buf.reserve(IDLE_READ_RESERVE);

            let n = self
                .io
                .read_buf(&mut self.read_buf)
                .with_timeout(Duration::from_millis(self.config.idle_timeout_ms))
                .await
                .map_err(|_| SessionError::Timeout)?? as u64;

            if n == 0 {
                return Ok(false);
            }

            self.state.bytes_received += n;
            self.maybe_acknowledge()?;
        }

        self.process_chunks().await?;

        Ok(true)
    }

    /// Emits an Acknowledgement if the peer's window has been exceeded since the last one.
    fn maybe_acknowledge(&mut self) -> Result<(), SessionError> {
        if self.state.window_ack_size_in == 0 {
            return Ok(());
        }

        if self.state.bytes_received - self.state.bytes_acked >= self.state.window_ack_size_in as u64 {
            tracing::debug!(bytes_received = self.state.bytes_received, "sending acknowledgement");

            ProtocolControlMessageAcknowledgement {
                sequence_number: self.state.bytes_received as u32,
            }
            .write(&mut self.write_buf, &self.chunk_writer)?;

            self.state.bytes_acked = self.state.bytes_received;
        }

        Ok(())
    }

    /// Parses whatever whole messages are now assembled out of `read_buf` and processes them.
    async fn process_chunks(&mut self) -> Result<(), SessionError> {
        while let Some(chunk) = self.chunk_reader.read_chunk(&mut self.read_buf)? {
            let timestamp = chunk.message_header.timestamp;
            let msg_stream_id = chunk.message_header.msg_stream_id;

            let msg = MessageData::read(&chunk)?;
            self.process_message(msg, msg_stream_id, timestamp).await?;
        }

        Ok(())
    }

    /// Dispatches one decoded message.
    async fn process_message(&mut self, msg: MessageData, stream_id: u32, timestamp: u32) -> Result<(), SessionError> {
        match msg {
            MessageData::Amf0Command(command) => self.on_command_message(stream_id, command).await?,
            MessageData::SetChunkSize(ProtocolControlMessageSetChunkSize { chunk_size }) => {
                self.on_set_chunk_size(chunk_size as usize);
            }
            MessageData::WindowAcknowledgementSize(ProtocolControlMessageWindowAcknowledgementSize {
                acknowledgement_window_size,
            }) => {
                tracing::debug!(acknowledgement_window_size, "peer set its acknowledgement window size");
                self.state.window_ack_size_in = acknowledgement_window_size;
            }
            MessageData::Audio { data } => {
                self.on_media(stream_id, MediaKind::Audio, timestamp, data).await?;
            }
            MessageData::Video { data } => {
                self.on_media(stream_id, MediaKind::Video, timestamp, data).await?;
            }
            MessageData::Amf0Data { data } => {
                tracing::debug!(stream_id, len = data.len(), "ignoring amf0 data message");
            }
            MessageData::Unknown { msg_type_id, .. } => {
                tracing::warn!(?msg_type_id, "ignoring message with unrecognized type id");
            }
            MessageData::SetPeerBandwidth | MessageData::Abort | MessageData::Acknowledgement | MessageData::UserControl => {
                // Recognised but there is nothing for an ingest-only server to act on.
            }
        }

        Ok(())
    }

    fn on_set_chunk_size(&mut self, chunk_size: usize) {
        self.chunk_reader.set_chunk_size(chunk_size);
        self.state.in_chunk_size = chunk_size;
    }

    /// Forwards an audio/video payload to the sink, if it belongs to a live publish.
    async fn on_media(&mut self, stream_id: u32, kind: MediaKind, timestamp: u32, payload: Bytes) -> Result<(), SessionError> {
        if !self.state.streams.get(&stream_id).is_some_and(|s| s.publisher_alive) {
            tracing::warn!(stream_id, "ignoring media for a stream with no live publisher");
            return Ok(());
        }

        self.handler
            .on_media(stream_id, kind, timestamp, payload)
            .await
            .map_err(|e| SessionError::SinkError(Box::new(e)))
    }

    /// Dispatches a decoded AMF0 command, enforcing the `AwaitConnect` phase's requirement that
    /// the first command be `connect`.
    async fn on_command_message(&mut self, stream_id: u32, command: Command) -> Result<(), SessionError> {
        let transaction_id = command.transaction_id;

        if self.state.phase == Phase::AwaitConnect {
            return match command.command_type {
                CommandType::NetConnection(NetConnectionCommand::Connect { app }) => self.on_connect(transaction_id, app),
                _ => {
                    OnStatus {
                        level: CommandResultLevel::Error,
                        code: codes::NET_CONNECTION_CONNECT_REJECTED.to_string(),
                        description: Some("Connection rejected: expected connect.".to_string()),
                        others: Vec::new(),
                    }
                    .write(&mut self.write_buf, &self.chunk_writer, stream_id)?;

                    Err(SessionError::UnexpectedCommand("expected connect"))
                }
            };
        }

        match command.command_type {
            CommandType::NetConnection(NetConnectionCommand::Connect { .. }) => {
                tracing::warn!("ignoring duplicate connect command");
            }
            CommandType::NetConnection(NetConnectionCommand::ReleaseStream { .. })
            | CommandType::NetConnection(NetConnectionCommand::FcPublish { .. }) => {
                command_messages::write_neutral_result(&mut self.write_buf, &self.chunk_writer, transaction_id)?;
            }
            CommandType::NetConnection(NetConnectionCommand::CreateStream) => {
                self.on_create_stream(transaction_id)?;
            }
            CommandType::NetStream(NetStreamCommand::Publish {
                publishing_name,
                publishing_type,
            }) => {
                self.on_publish(stream_id, publishing_name, publishing_type).await?;
            }
            CommandType::NetStream(NetStreamCommand::DeleteStream { stream_id: target }) => {
                self.on_delete_stream(target as u32).await?;
            }
            CommandType::NetStream(NetStreamCommand::FcUnpublish { stream_name }) => {
                self.on_fc_unpublish(transaction_id, &stream_name).await?;
            }
            CommandType::NetConnection(NetConnectionCommand::ConnectResult { .. })
            | CommandType::NetConnection(NetConnectionCommand::CreateStreamResult { .. }) => {
                // The server never receives its own reply variants back from a client.
            }
            CommandType::Unknown { name, .. } => {
                tracing::warn!(command = %name, "ignoring unrecognized command");
            }
        }

        Ok(())
    }

    /// Handles `connect`: emits Window Ack Size, Set Peer Bandwidth, Set Chunk Size, then the
    /// `_result` reply, in that order, per the control-dialogue sequencing required by
    /// interoperable publishers.
    fn on_connect(&mut self, transaction_id: f64, app: String) -> Result<(), SessionError> {
        ProtocolControlMessageWindowAcknowledgementSize {
            acknowledgement_window_size: self.config.window_ack_size,
        }
        .write(&mut self.write_buf, &self.chunk_writer)?;
        self.state.window_ack_size_out = self.config.window_ack_size;

        ProtocolControlMessageSetPeerBandwidth {
            acknowledgement_window_size: self.config.peer_bandwidth,
            limit_type: ProtocolControlMessageSetPeerBandwidthLimitType::Dynamic,
        }
        .write(&mut self.write_buf, &self.chunk_writer)?;
        self.state.peer_bw_limit_type = ProtocolControlMessageSetPeerBandwidthLimitType::Dynamic;

        ProtocolControlMessageSetChunkSize {
            chunk_size: self.config.initial_out_chunk_size,
        }
        .write(&mut self.write_buf, &self.chunk_writer)?;
        self.chunk_writer.set_chunk_size(self.config.initial_out_chunk_size as usize);
        self.state.out_chunk_size = self.config.initial_out_chunk_size as usize;

        command_messages::write_netconnection_result(
            &mut self.write_buf,
            &self.chunk_writer,
            transaction_id,
            NetConnectionCommand::ConnectResult {
                fmsver: "FMS/3,5,7,7009".to_string(),
                capabilities: 31.0,
                level: CommandResultLevel::Status,
                code: codes::NET_CONNECTION_CONNECT_SUCCESS.to_string(),
                description: "Connection succeeded.".to_string(),
                encoding: 0.0,
            },
        )?;

        self.state.app_name = Some(app);
        self.state.phase = Phase::Connected;

        Ok(())
    }

    /// Handles `createStream`: allocates the next stream id and replies with it, then announces
    /// Stream Begin for it.
    fn on_create_stream(&mut self, transaction_id: f64) -> Result<(), SessionError> {
        let stream_id = self.state.next_stream_id;
        self.state.next_stream_id += 1;

        self.state.streams.insert(
            stream_id,
            StreamState {
                id: stream_id,
                name: String::new(),
                publish_type: NetStreamCommandPublishType::Live,
                publisher_alive: false,
            },
        );

        command_messages::write_netconnection_result(
            &mut self.write_buf,
            &self.chunk_writer,
            transaction_id,
            NetConnectionCommand::CreateStreamResult {
                stream_id: stream_id as f64,
            },
        )?;

        EventMessageStreamBegin { stream_id }.write(&mut self.write_buf, &self.chunk_writer)?;

        self.state.phase = Phase::AwaitCreateStream;

        Ok(())
    }

    /// Handles `publish`: validates the stream key if one is configured, then either rejects or
    /// accepts the publisher.
    ///
    /// `publish` carries no `_result` reply; only `onStatus` replies to it, so no transaction
    /// id is needed here.
    async fn on_publish(
        &mut self,
        stream_id: u32,
        publishing_name: String,
        publishing_type: NetStreamCommandPublishType,
    ) -> Result<(), SessionError> {
        if let Some(expected) = &self.state.expected_stream_key {
            if expected != &publishing_name {
                OnStatus {
                    level: CommandResultLevel::Error,
                    code: codes::NET_STREAM_PUBLISH_BAD_NAME.to_string(),
                    description: Some(format!("Stream key '{publishing_name}' rejected.")),
                    others: Vec::new(),
                }
                .write(&mut self.write_buf, &self.chunk_writer, stream_id)?;

                return Err(SessionError::BadStreamKey);
            }
        }

        let Some(app) = self.state.app_name.clone() else {
            return Err(SessionError::UnexpectedCommand("publish before connect"));
        };

        if let Some(stream) = self.state.streams.get_mut(&stream_id) {
            stream.name = publishing_name.clone();
            stream.publish_type = publishing_type;
            stream.publisher_alive = true;
        } else {
            self.state.streams.insert(
                stream_id,
                StreamState {
                    id: stream_id,
                    name: publishing_name.clone(),
                    publish_type: publishing_type,
                    publisher_alive: true,
                },
            );
        }

        self.handler
            .on_publish_begin(stream_id, &app, &publishing_name, None)
            .await
            .map_err(|e| SessionError::SinkError(Box::new(e)))?;

        OnStatus {
            level: CommandResultLevel::Status,
            code: codes::NET_STREAM_PUBLISH_START.to_string(),
            description: Some(format!("Publishing {publishing_name}.")),
            others: Vec::new(),
        }
        .write(&mut self.write_buf, &self.chunk_writer, stream_id)?;

        self.state.phase = Phase::Publishing;

        Ok(())
    }

    /// Handles `deleteStream`: tears down the named stream's publish state, if any. Replies
    /// only with `onStatus`; `deleteStream` carries no `_result` of its own.
    async fn on_delete_stream(&mut self, stream_id: u32) -> Result<(), SessionError> {
        if let Some(stream) = self.state.streams.get_mut(&stream_id) {
            if stream.publisher_alive {
                stream.publisher_alive = false;
                self.handler
                    .on_publish_end(stream_id, PublishEndReason::PeerClosed)
                    .await
                    .map_err(|e| SessionError::SinkError(Box::new(e)))?;
            }
        }

        OnStatus {
            level: CommandResultLevel::Status,
            code: codes::NET_STREAM_DELETE_STREAM_SUCCESS.to_string(),
            description: None,
            others: Vec::new(),
        }
        .write(&mut self.write_buf, &self.chunk_writer, stream_id)?;

        Ok(())
    }

    /// Handles `FCUnpublish`: a legacy pre-unpublish notice. Acknowledged neutrally; the
    /// publisher is expected to follow up with `deleteStream` for the actual teardown.
    async fn on_fc_unpublish(&mut self, transaction_id: f64, stream_name: &str) -> Result<(), SessionError> {
        tracing::debug!(stream_name, "received FCUnpublish");
        command_messages::write_neutral_result(&mut self.write_buf, &self.chunk_writer, transaction_id)?;
        Ok(())
    }

    /// Tears down every stream with a live publisher, notifying the sink for each.
    async fn teardown(&mut self, reason: PublishEndReason) -> Result<(), SessionError> {
        self.state.phase = Phase::Closing;

        let live_stream_ids: Vec<u32> = self
            .state
            .streams
            .iter()
            .filter(|(_, stream)| stream.publisher_alive)
            .map(|(id, _)| *id)
            .collect();

        for stream_id in live_stream_ids {
            if let Some(stream) = self.state.streams.get_mut(&stream_id) {
                stream.publisher_alive = false;
            }

            self.handler
                .on_publish_end(stream_id, reason)
                .await
                .map_err(|e| SessionError::SinkError(Box::new(e)))?;
        }

        Ok(())
    }

    /// Flushes any buffered outbound bytes to the socket.
    async fn flush(&mut self) -> Result<(), SessionError> {
        if !self.write_buf.is_empty() {
            self.io
                .write_all(&self.write_buf)
                .with_timeout(Duration::from_millis(self.config.idle_timeout_ms))
                .await
                .map_err(|_| SessionError::Timeout)??;
            self.write_buf.clear();
        }

        Ok(())
    }
}
