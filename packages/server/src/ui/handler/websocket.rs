//! WebSocket connection handlers.

use std::{sync::Arc, time::Duration};

use axum::{
    body::Bytes,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, Stream, StreamExt},
};
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
    time::{Instant, interval_at},
};

use crate::{
    domain::{ClientEvent, ConnectionId, ConnectionIdFactory, DisplayName, Identity},
    infrastructure::dto::{http::ConnectQuery, websocket::ClientEventDto},
    ui::{error::ApiError, extractor::ApiQuery, state::AppState},
    usecase::ChatRelay,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<ConnectQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = match query.token.as_deref() {
        Some(token) => match state.tokens.verify(token) {
            Ok(identity) => Some(identity),
            Err(e) => {
                tracing::warn!("Rejected socket token: {}", e);
                None
            }
        },
        None => None,
    };

    if state.socket.require_auth && identity.is_none() {
        return Err(ApiError::unauthorized("A valid token is required"));
    }

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, identity)))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// A ping is sent every `ping_interval` to keep the connection alive.
///
/// # Arguments
///
/// * `rx` - Channel receiver for frames queued by the relay
/// * `sender` - WebSocket sink to send messages to this client
/// * `ping_interval` - Interval between pings
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
    ping_interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + ping_interval, ping_interval);
        loop {
            tokio::select! {
                frame = rx.recv() => {
                    let Some(frame) = frame else { break };
                    if sender.send(Message::Text(frame.into())).await.is_err() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    if sender.send(Message::Ping(Bytes::new())).await.is_err() {
                        break;
                    }
                }
            }
        }
    })
}

/// Reads client frames until the socket closes, stays silent past
/// `idle_timeout`, or `stop` fires.
///
/// `stop` is only observed between frames: an event that has been read is
/// always applied in full, broadcasts included.
fn receive_loop<S>(
    mut receiver: S,
    relay: Arc<ChatRelay>,
    connection_id: ConnectionId,
    pinned_name: Option<DisplayName>,
    idle_timeout: Duration,
    mut stop: oneshot::Receiver<()>,
) -> JoinHandle<()>
where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            let next = tokio::select! {
                _ = &mut stop => {
                    tracing::debug!("Reader of '{}' stopped", connection_id);
                    break;
                }
                next = tokio::time::timeout(idle_timeout, receiver.next()) => next,
            };
            let msg = match next {
                Ok(Some(Ok(msg))) => msg,
                Ok(Some(Err(e))) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
                Ok(None) => break,
                Err(_) => {
                    tracing::info!("Connection '{}' timed out", connection_id);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_text(&relay, &connection_id, pinned_name.as_ref(), text.as_str()).await;
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    })
}

/// Decode one text frame and hand it to the relay. Malformed or rejected
/// events are dropped without a reply.
async fn handle_text(
    relay: &ChatRelay,
    connection_id: &ConnectionId,
    pinned_name: Option<&DisplayName>,
    text: &str,
) {
    let dto = match serde_json::from_str::<ClientEventDto>(text) {
        Ok(dto) => dto,
        Err(e) => {
            tracing::debug!("Dropped unparsable frame from '{}': {}", connection_id, e);
            return;
        }
    };
    let event = match ClientEvent::try_from(dto) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!("Dropped invalid event from '{}': {}", connection_id, e);
            return;
        }
    };

    // 認証済み接続の表示名はトークンのユーザー名で固定
    let event = match (event, pinned_name) {
        (ClientEvent::Join { .. }, Some(name)) => ClientEvent::Join {
            display_name: name.clone(),
        },
        (event, _) => event,
    };

    let kind = event.kind();
    if let Err(e) = relay.handle(connection_id, event).await {
        tracing::debug!("Dropped '{}' from '{}': {}", kind, connection_id, e);
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, identity: Option<Identity>) {
    let connection_id = ConnectionIdFactory::generate();
    let pinned_name = identity
        .as_ref()
        .and_then(|identity| DisplayName::new(identity.username.as_str().to_string()).ok());

    // Create a channel for this client to receive messages
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .message_pusher
        .register_client(connection_id.clone(), tx)
        .await;
    match &identity {
        Some(identity) => tracing::info!(
            "Connection '{}' opened by user '{}'",
            connection_id,
            identity.username
        ),
        None => tracing::info!("Connection '{}' opened", connection_id),
    }

    let (sender, receiver) = socket.split();
    let settings = state.socket;

    let (stop_tx, stop_rx) = oneshot::channel();

    let mut recv_task = receive_loop(
        receiver,
        state.relay.clone(),
        connection_id.clone(),
        pinned_name,
        settings.idle_timeout(),
        stop_rx,
    );
    let mut send_task = pusher_loop(rx, sender, settings.ping_interval);

    let writer_done_first = tokio::select! {
        _ = &mut recv_task => false,
        _ = &mut send_task => true,
    };
    if writer_done_first {
        // 読み取り済みのイベントは最後まで適用させてから終了する
        let _ = stop_tx.send(());
        if let Err(e) = recv_task.await {
            tracing::warn!("Reader of '{}' failed: {}", connection_id, e);
        }
    } else {
        send_task.abort();
    }

    // 送信先から外してから切断処理（退出通知は本人に届かない）
    state.message_pusher.unregister_client(&connection_id).await;
    state.relay.disconnect(&connection_id).await;
    tracing::info!("Connection '{}' closed", connection_id);
}
