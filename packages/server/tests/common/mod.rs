//! In-process server used by the integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::{net::TcpStream, time::timeout};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use yagura_server::{
    infrastructure::{
        auth::{BcryptPasswordHasher, JwtTokenService},
        catalog::TmdbMovieCatalog,
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryHistoryRepository, InMemorySessionRepository, InMemoryUserRepository},
    },
    ui::{AppState, Server, SocketSettings},
    usecase::{
        ChatRelay, ChatState, HorrorMoviesUseCase, LoginUseCase, PasswordResetUseCase,
        ProfileUseCase, RegisterUseCase, RoomQueryUseCase, UserDirectoryUseCase,
    },
};
use yagura_shared::time::{Clock, SystemClock};

pub type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

const SECRET: &str = "integration-secret";
const RECV_TIMEOUT: Duration = Duration::from_secs(5);

fn default_socket_settings(require_auth: bool) -> SocketSettings {
    SocketSettings {
        ping_interval: Duration::from_secs(25),
        ping_timeout: Duration::from_secs(20),
        require_auth,
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(false).await
    }

    pub async fn start_with(require_socket_auth: bool) -> Self {
        Self::start_with_settings(default_socket_settings(require_socket_auth)).await
    }

    pub async fn start_with_settings(socket: SocketSettings) -> Self {
        // 映画カタログは API キーなし（呼び出されると NotConfigured）
        Self::start_full(socket, TmdbMovieCatalog::new("http://127.0.0.1:9", None)).await
    }

    pub async fn start_with_catalog(catalog: TmdbMovieCatalog) -> Self {
        Self::start_full(default_socket_settings(false), catalog).await
    }

    /// Start a server on an ephemeral port.
    pub async fn start_full(socket: SocketSettings, catalog: TmdbMovieCatalog) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let chat_state = ChatState::new(
            Box::new(InMemorySessionRepository::new()),
            Box::new(InMemoryHistoryRepository::new()),
        )
        .shared();
        let users = Arc::new(InMemoryUserRepository::new());
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let hasher = Arc::new(BcryptPasswordHasher::new(4));
        let tokens = Arc::new(JwtTokenService::new(SECRET, 1));

        let app_state = AppState {
            relay: Arc::new(ChatRelay::new(
                chat_state.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            message_pusher,
            rooms: Arc::new(RoomQueryUseCase::new(chat_state)),
            register: Arc::new(RegisterUseCase::new(
                users.clone(),
                hasher.clone(),
                tokens.clone(),
                clock.clone(),
            )),
            login: Arc::new(LoginUseCase::new(
                users.clone(),
                hasher.clone(),
                tokens.clone(),
            )),
            profile: Arc::new(ProfileUseCase::new(
                users.clone(),
                hasher.clone(),
                clock.clone(),
            )),
            password_reset: Arc::new(PasswordResetUseCase::new(
                users.clone(),
                hasher,
                tokens.clone(),
                clock,
            )),
            user_directory: Arc::new(UserDirectoryUseCase::new(users)),
            movies: Arc::new(HorrorMoviesUseCase::new(Arc::new(catalog))),
            tokens,
            socket,
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = Server::new(app_state, None).router();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { addr }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub async fn connect(&self) -> Socket {
        let (socket, _) = connect_async(self.ws_url()).await.unwrap();
        socket
    }

    /// Register an account over HTTP and return its token.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> String {
        let response = reqwest::Client::new()
            .post(self.url("/auth/register"))
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
        let body: Value = response.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }
}

pub async fn send_event(socket: &mut Socket, event_type: &str, payload: Value) {
    let frame = serde_json::json!({ "type": event_type, "payload": payload });
    socket
        .send(Message::Text(frame.to_string().into()))
        .await
        .unwrap();
}

/// Next server event, skipping control frames.
pub async fn recv_event(socket: &mut Socket) -> Value {
    loop {
        let msg = timeout(RECV_TIMEOUT, socket.next())
            .await
            .expect("timed out waiting for an event")
            .expect("socket closed")
            .unwrap();
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}

/// Receive `count` events and return their types.
pub async fn recv_types(socket: &mut Socket, count: usize) -> Vec<String> {
    let mut types = Vec::with_capacity(count);
    for _ in 0..count {
        let event = recv_event(socket).await;
        types.push(event["type"].as_str().unwrap().to_string());
    }
    types
}

/// Assert that no text frame arrives within a short window.
pub async fn assert_silent(socket: &mut Socket) {
    let result = timeout(Duration::from_millis(200), async {
        loop {
            match socket.next().await {
                Some(Ok(Message::Text(text))) => return Some(text.to_string()),
                Some(Ok(_)) => continue,
                _ => return None,
            }
        }
    })
    .await;
    if let Ok(Some(text)) = result {
        panic!("unexpected event: {}", text);
    }
}
