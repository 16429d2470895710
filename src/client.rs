use std::sync::Arc;

use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use dashmap::DashMap;
use futures_util::{SinkExt, StreamExt};
use log::{debug, info};
use tokio::{select, sync::mpsc::UnboundedSender};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::{
    AppState,
    protocol::{self, ServerMessage},
    user::UserId,
};

pub type ConnectionId = Uuid;

/// Registry of live connections, keyed by the user id announced in the
/// connection's auth message. Registering a user id silently replaces any
/// prior entry for it.
pub trait ClientService {
    fn register_session(&self, user_id: UserId, sender: UnboundedSender<String>);
    fn remove_session(&self, user_id: &UserId);
    fn broadcast(&self, msg: &ServerMessage);
}

pub struct ClientServiceImpl {
    sessions: Arc<DashMap<UserId, UnboundedSender<String>>>,
}

impl ClientServiceImpl {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }
}

impl ClientService for ClientServiceImpl {
    fn register_session(&self, user_id: UserId, sender: UnboundedSender<String>) {
        self.sessions.insert(user_id, sender);
        info!("User {} registered on the live channel", user_id);
    }

    fn remove_session(&self, user_id: &UserId) {
        self.sessions.remove(user_id);
    }

    fn broadcast(&self, msg: &ServerMessage) {
        let json = match serde_json::to_string(msg) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize server message: {}", e);
                return;
            }
        };
        for entry in self.sessions.iter() {
            if entry.value().send(json.clone()).is_err() {
                debug!("User {} has a dead session, skipping", entry.key());
            }
        }
    }
}

/// Per-connection state threaded through the message handler. `user_id`
/// stays `None` until the connection authenticates.
pub struct WsSession {
    pub connection_id: ConnectionId,
    pub user_id: Option<UserId>,
    pub sender: UnboundedSender<String>,
}

pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(state, socket))
}

async fn handle_socket(state: AppState, socket: WebSocket) {
    let connection_id = Uuid::new_v4();
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<String>();
    let cancellation_token = CancellationToken::new();

    info!("Client {} connected", connection_id);

    let send_token = cancellation_token.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = select! {
            msg = rx.recv() => msg,
            _ = send_token.cancelled() => None,
        } {
            if ws_sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
        let _ = ws_sender.close().await;
        send_token.cancel();
    });

    let mut session = WsSession {
        connection_id,
        user_id: None,
        sender: tx,
    };
    let recv_token = cancellation_token.clone();
    while let Some(Ok(msg)) = select! {
        msg = ws_receiver.next() => msg,
        _ = recv_token.cancelled() => None,
    } {
        match msg {
            Message::Text(text) => {
                protocol::handle_client_message(&state, &mut session, text.as_str());
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
    cancellation_token.cancel();
    let _ = send_task.await;

    if let Some(user_id) = session.user_id {
        state.client_service.remove_session(&user_id);
        info!("User {} disconnected (client {})", user_id, connection_id);
    } else {
        info!("Client {} disconnected", connection_id);
    }
}

#[cfg(test)]
#[derive(Default, Clone)]
pub struct MockClientService {
    broadcasts: Arc<std::sync::Mutex<Vec<ServerMessage>>>,
}

#[cfg(test)]
impl MockClientService {
    pub fn get_broadcasts(&self) -> Vec<ServerMessage> {
        self.broadcasts.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl ClientService for MockClientService {
    fn register_session(&self, _user_id: UserId, _sender: UnboundedSender<String>) {}

    fn remove_session(&self, _user_id: &UserId) {}

    fn broadcast(&self, msg: &ServerMessage) {
        self.broadcasts.lock().unwrap().push(msg.clone());
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::chat::{ChatMessage, ChatMessageView};

    fn chat_broadcast(text: &str) -> ServerMessage {
        ServerMessage::Chat {
            message: ChatMessageView {
                message: ChatMessage {
                    id: 1,
                    league_id: 1,
                    user_id: 1,
                    message: text.to_string(),
                    timestamp: Utc::now(),
                },
                username: "gm_john".to_string(),
            },
        }
    }

    #[test]
    fn test_broadcast_reaches_each_session_exactly_once() {
        let service = ClientServiceImpl::new();
        let (tx1, mut rx1) = tokio::sync::mpsc::unbounded_channel();
        let (tx2, mut rx2) = tokio::sync::mpsc::unbounded_channel();
        service.register_session(1, tx1);
        service.register_session(2, tx2);

        service.broadcast(&chat_broadcast("hello"));

        assert!(rx1.try_recv().is_ok());
        assert!(rx1.try_recv().is_err());
        assert!(rx2.try_recv().is_ok());
        assert!(rx2.try_recv().is_err());
    }

    #[test]
    fn test_removed_session_receives_nothing() {
        let service = ClientServiceImpl::new();
        let (tx1, mut rx1) = tokio::sync::mpsc::unbounded_channel();
        let (tx2, mut rx2) = tokio::sync::mpsc::unbounded_channel();
        service.register_session(1, tx1);
        service.register_session(2, tx2);
        service.remove_session(&1);

        service.broadcast(&chat_broadcast("hello"));

        assert!(rx1.try_recv().is_err());
        assert!(rx2.try_recv().is_ok());
    }

    #[test]
    fn test_register_replaces_previous_session() {
        let service = ClientServiceImpl::new();
        let (tx_old, mut rx_old) = tokio::sync::mpsc::unbounded_channel();
        let (tx_new, mut rx_new) = tokio::sync::mpsc::unbounded_channel();
        service.register_session(1, tx_old);
        service.register_session(1, tx_new);

        service.broadcast(&chat_broadcast("hello"));

        assert!(rx_old.try_recv().is_err());
        assert!(rx_new.try_recv().is_ok());
    }
}
