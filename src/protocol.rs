use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    chat::{ChatMessageView, ChatService},
    client::{ClientService, WsSession},
    league::LeagueId,
    user::UserId,
};

/// Messages a connection may send over the live channel.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    Auth { user_id: UserId },
    Chat { league_id: LeagueId, content: String },
}

/// Messages the server pushes to connections.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    Chat { message: ChatMessageView },
}

/// Handles one text frame. Malformed frames are logged and dropped; the
/// connection is left open either way.
pub fn handle_client_message(state: &AppState, session: &mut WsSession, text: &str) {
    let msg = match serde_json::from_str::<ClientMessage>(text) {
        Ok(msg) => msg,
        Err(e) => {
            warn!(
                "Client {} sent an unparseable message: {}",
                session.connection_id, e
            );
            return;
        }
    };
    match msg {
        ClientMessage::Auth { user_id } => {
            session.user_id = Some(user_id);
            state
                .client_service
                .register_session(user_id, session.sender.clone());
        }
        ClientMessage::Chat { league_id, content } => {
            let Some(user_id) = session.user_id else {
                warn!(
                    "Client {} sent chat before authenticating",
                    session.connection_id
                );
                return;
            };
            if let Err(e) = state.chat_service.send_message(user_id, league_id, &content) {
                warn!("Client {} chat message rejected: {}", session.connection_id, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::chat::ChatMessage;

    #[test]
    fn test_parse_auth_message() {
        let msg = serde_json::from_str::<ClientMessage>(r#"{"type":"auth","userId":7}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Auth { user_id: 7 }));
    }

    #[test]
    fn test_parse_chat_message() {
        let msg = serde_json::from_str::<ClientMessage>(
            r#"{"type":"chat","leagueId":1,"content":"Good luck tonight!"}"#,
        )
        .unwrap();
        assert!(matches!(
            msg,
            ClientMessage::Chat { league_id: 1, ref content } if content == "Good luck tonight!"
        ));
    }

    #[test]
    fn test_malformed_messages_fail_to_parse() {
        assert!(serde_json::from_str::<ClientMessage>("not json").is_err());
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"unknown"}"#).is_err());
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"auth"}"#).is_err());
    }

    #[test]
    fn test_chat_broadcast_wire_shape() {
        let msg = ServerMessage::Chat {
            message: ChatMessageView {
                message: ChatMessage {
                    id: 3,
                    league_id: 1,
                    user_id: 2,
                    message: "Great game last night!".to_string(),
                    timestamp: Utc::now(),
                },
                username: "commissioner".to_string(),
            },
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "chat");
        assert_eq!(value["message"]["id"], 3);
        assert_eq!(value["message"]["leagueId"], 1);
        assert_eq!(value["message"]["username"], "commissioner");
        assert_eq!(value["message"]["message"], "Great game last night!");
    }
}
