use chrono::{DateTime, Utc};
use rustrict::CensorStr;
use serde::Serialize;

use crate::{
    ServiceError, ServiceResult,
    app::{ArcChatMessageRepository, ArcClientService, ArcLeagueRepository, ArcUserRepository},
    client::ClientService,
    league::LeagueId,
    persistence::{
        chat::ChatMessageRepository, leagues::LeagueRepository, users::UserRepository,
    },
    protocol::ServerMessage,
    user::UserId,
};

pub type ChatMessageId = i64;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: ChatMessageId,
    pub league_id: LeagueId,
    pub user_id: UserId,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// A chat message enriched with the sender's display name, the shape both
/// the history endpoint and the live broadcast emit.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageView {
    #[serde(flatten)]
    pub message: ChatMessage,
    pub username: String,
}

pub trait ChatService {
    fn send_message(
        &self,
        user_id: UserId,
        league_id: LeagueId,
        content: &str,
    ) -> ServiceResult<ChatMessageView>;
    fn history(&self, league_id: LeagueId) -> ServiceResult<Vec<ChatMessageView>>;
}

pub struct ChatServiceImpl {
    client_service: ArcClientService,
    user_repository: ArcUserRepository,
    league_repository: ArcLeagueRepository,
    chat_repository: ArcChatMessageRepository,
}

impl ChatServiceImpl {
    pub fn new(
        client_service: ArcClientService,
        user_repository: ArcUserRepository,
        league_repository: ArcLeagueRepository,
        chat_repository: ArcChatMessageRepository,
    ) -> Self {
        Self {
            client_service,
            user_repository,
            league_repository,
            chat_repository,
        }
    }

    fn username_of(&self, user_id: UserId) -> String {
        self.user_repository
            .get_user(user_id)
            .map(|user| user.username)
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

impl ChatService for ChatServiceImpl {
    fn send_message(
        &self,
        user_id: UserId,
        league_id: LeagueId,
        content: &str,
    ) -> ServiceResult<ChatMessageView> {
        let Some(user) = self.user_repository.get_user(user_id) else {
            return ServiceError::not_found("User not found");
        };
        if self.league_repository.get_league(league_id).is_none() {
            return ServiceError::not_found("League not found");
        }
        if content.trim().is_empty() {
            return ServiceError::bad_request("Message must not be empty");
        }

        let message = self
            .chat_repository
            .create_message(league_id, user_id, &content.censor());
        let view = ChatMessageView {
            message,
            username: user.username,
        };

        // Fan-out is process-wide, not scoped to the message's league;
        // receivers filter on leagueId.
        self.client_service.broadcast(&ServerMessage::Chat {
            message: view.clone(),
        });
        Ok(view)
    }

    fn history(&self, league_id: LeagueId) -> ServiceResult<Vec<ChatMessageView>> {
        if self.league_repository.get_league(league_id).is_none() {
            return ServiceError::not_found("League not found");
        }
        let views = self
            .chat_repository
            .get_messages_by_league(league_id)
            .into_iter()
            .map(|message| ChatMessageView {
                username: self.username_of(message.user_id),
                message,
            })
            .collect();
        Ok(views)
    }
}
