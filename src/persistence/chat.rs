use chrono::Utc;
use dashmap::DashMap;

use crate::{
    chat::{ChatMessage, ChatMessageId},
    league::LeagueId,
    persistence::IdSequence,
    user::UserId,
};

pub trait ChatMessageRepository {
    /// Messages for a league, most recent first.
    fn get_messages_by_league(&self, league_id: LeagueId) -> Vec<ChatMessage>;
    /// Persists a message, stamping it with the next id and the current
    /// time. Messages are immutable afterwards.
    fn create_message(&self, league_id: LeagueId, user_id: UserId, text: &str) -> ChatMessage;
}

pub struct ChatMessageRepositoryImpl {
    messages: DashMap<ChatMessageId, ChatMessage>,
    ids: IdSequence,
}

impl ChatMessageRepositoryImpl {
    pub fn new() -> Self {
        Self {
            messages: DashMap::new(),
            ids: IdSequence::new(),
        }
    }
}

impl ChatMessageRepository for ChatMessageRepositoryImpl {
    fn get_messages_by_league(&self, league_id: LeagueId) -> Vec<ChatMessage> {
        let mut messages: Vec<ChatMessage> = self
            .messages
            .iter()
            .filter(|entry| entry.value().league_id == league_id)
            .map(|entry| entry.value().clone())
            .collect();
        // Ids break timestamp ties, so same-instant messages still come
        // back newest first.
        messages.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        messages
    }

    fn create_message(&self, league_id: LeagueId, user_id: UserId, text: &str) -> ChatMessage {
        let message = ChatMessage {
            id: self.ids.next(),
            league_id,
            user_id,
            message: text.to_string(),
            timestamp: Utc::now(),
        };
        self.messages.insert(message.id, message.clone());
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_most_recent_first() {
        let repo = ChatMessageRepositoryImpl::new();
        let first = repo.create_message(1, 1, "first");
        let second = repo.create_message(1, 2, "second");
        let third = repo.create_message(1, 1, "third");
        repo.create_message(2, 1, "other league");

        let history = repo.get_messages_by_league(1);
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].id, third.id);
        assert_eq!(history[1].id, second.id);
        assert_eq!(history[2].id, first.id);
    }

    #[test]
    fn test_timestamps_never_decrease() {
        let repo = ChatMessageRepositoryImpl::new();
        let first = repo.create_message(1, 1, "first");
        let second = repo.create_message(1, 1, "second");
        assert!(second.timestamp >= first.timestamp);
        assert!(second.id > first.id);
    }
}
