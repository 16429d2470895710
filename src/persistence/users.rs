use chrono::Utc;
use dashmap::DashMap;

use crate::{
    persistence::IdSequence,
    user::{User, UserId, UserRole},
};

#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub email: String,
}

pub trait UserRepository {
    fn get_user(&self, id: UserId) -> Option<User>;
    fn get_user_by_username(&self, username: &str) -> Option<User>;
    fn create_user(&self, new_user: NewUser) -> User;
}

pub struct UserRepositoryImpl {
    users: DashMap<UserId, User>,
    ids: IdSequence,
}

impl UserRepositoryImpl {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            ids: IdSequence::new(),
        }
    }
}

impl UserRepository for UserRepositoryImpl {
    fn get_user(&self, id: UserId) -> Option<User> {
        self.users.get(&id).map(|entry| entry.value().clone())
    }

    fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .iter()
            .find(|entry| entry.value().username == username)
            .map(|entry| entry.value().clone())
    }

    fn create_user(&self, new_user: NewUser) -> User {
        let user = User {
            id: self.ids.next(),
            username: new_user.username,
            password_hash: new_user.password_hash,
            role: new_user.role,
            email: new_user.email,
            created_at: Utc::now(),
        };
        self.users.insert(user.id, user.clone());
        user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::Gm,
            email: format!("{}@example.com", username),
        }
    }

    #[test]
    fn test_create_then_fetch_by_username() {
        let repo = UserRepositoryImpl::new();
        let created = repo.create_user(new_user("gm_john"));
        let fetched = repo.get_user_by_username("gm_john").unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.email, "gm_john@example.com");

        assert!(repo.get_user_by_username("nobody").is_none());
    }

    #[test]
    fn test_ids_are_distinct_and_strictly_increasing() {
        let repo = UserRepositoryImpl::new();
        let ids: Vec<UserId> = (0..5)
            .map(|i| repo.create_user(new_user(&format!("user{}", i))).id)
            .collect();
        for pair in ids.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }
}
