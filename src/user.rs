use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    ServiceError, ServiceResult,
    app::ArcUserRepository,
    persistence::users::{NewUser, UserRepository},
    util::validate_email,
};

pub type UserId = i64;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Commissioner,
    #[default]
    Gm,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

pub trait UserService {
    fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
        role: UserRole,
    ) -> ServiceResult<User>;
    fn login(&self, username: &str, password: &str) -> ServiceResult<User>;
    fn fetch_user(&self, id: UserId) -> ServiceResult<User>;
    fn fetch_user_by_username(&self, username: &str) -> ServiceResult<User>;
}

pub struct UserServiceImpl {
    user_repository: ArcUserRepository,
}

impl UserServiceImpl {
    pub fn new(user_repository: ArcUserRepository) -> Self {
        Self { user_repository }
    }

    fn validate_username(username: &str) -> ServiceResult<()> {
        if username.len() < 3 || username.len() > 15 {
            return ServiceError::bad_request("Username must be between 3 and 15 characters");
        }
        if username
            .chars()
            .next()
            .is_none_or(|c| !c.is_ascii_alphabetic())
        {
            return ServiceError::bad_request("Username must start with a letter");
        }
        if username
            .chars()
            .any(|c| !c.is_ascii_alphanumeric() && c != '_')
        {
            return ServiceError::bad_request("Username must be alphanumeric");
        }
        Ok(())
    }
}

impl UserService for UserServiceImpl {
    fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
        role: UserRole,
    ) -> ServiceResult<User> {
        Self::validate_username(username)?;
        let email = validate_email(email)?;
        if password.is_empty() {
            return ServiceError::bad_request("Password must not be empty");
        }
        if self.user_repository.get_user_by_username(username).is_some() {
            return ServiceError::bad_request("Username already taken");
        }
        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| ServiceError::Internal(format!("Failed to hash password: {}", e)))?;
        let user = self.user_repository.create_user(NewUser {
            username: username.to_string(),
            password_hash,
            role,
            email,
        });
        info!("Registered user {} ({:?})", user.username, user.role);
        Ok(user)
    }

    fn login(&self, username: &str, password: &str) -> ServiceResult<User> {
        // Unknown usernames and wrong passwords produce the same error, so
        // a caller cannot probe which accounts exist.
        let Some(user) = self.user_repository.get_user_by_username(username) else {
            return ServiceError::unauthorized("Invalid username or password");
        };
        let valid = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| ServiceError::Internal(format!("Failed to verify password: {}", e)))?;
        if !valid {
            return ServiceError::unauthorized("Invalid username or password");
        }
        info!("User {} logged in", user.username);
        Ok(user)
    }

    fn fetch_user(&self, id: UserId) -> ServiceResult<User> {
        match self.user_repository.get_user(id) {
            Some(user) => Ok(user),
            None => ServiceError::not_found("User not found"),
        }
    }

    fn fetch_user_by_username(&self, username: &str) -> ServiceResult<User> {
        match self.user_repository.get_user_by_username(username) {
            Some(user) => Ok(user),
            None => ServiceError::not_found("User not found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::persistence::users::UserRepositoryImpl;

    fn service() -> UserServiceImpl {
        UserServiceImpl::new(Arc::new(Box::new(UserRepositoryImpl::new())))
    }

    #[test]
    fn test_register_then_login() {
        let service = service();
        let user = service
            .register("gm_anna", "secret", "anna@example.com", UserRole::Gm)
            .unwrap();
        assert_eq!(user.username, "gm_anna");
        assert_eq!(user.role, UserRole::Gm);

        let logged_in = service.login("gm_anna", "secret").unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[test]
    fn test_login_does_not_leak_account_existence() {
        let service = service();
        service
            .register("gm_anna", "secret", "anna@example.com", UserRole::Gm)
            .unwrap();

        let wrong_password = service.login("gm_anna", "nope").unwrap_err();
        let unknown_user = service.login("nobody", "nope").unwrap_err();
        match (&wrong_password, &unknown_user) {
            (ServiceError::Unauthorized(a), ServiceError::Unauthorized(b)) => assert_eq!(a, b),
            other => panic!("expected two unauthorized errors, got {:?}", other),
        }
    }

    #[test]
    fn test_register_rejects_duplicate_username() {
        let service = service();
        service
            .register("gm_anna", "secret", "anna@example.com", UserRole::Gm)
            .unwrap();
        assert!(matches!(
            service.register("gm_anna", "other", "anna2@example.com", UserRole::Gm),
            Err(ServiceError::BadRequest(..))
        ));
    }

    #[test]
    fn test_register_rejects_invalid_input() {
        let service = service();
        assert!(matches!(
            service.register("ab", "secret", "a@example.com", UserRole::Gm),
            Err(ServiceError::BadRequest(..))
        ));
        assert!(matches!(
            service.register("gm_anna", "secret", "not-an-email", UserRole::Gm),
            Err(ServiceError::BadRequest(..))
        ));
    }

    #[test]
    fn test_fetch_unknown_user_is_not_found() {
        let service = service();
        assert!(matches!(
            service.fetch_user(9999),
            Err(ServiceError::NotFound(..))
        ));
        assert!(matches!(
            service.fetch_user_by_username("nobody"),
            Err(ServiceError::NotFound(..))
        ));
    }
}
