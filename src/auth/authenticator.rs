//! One authentication capability, two explicit methods: local password and bearer token.

use std::sync::Arc;
use tracing::{debug, info};

use super::credentials::{CredentialCheck, CredentialVerifier};
use super::jwt::TokenService;
use crate::error::{AppError, AppResult, AuthFailure};
use crate::models::User;
use crate::repositories::UserStore;

/// How a request proves who it is. Chosen by the route, never inferred.
#[derive(Clone, Copy)]
pub enum AuthMethod<'a> {
    Password { username: &'a str, password: &'a str },
    Bearer(&'a str),
}

#[derive(Clone)]
pub struct Authenticator {
    users: Arc<dyn UserStore>,
    verifier: CredentialVerifier,
    tokens: TokenService,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenService) -> Self {
        Self {
            verifier: CredentialVerifier::new(users.clone()),
            users,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Resolve the method to a live user record.
    pub async fn authenticate(&self, method: AuthMethod<'_>) -> AppResult<User> {
        match method {
            AuthMethod::Password { username, password } => {
                match self.verifier.verify(username, password).await? {
                    CredentialCheck::Verified(user) => Ok(user),
                    CredentialCheck::Rejected(rejection) => {
                        Err(AppError::Auth(AuthFailure::from(rejection)))
                    }
                }
            }
            AuthMethod::Bearer(token) => {
                let subject = self.tokens.verify(token).map_err(AuthFailure::from)?;
                // Re-read the user so deleted or renamed accounts lose access.
                let user = self
                    .users
                    .find_by_id(subject.user_id)
                    .await?
                    .filter(|u| u.username == subject.username)
                    .ok_or(AuthFailure::UnknownSubject)?;
                debug!(username = %user.username, "bearer token accepted");
                Ok(user)
            }
        }
    }

    /// Verify credentials and issue a token for the user.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<(User, String)> {
        let user = self
            .authenticate(AuthMethod::Password { username, password })
            .await?;
        let token = self.tokens.issue(&user)?;
        info!(username = %user.username, user_id = %user.id, "login succeeded");
        Ok((user, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;
    use crate::models::{NewUser, UserChanges};
    use crate::repositories::MemoryStore;

    const SECRET: &str = "test-jwt-secret-min-32-chars!!!!";

    async fn setup() -> (Arc<MemoryStore>, Authenticator) {
        let store = Arc::new(MemoryStore::seeded());
        store
            .create(NewUser {
                username: "alice".to_string(),
                password_hash: hash_password("Secret123!").unwrap(),
                email: "alice@example.com".to_string(),
                birthday: None,
            })
            .await
            .unwrap();
        let auth = Authenticator::new(store.clone(), TokenService::new(SECRET).unwrap());
        (store, auth)
    }

    #[tokio::test]
    async fn login_token_authenticates_bearer() {
        let (_, auth) = setup().await;
        let (user, token) = auth.login("alice", "Secret123!").await.unwrap();
        let resolved = auth.authenticate(AuthMethod::Bearer(&token)).await.unwrap();
        assert_eq!(resolved.id, user.id);
    }

    #[tokio::test]
    async fn both_rejections_surface_as_auth_errors() {
        let (_, auth) = setup().await;
        assert!(matches!(
            auth.login("alice", "wrong").await,
            Err(AppError::Auth(AuthFailure::BadPassword))
        ));
        assert!(matches!(
            auth.login("nobody", "Secret123!").await,
            Err(AppError::Auth(AuthFailure::UnknownUser))
        ));
    }

    #[tokio::test]
    async fn deleted_user_token_is_rejected() {
        let (store, auth) = setup().await;
        let (user, token) = auth.login("alice", "Secret123!").await.unwrap();
        store.delete(user.id).await.unwrap();
        assert!(matches!(
            auth.authenticate(AuthMethod::Bearer(&token)).await,
            Err(AppError::Auth(AuthFailure::UnknownSubject))
        ));
    }

    #[tokio::test]
    async fn renamed_user_token_is_rejected() {
        let (store, auth) = setup().await;
        let (user, token) = auth.login("alice", "Secret123!").await.unwrap();
        let changes = UserChanges {
            username: Some("alice2".to_string()),
            ..Default::default()
        };
        store.update(user.id, changes).await.unwrap();
        assert!(matches!(
            auth.authenticate(AuthMethod::Bearer(&token)).await,
            Err(AppError::Auth(AuthFailure::UnknownSubject))
        ));
    }
}
