//! Local username/password verification against the user store.

use std::sync::Arc;
use tracing::debug;

use crate::auth::password::{verify_dummy_password, verify_password};
use crate::error::{AppResult, AuthFailure};
use crate::models::User;
use crate::repositories::UserStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    UnknownUser,
    BadPassword,
}

impl From<Rejection> for AuthFailure {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::UnknownUser => AuthFailure::UnknownUser,
            Rejection::BadPassword => AuthFailure::BadPassword,
        }
    }
}

/// Outcome of a credential check. Store failures are the `Err` side of the result.
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialCheck {
    Verified(User),
    Rejected(Rejection),
}

#[derive(Clone)]
pub struct CredentialVerifier {
    users: Arc<dyn UserStore>,
}

impl CredentialVerifier {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn verify(&self, username: &str, password: &str) -> AppResult<CredentialCheck> {
        let Some(user) = self.users.find_by_username(username).await? else {
            verify_dummy_password(password);
            debug!(username = %username, "login for unknown username");
            return Ok(CredentialCheck::Rejected(Rejection::UnknownUser));
        };

        if !verify_password(password, &user.password_hash)? {
            debug!(username = %username, "password mismatch");
            return Ok(CredentialCheck::Rejected(Rejection::BadPassword));
        }

        Ok(CredentialCheck::Verified(user))
    }
}
