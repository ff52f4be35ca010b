//! Auth HTTP handlers: login.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::models::UserInfo;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserInfo,
    pub token: String,
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    let (user, token) = state.auth().login(&body.username, &body.password).await?;

    Ok(Json(LoginResponse {
        user: user.into(),
        token,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn login_request_bounds() {
        assert!(request("alice", "Secret123!").validate().is_ok());
        assert!(request("", "Secret123!").validate().is_err());
        assert!(request("alice", "").validate().is_err());
        assert!(request("alice", &"x".repeat(128)).validate().is_ok());
        assert!(request("alice", &"x".repeat(129)).validate().is_err());
    }
}
