//! Application error types and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

use crate::auth::TokenError;

/// Client-facing message for every authentication failure.
pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed";
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Why a request failed to authenticate. Only ever logged; clients see one message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("unknown username")]
    UnknownUser,
    #[error("password mismatch")]
    BadPassword,
    #[error("missing or malformed Authorization header")]
    MissingToken,
    #[error("token rejected: {0}")]
    Token(#[from] TokenError),
    #[error("token subject no longer resolves to a user")]
    UnknownSubject,
}

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthFailure),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) | AppError::Db(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Auth(reason) => {
                debug!(%reason, "authentication rejected");
                AUTH_FAILED_MESSAGE.to_string()
            }
            AppError::Config(_) | AppError::Db(_) | AppError::Internal(_) => {
                error!(error = %self, "request failed");
                INTERNAL_MESSAGE.to_string()
            }
            AppError::Validation(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => msg.clone(),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn rejection_kinds_share_one_response() {
        let unknown = body_of(AppError::Auth(AuthFailure::UnknownUser)).await;
        let bad_password = body_of(AppError::Auth(AuthFailure::BadPassword)).await;
        let expired = body_of(AppError::Auth(TokenError::Expired.into())).await;
        assert_eq!(unknown, bad_password);
        assert_eq!(unknown, expired);
        assert_eq!(unknown.0, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown.1["error"], AUTH_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn server_faults_hide_their_cause() {
        let (status, body) =
            body_of(AppError::Config("JWT_SECRET must be set".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], INTERNAL_MESSAGE);

        let (status, _) = body_of(AppError::Internal(anyhow::anyhow!("boom"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn client_errors_map_to_their_status() {
        assert_eq!(
            AppError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Forbidden("x".into()).status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict("x".into()).status(), StatusCode::CONFLICT);
    }
}
