//! User handlers: registration, profile, favorites, deregistration.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::handlers::http::AppState;
use crate::middleware::AuthUser;
use crate::models::{NewUser, User, UserChanges, UserInfo};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 5, max = 64))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 5, max = 64))]
    pub username: Option<String>,
    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub birthday: Option<NaiveDate>,
}

/// Usernames are ASCII letters and digits only.
pub fn validate_username(username: &str) -> AppResult<()> {
    if username.is_empty() || !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::Validation(
            "Username contains non alphanumeric characters - not allowed.".to_string(),
        ));
    }
    Ok(())
}

fn ensure_self(caller: &User, username: &str) -> AppResult<()> {
    if caller.username != username {
        return Err(AppError::Forbidden(
            "Cannot access another user's account".to_string(),
        ));
    }
    Ok(())
}

/// POST /users
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserInfo>), AppError> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;
    validate_username(&body.username)?;

    let user = state
        .users()
        .create(NewUser {
            username: body.username,
            password_hash: hash_password(&body.password)?,
            email: body.email,
            birthday: body.birthday,
        })
        .await?;
    info!(username = %user.username, user_id = %user.id, "user registered");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users/:username
pub async fn get_user(
    AuthUser(caller): AuthUser,
    Path(username): Path<String>,
) -> Result<Json<UserInfo>, AppError> {
    ensure_self(&caller, &username)?;
    Ok(Json(caller.into()))
}

/// PUT /users/:username
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(username): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserInfo>, AppError> {
    ensure_self(&caller, &username)?;
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;
    if let Some(new_name) = &body.username {
        validate_username(new_name)?;
    }

    let changes = UserChanges {
        username: body.username,
        password_hash: body.password.as_deref().map(hash_password).transpose()?,
        email: body.email,
        birthday: body.birthday,
    };
    let user = state
        .users()
        .update(caller.id, changes)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} was not found", username)))?;
    info!(username = %user.username, user_id = %user.id, "user updated");

    Ok(Json(user.into()))
}

/// DELETE /users/:username
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(username): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    ensure_self(&caller, &username)?;
    if !state.users().delete(caller.id).await? {
        return Err(AppError::NotFound(format!("{} was not found", username)));
    }
    info!(username = %username, user_id = %caller.id, "user deregistered");
    Ok(Json(json!({ "message": format!("{} was deleted.", username) })))
}

/// POST /users/:username/movies/:movie_id
pub async fn add_favorite(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path((username, movie_id)): Path<(String, Uuid)>,
) -> Result<Json<UserInfo>, AppError> {
    ensure_self(&caller, &username)?;
    if state.movies().find_by_id(movie_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Movie {} not found", movie_id)));
    }
    let user = state
        .users()
        .add_favorite(caller.id, movie_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} was not found", username)))?;
    Ok(Json(user.into()))
}

/// DELETE /users/:username/movies/:movie_id
pub async fn remove_favorite(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path((username, movie_id)): Path<(String, Uuid)>,
) -> Result<Json<UserInfo>, AppError> {
    ensure_self(&caller, &username)?;
    let user = state
        .users()
        .remove_favorite(caller.id, movie_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} was not found", username)))?;
    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_username_accepts_alphanumeric() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("User42").is_ok());
    }

    #[test]
    fn validate_username_rejects_symbols() {
        assert!(validate_username("al ice").is_err());
        assert!(validate_username("alice!").is_err());
        assert!(validate_username("").is_err());
    }

    #[test]
    fn register_request_rules() {
        let ok = RegisterRequest {
            username: "alice".to_string(),
            password: "Secret123!".to_string(),
            email: "alice@example.com".to_string(),
            birthday: None,
        };
        assert!(ok.validate().is_ok());

        let short = RegisterRequest {
            username: "al".to_string(),
            ..ok
        };
        assert!(short.validate().is_err());
    }

    #[test]
    fn update_request_checks_only_present_fields() {
        assert!(UpdateUserRequest::default().validate().is_ok());
        let bad_email = UpdateUserRequest {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(bad_email.validate().is_err());
    }
}
