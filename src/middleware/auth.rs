//! Auth extractor: resolves the `Authorization: Bearer` token to a live user.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;

use crate::auth::AuthMethod;
use crate::error::{AppError, AuthFailure};
use crate::handlers::http::AppState;
use crate::models::User;

/// Extractor: authenticated user, re-read from the store on every request.
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AuthFailure::MissingToken)?;
        let user = state
            .auth()
            .authenticate(AuthMethod::Bearer(bearer.token()))
            .await?;
        Ok(AuthUser(user))
    }
}
