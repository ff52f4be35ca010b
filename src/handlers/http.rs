//! Shared state plus the unauthenticated health and welcome handlers.

use axum::{http::StatusCode, Json};
use serde_json::json;
use std::sync::Arc;

use crate::auth::{Authenticator, TokenService};
use crate::repositories::{MemoryStore, MovieStore, UserStore};

/// Shared application state for every handler.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub movies: Arc<dyn MovieStore>,
    pub auth: Authenticator,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        movies: Arc<dyn MovieStore>,
        tokens: TokenService,
    ) -> Self {
        let auth = Authenticator::new(users.clone(), tokens);
        Self {
            users,
            movies,
            auth,
        }
    }

    /// State over a fresh [`MemoryStore`] seeded with the default catalog.
    pub fn in_memory(tokens: TokenService) -> Self {
        let store = Arc::new(MemoryStore::seeded());
        Self::new(store.clone(), store, tokens)
    }

    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }
    pub fn movies(&self) -> &dyn MovieStore {
        self.movies.as_ref()
    }
    pub fn auth(&self) -> &Authenticator {
        &self.auth
    }
}

/// GET / — welcome text.
pub async fn welcome() -> &'static str {
    "Welcome to MyFlix!"
}

/// GET /health: liveness check.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "myflix" })),
    )
}
