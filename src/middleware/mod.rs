//! Request extractors and layers: bearer auth, CORS.

pub mod auth;
pub mod cors;

pub use auth::AuthUser;
pub use cors::cors_layer;
