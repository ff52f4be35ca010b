//! MyFlix: movie catalog and user favorites REST API.
//!
//! Users log in with username and password and receive a bearer token
//! (HS256 JWT, 7 days) that authorizes the catalog and account routes.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use handlers::http::AppState;

use axum::routing::{get, post};
use handlers::{http, movies, users};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Build the API router. Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    let movie_routes = axum::Router::new()
        .route("/", get(movies::list_movies))
        .route("/:title", get(movies::get_movie))
        .route("/genres/:name", get(movies::get_genre))
        .route("/directors/:name", get(movies::get_director));

    let user_routes = axum::Router::new()
        .route("/", post(users::register))
        .route(
            "/:username",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/:username/movies/:movie_id",
            post(users::add_favorite).delete(users::remove_favorite),
        );

    axum::Router::new()
        .route("/", get(http::welcome))
        .route("/health", get(http::health))
        .route("/login", post(auth::login))
        .nest("/movies", movie_routes)
        .nest("/users", user_routes)
        .with_state(state)
}

/// [`create_app`] plus static files, access logging and CORS.
pub fn create_server(state: AppState, config: &Config) -> axum::Router {
    create_app(state)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::cors_layer(&config.cors_allowed_origins)),
        )
}
