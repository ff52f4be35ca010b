//! Store interfaces consumed by auth and handlers, with in-memory and PostgreSQL backends.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Director, Genre, Movie, NewUser, User, UserChanges};

/// User records. Lookups by username are exact and case sensitive.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Fails with `AppError::Conflict` when the username is taken.
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Returns `None` when no user has `id`.
    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<Option<User>>;

    /// Returns whether a user was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Idempotent. Returns the updated user, `None` when no user has `id`.
    async fn add_favorite(&self, id: Uuid, movie_id: Uuid) -> AppResult<Option<User>>;

    async fn remove_favorite(&self, id: Uuid, movie_id: Uuid) -> AppResult<Option<User>>;
}

/// Read-only movie catalog.
#[async_trait]
pub trait MovieStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Movie>>;

    async fn find_by_title(&self, title: &str) -> AppResult<Option<Movie>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Movie>>;

    async fn find_genre(&self, name: &str) -> AppResult<Option<Genre>>;

    async fn find_director(&self, name: &str) -> AppResult<Option<Director>>;
}
