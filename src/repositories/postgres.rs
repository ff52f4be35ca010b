//! PostgreSQL-backed store over the `db` queries.

use async_trait::async_trait;
use uuid::Uuid;

use super::{MovieStore, UserStore};
use crate::db::{self, DbPool};
use crate::error::AppResult;
use crate::models::{Director, Genre, Movie, NewUser, User, UserChanges};

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        db::user_find_by_username(&self.pool, username).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        db::user_get_by_id(&self.pool, id).await
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        db::user_create(&self.pool, &user).await
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<Option<User>> {
        db::user_update(&self.pool, id, &changes).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        db::user_delete(&self.pool, id).await
    }

    async fn add_favorite(&self, id: Uuid, movie_id: Uuid) -> AppResult<Option<User>> {
        if db::user_get_by_id(&self.pool, id).await?.is_none() {
            return Ok(None);
        }
        db::favorite_add(&self.pool, id, movie_id).await?;
        db::user_get_by_id(&self.pool, id).await
    }

    async fn remove_favorite(&self, id: Uuid, movie_id: Uuid) -> AppResult<Option<User>> {
        db::favorite_remove(&self.pool, id, movie_id).await?;
        db::user_get_by_id(&self.pool, id).await
    }
}

#[async_trait]
impl MovieStore for PgStore {
    async fn list(&self) -> AppResult<Vec<Movie>> {
        db::movies_list(&self.pool).await
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Option<Movie>> {
        db::movie_find_by_title(&self.pool, title).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Movie>> {
        db::movie_get_by_id(&self.pool, id).await
    }

    async fn find_genre(&self, name: &str) -> AppResult<Option<Genre>> {
        db::genre_find_by_name(&self.pool, name).await
    }

    async fn find_director(&self, name: &str) -> AppResult<Option<Director>> {
        db::director_find_by_name(&self.pool, name).await
    }
}
