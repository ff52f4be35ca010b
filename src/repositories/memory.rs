//! In-memory store: the catalog is fixed at construction, users live in a map.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{MovieStore, UserStore};
use crate::error::{AppError, AppResult};
use crate::models::{seed_catalog, Director, Genre, Movie, NewUser, User, UserChanges};

/// Store backed by process memory. Cloning shares the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    movies: Arc<Vec<Movie>>,
}

impl MemoryStore {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            movies: Arc::new(movies),
        }
    }

    /// Store preloaded with [`seed_catalog`].
    pub fn seeded() -> Self {
        Self::new(seed_catalog())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(AppError::Conflict(format!(
                "{} already exists",
                user.username
            )));
        }
        let row = User {
            id: Uuid::new_v4(),
            username: user.username,
            password_hash: user.password_hash,
            email: user.email,
            birthday: user.birthday,
            favorite_movies: Vec::new(),
            created_at: Utc::now(),
        };
        users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;
        if let Some(name) = &changes.username {
            if users.values().any(|u| u.id != id && &u.username == name) {
                return Err(AppError::Conflict(format!("{} already exists", name)));
            }
        }
        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(username) = changes.username {
            user.username = username;
        }
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(birthday) = changes.birthday {
            user.birthday = Some(birthday);
        }
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.users.write().await.remove(&id).is_some())
    }

    async fn add_favorite(&self, id: Uuid, movie_id: Uuid) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(&id).map(|user| {
            if !user.favorite_movies.contains(&movie_id) {
                user.favorite_movies.push(movie_id);
            }
            user.clone()
        }))
    }

    async fn remove_favorite(&self, id: Uuid, movie_id: Uuid) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(&id).map(|user| {
            user.favorite_movies.retain(|m| *m != movie_id);
            user.clone()
        }))
    }
}

#[async_trait]
impl MovieStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Movie>> {
        Ok(self.movies.to_vec())
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Option<Movie>> {
        Ok(self.movies.iter().find(|m| m.title == title).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Movie>> {
        Ok(self.movies.iter().find(|m| m.id == id).cloned())
    }

    async fn find_genre(&self, name: &str) -> AppResult<Option<Genre>> {
        Ok(self
            .movies
            .iter()
            .find(|m| m.genre.name == name)
            .map(|m| m.genre.clone()))
    }

    async fn find_director(&self, name: &str) -> AppResult<Option<Director>> {
        Ok(self
            .movies
            .iter()
            .find(|m| m.director.name == name)
            .map(|m| m.director.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "hash".to_string(),
            email: format!("{}@example.com", username),
            birthday: None,
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_username() {
        let store = MemoryStore::seeded();
        store.create(new_user("alice")).await.unwrap();
        let err = store.create(new_user("alice")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn username_lookup_is_case_sensitive() {
        let store = MemoryStore::seeded();
        let alice = store.create(new_user("alice")).await.unwrap();
        let found = store.find_by_username("alice").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(alice.id));
        assert!(store.find_by_username("Alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn favorites_are_deduplicated_and_removable() {
        let store = MemoryStore::seeded();
        let alice = store.create(new_user("alice")).await.unwrap();
        let movie = MovieStore::list(&store).await.unwrap().remove(0);

        store.add_favorite(alice.id, movie.id).await.unwrap();
        let user = store.add_favorite(alice.id, movie.id).await.unwrap().unwrap();
        assert_eq!(user.favorite_movies, vec![movie.id]);

        let user = store.remove_favorite(alice.id, movie.id).await.unwrap().unwrap();
        assert!(user.favorite_movies.is_empty());
    }

    #[tokio::test]
    async fn update_rejects_taken_username() {
        let store = MemoryStore::seeded();
        store.create(new_user("alice")).await.unwrap();
        let bob = store.create(new_user("bobby")).await.unwrap();
        let changes = UserChanges {
            username: Some("alice".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            store.update(bob.id, changes).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn catalog_lookups_by_name() {
        let store = MemoryStore::seeded();
        let genre = store.find_genre("Comedy").await.unwrap().unwrap();
        assert_eq!(genre.name, "Comedy");
        let director = store.find_director("Michael Mann").await.unwrap().unwrap();
        assert_eq!(director.birth_year, 1943);
        assert!(store.find_by_title("Unknown").await.unwrap().is_none());
    }
}
