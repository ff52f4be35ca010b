//! Queries: users, favorites, movies.

use crate::error::{AppError, AppResult};
use crate::models::{Director, Genre, Movie, NewUser, User, UserChanges};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;

// ---- User ----

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self, favorite_movies: Vec<Uuid>) -> User {
        User {
            id: self.id,
            username: self.username,
            password_hash: self.password_hash,
            email: self.email,
            birthday: self.birthday,
            favorite_movies,
            created_at: self.created_at,
        }
    }
}

const USER_COLUMNS: &str = "id, username, password_hash, email, birthday, created_at";

fn map_unique_violation(err: sqlx::Error, username: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(format!("{} already exists", username))
        }
        _ => AppError::Db(err),
    }
}

async fn with_favorites(pool: &DbPool, row: Option<UserRow>) -> AppResult<Option<User>> {
    match row {
        Some(row) => {
            let favorites = favorites_list(pool, row.id).await?;
            Ok(Some(row.into_user(favorites)))
        }
        None => Ok(None),
    }
}

pub async fn user_create(pool: &DbPool, user: &NewUser) -> AppResult<User> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        r#"
        INSERT INTO users (id, username, password_hash, email, birthday)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(&user.email)
    .bind(user.birthday)
    .fetch_one(pool)
    .await
    .map_err(|e| map_unique_violation(e, &user.username))?;
    Ok(row.into_user(Vec::new()))
}

pub async fn user_find_by_username(pool: &DbPool, username: &str) -> AppResult<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;
    with_favorites(pool, row).await
}

pub async fn user_get_by_id(pool: &DbPool, id: Uuid) -> AppResult<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    with_favorites(pool, row).await
}

pub async fn user_update(pool: &DbPool, id: Uuid, changes: &UserChanges) -> AppResult<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        r#"
        UPDATE users SET
            username = COALESCE($2, username),
            password_hash = COALESCE($3, password_hash),
            email = COALESCE($4, email),
            birthday = COALESCE($5, birthday)
        WHERE id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(changes.username.as_deref())
    .bind(changes.password_hash.as_deref())
    .bind(changes.email.as_deref())
    .bind(changes.birthday)
    .fetch_optional(pool)
    .await
    .map_err(|e| map_unique_violation(e, changes.username.as_deref().unwrap_or_default()))?;
    with_favorites(pool, row).await
}

pub async fn user_delete(pool: &DbPool, id: Uuid) -> AppResult<bool> {
    let r = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(r.rows_affected() > 0)
}

// ---- Favorites ----

pub async fn favorites_list(pool: &DbPool, user_id: Uuid) -> AppResult<Vec<Uuid>> {
    let ids = sqlx::query_scalar::<_, Uuid>(
        "SELECT movie_id FROM user_favorites WHERE user_id = $1 ORDER BY added_at",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(ids)
}

pub async fn favorite_add(pool: &DbPool, user_id: Uuid, movie_id: Uuid) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO user_favorites (user_id, movie_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, movie_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(movie_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn favorite_remove(pool: &DbPool, user_id: Uuid, movie_id: Uuid) -> AppResult<()> {
    sqlx::query("DELETE FROM user_favorites WHERE user_id = $1 AND movie_id = $2")
        .bind(user_id)
        .bind(movie_id)
        .execute(pool)
        .await?;
    Ok(())
}

// ---- Movies ----

#[derive(Debug, FromRow)]
pub struct MovieRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub genre_name: String,
    pub genre_description: String,
    pub director_name: String,
    pub director_bio: String,
    pub director_birth_year: i32,
    pub director_death_year: Option<i32>,
    pub image_url: String,
    pub featured: bool,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie {
            id: row.id,
            title: row.title,
            description: row.description,
            genre: Genre {
                name: row.genre_name,
                description: row.genre_description,
            },
            director: Director {
                name: row.director_name,
                bio: row.director_bio,
                birth_year: row.director_birth_year,
                death_year: row.director_death_year,
            },
            image_url: row.image_url,
            featured: row.featured,
        }
    }
}

const MOVIE_COLUMNS: &str = "id, title, description, genre_name, genre_description, \
    director_name, director_bio, director_birth_year, director_death_year, image_url, featured";

pub async fn movies_list(pool: &DbPool) -> AppResult<Vec<Movie>> {
    let rows = sqlx::query_as::<_, MovieRow>(&format!(
        "SELECT {MOVIE_COLUMNS} FROM movies ORDER BY title"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Movie::from).collect())
}

pub async fn movie_find_by_title(pool: &DbPool, title: &str) -> AppResult<Option<Movie>> {
    let row = sqlx::query_as::<_, MovieRow>(&format!(
        "SELECT {MOVIE_COLUMNS} FROM movies WHERE title = $1"
    ))
    .bind(title)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Movie::from))
}

pub async fn movie_get_by_id(pool: &DbPool, id: Uuid) -> AppResult<Option<Movie>> {
    let row = sqlx::query_as::<_, MovieRow>(&format!(
        "SELECT {MOVIE_COLUMNS} FROM movies WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Movie::from))
}

pub async fn genre_find_by_name(pool: &DbPool, name: &str) -> AppResult<Option<Genre>> {
    let row = sqlx::query_as::<_, (String, String)>(
        "SELECT genre_name, genre_description FROM movies WHERE genre_name = $1 LIMIT 1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(name, description)| Genre { name, description }))
}

pub async fn director_find_by_name(pool: &DbPool, name: &str) -> AppResult<Option<Director>> {
    let row = sqlx::query_as::<_, (String, String, i32, Option<i32>)>(
        r#"
        SELECT director_name, director_bio, director_birth_year, director_death_year
        FROM movies WHERE director_name = $1 LIMIT 1
        "#,
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(name, bio, birth_year, death_year)| Director {
        name,
        bio,
        birth_year,
        death_year,
    }))
}

/// Insert catalog entries whose title is not present yet.
pub async fn movies_seed(pool: &DbPool, movies: &[Movie]) -> AppResult<u64> {
    let mut inserted = 0;
    for movie in movies {
        let r = sqlx::query(
            r#"
            INSERT INTO movies (id, title, description, genre_name, genre_description,
                director_name, director_bio, director_birth_year, director_death_year,
                image_url, featured)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (title) DO NOTHING
            "#,
        )
        .bind(movie.id)
        .bind(&movie.title)
        .bind(&movie.description)
        .bind(&movie.genre.name)
        .bind(&movie.genre.description)
        .bind(&movie.director.name)
        .bind(&movie.director.bio)
        .bind(movie.director.birth_year)
        .bind(movie.director.death_year)
        .bind(&movie.image_url)
        .bind(movie.featured)
        .execute(pool)
        .await?;
        inserted += r.rows_affected();
    }
    Ok(inserted)
}
