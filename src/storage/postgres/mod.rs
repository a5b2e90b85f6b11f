//! PostgreSQL storage backend.
//!
//! Responsible for:
//! 1.  Creating the application tables (`films`, `users`, link tables, catalogs).
//! 2.  Seeding the genre and rating vocabularies.
//! 3.  Running film writes (row + genre links) inside one SQL transaction, with
//!     foreign keys rejecting references that vanished after validation.

use crate::domain::model::{DEFAULT_GENRES, DEFAULT_RATINGS};
use crate::domain::{CoreError, CoreResult};
use crate::storage::Storage;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

mod catalog;
mod edges;
mod films;
mod users;

/// Foreign-key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS ratings (
        rating_id INTEGER PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    )",
    "CREATE TABLE IF NOT EXISTS genres (
        genre_id INTEGER PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    )",
    "CREATE TABLE IF NOT EXISTS films (
        film_id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        description VARCHAR(200),
        release_date DATE NOT NULL CHECK (release_date >= DATE '1895-12-28'),
        duration INTEGER NOT NULL CHECK (duration > 0),
        rating_id INTEGER NOT NULL REFERENCES ratings (rating_id)
    )",
    "CREATE TABLE IF NOT EXISTS film_genres (
        film_id BIGINT NOT NULL REFERENCES films (film_id) ON DELETE CASCADE,
        genre_id INTEGER NOT NULL REFERENCES genres (genre_id),
        PRIMARY KEY (film_id, genre_id)
    )",
    "CREATE TABLE IF NOT EXISTS users (
        user_id BIGSERIAL PRIMARY KEY,
        email TEXT NOT NULL,
        login TEXT NOT NULL,
        name TEXT NOT NULL,
        birthday DATE NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS film_likes (
        film_id BIGINT NOT NULL REFERENCES films (film_id) ON DELETE CASCADE,
        user_id BIGINT NOT NULL REFERENCES users (user_id) ON DELETE CASCADE,
        PRIMARY KEY (film_id, user_id)
    )",
    "CREATE TABLE IF NOT EXISTS friends (
        user_id BIGINT NOT NULL REFERENCES users (user_id) ON DELETE CASCADE,
        friend_id BIGINT NOT NULL REFERENCES users (user_id) ON DELETE CASCADE,
        PRIMARY KEY (user_id, friend_id)
    )",
];

/// Storage backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects, creates the schema if needed and seeds the catalogs.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        let storage = Self::new(pool);
        storage.ensure_schema().await?;
        storage.seed_catalogs().await?;
        Ok(storage)
    }

    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Inserts the default vocabularies; existing rows are left alone.
    pub async fn seed_catalogs(&self) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        for (id, name) in DEFAULT_RATINGS {
            sqlx::query("INSERT INTO ratings (rating_id, name) VALUES ($1, $2) ON CONFLICT DO NOTHING")
                .bind(*id)
                .bind(*name)
                .execute(&mut *tx)
                .await?;
        }
        for (id, name) in DEFAULT_GENRES {
            sqlx::query("INSERT INTO genres (genre_id, name) VALUES ($1, $2) ON CONFLICT DO NOTHING")
                .bind(*id)
                .bind(*name)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        info!(
            ratings = DEFAULT_RATINGS.len(),
            genres = DEFAULT_GENRES.len(),
            "catalogs seeded"
        );
        Ok(())
    }

    /// Removes every film, user and edge. Catalogs stay. Sequences restart at 1.
    pub async fn clear_data(&self) -> anyhow::Result<()> {
        sqlx::query(
            "TRUNCATE TABLE friends, film_likes, film_genres, films, users RESTART IDENTITY",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// Maps a write failure caused by a dangling catalog reference to `Validation`.
fn reference_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
            return CoreError::validation(format!(
                "film references an unknown rating or genre ({})",
                db_err.message()
            ));
        }
    }
    CoreError::from(err)
}

#[async_trait]
impl Storage for PgStorage {
    async fn ping(&self) -> CoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
