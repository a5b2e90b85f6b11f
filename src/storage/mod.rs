//! Storage interface for the core, one trait per collection.
//!
//! Services only ever see `Arc<dyn Storage>`; whether the rows live in a map or in
//! PostgreSQL is decided once, at startup.

use crate::domain::model::{
    Film, FilmDraft, FilmId, Genre, GenreId, Rating, RatingId, User, UserDraft, UserId,
};
use crate::domain::CoreResult;
use async_trait::async_trait;
use std::collections::BTreeSet;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStorage;
pub use postgres::PgStorage;

#[async_trait]
pub trait CatalogStorage: Send + Sync {
    async fn all_genres(&self) -> CoreResult<Vec<Genre>>;
    async fn genre_by_id(&self, id: GenreId) -> CoreResult<Option<Genre>>;
    /// Returns the genres among `ids` that exist; unknown ids are silently skipped.
    async fn genres_by_ids(&self, ids: &[GenreId]) -> CoreResult<Vec<Genre>>;
    async fn all_ratings(&self) -> CoreResult<Vec<Rating>>;
    async fn rating_by_id(&self, id: RatingId) -> CoreResult<Option<Rating>>;
}

#[async_trait]
pub trait FilmStorage: Send + Sync {
    /// Persists the film row and its genre links atomically and returns the assigned id.
    ///
    /// Fails with `Validation` if a referenced rating or genre vanished before the write.
    async fn insert_film(&self, draft: &FilmDraft) -> CoreResult<FilmId>;
    /// Replaces scalars, rating and the whole genre set. Returns `false` if the film is unknown.
    async fn update_film(&self, id: FilmId, draft: &FilmDraft) -> CoreResult<bool>;
    async fn film_by_id(&self, id: FilmId) -> CoreResult<Option<Film>>;
    /// Every film, ascending by id.
    async fn all_films(&self) -> CoreResult<Vec<Film>>;
    async fn film_exists(&self, id: FilmId) -> CoreResult<bool>;
}

#[async_trait]
pub trait UserStorage: Send + Sync {
    /// `draft` must already carry its display name.
    async fn insert_user(&self, draft: &UserDraft) -> CoreResult<UserId>;
    /// Replaces scalar fields only. Returns `false` if the user is unknown.
    async fn update_user(&self, id: UserId, draft: &UserDraft) -> CoreResult<bool>;
    async fn user_by_id(&self, id: UserId) -> CoreResult<Option<User>>;
    /// Existing users among `ids`, ascending by id.
    async fn users_by_ids(&self, ids: &[UserId]) -> CoreResult<Vec<User>>;
    /// Every user, ascending by id.
    async fn all_users(&self) -> CoreResult<Vec<User>>;
    async fn user_exists(&self, id: UserId) -> CoreResult<bool>;
}

#[async_trait]
pub trait LikeStorage: Send + Sync {
    /// Inserts the edge if absent.
    async fn insert_like(&self, film_id: FilmId, user_id: UserId) -> CoreResult<()>;
    /// Removes the edge if present.
    async fn delete_like(&self, film_id: FilmId, user_id: UserId) -> CoreResult<()>;
    async fn count_likes(&self, film_id: FilmId) -> CoreResult<u64>;
}

#[async_trait]
pub trait FriendStorage: Send + Sync {
    /// Inserts the directed edge `user_id -> friend_id` if absent.
    async fn insert_friend(&self, user_id: UserId, friend_id: UserId) -> CoreResult<()>;
    /// Removes the directed edge if present.
    async fn delete_friend(&self, user_id: UserId, friend_id: UserId) -> CoreResult<()>;
    async fn friend_ids(&self, user_id: UserId) -> CoreResult<BTreeSet<UserId>>;
}

/// Everything a backend has to provide, plus a liveness check.
#[async_trait]
pub trait Storage:
    CatalogStorage + FilmStorage + UserStorage + LikeStorage + FriendStorage
{
    /// Cheap round trip used by `/health` and `preflight`.
    async fn ping(&self) -> CoreResult<()>;

    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;
}
