//! In-memory storage backend.
//!
//! All collections sit behind one `RwLock`, so each call observes and mutates a
//! consistent snapshot; the lock is never held across calls.

use crate::domain::model::{
    Film, FilmDraft, FilmId, Genre, GenreId, Rating, RatingId, User, UserDraft, UserId,
    DEFAULT_GENRES, DEFAULT_RATINGS,
};
use crate::domain::{CoreError, CoreResult};
use crate::storage::{
    CatalogStorage, FilmStorage, FriendStorage, LikeStorage, Storage, UserStorage,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct FilmRow {
    name: String,
    description: Option<String>,
    release_date: NaiveDate,
    duration: i32,
    rating_id: RatingId,
    genre_ids: BTreeSet<GenreId>,
}

#[derive(Debug, Clone)]
struct UserRow {
    email: String,
    login: String,
    name: String,
    birthday: NaiveDate,
}

#[derive(Debug, Default)]
struct State {
    genres: BTreeMap<GenreId, String>,
    ratings: BTreeMap<RatingId, String>,
    films: BTreeMap<FilmId, FilmRow>,
    users: BTreeMap<UserId, UserRow>,
    /// (film_id, user_id)
    likes: BTreeSet<(FilmId, UserId)>,
    /// (user_id, friend_id)
    friends: BTreeSet<(UserId, UserId)>,
    last_film_id: FilmId,
    last_user_id: UserId,
}

impl State {
    fn check_references(&self, draft: &FilmDraft) -> CoreResult<()> {
        if !self.ratings.contains_key(&draft.rating_id) {
            return Err(CoreError::validation(format!(
                "unknown rating id {}",
                draft.rating_id
            )));
        }
        let missing: Vec<GenreId> = draft
            .genre_ids
            .iter()
            .copied()
            .filter(|id| !self.genres.contains_key(id))
            .collect();
        if !missing.is_empty() {
            return Err(CoreError::validation(format!(
                "unknown genre ids {:?}",
                missing
            )));
        }
        Ok(())
    }

    fn film_row(draft: &FilmDraft) -> FilmRow {
        FilmRow {
            name: draft.name.clone(),
            description: draft.description.clone(),
            release_date: draft.release_date,
            duration: draft.duration,
            rating_id: draft.rating_id,
            genre_ids: draft.genre_ids.clone(),
        }
    }

    fn user_row(draft: &UserDraft) -> UserRow {
        UserRow {
            email: draft.email.clone(),
            login: draft.login.clone(),
            name: draft.display_name().to_string(),
            birthday: draft.birthday,
        }
    }

    fn resolve_film(&self, id: FilmId, row: &FilmRow) -> CoreResult<Film> {
        let rating_name = self.ratings.get(&row.rating_id).ok_or_else(|| {
            CoreError::Storage(anyhow::anyhow!(
                "film {} references missing rating {}",
                id,
                row.rating_id
            ))
        })?;
        let genres = row
            .genre_ids
            .iter()
            .filter_map(|gid| {
                self.genres.get(gid).map(|name| Genre {
                    id: *gid,
                    name: name.clone(),
                })
            })
            .collect();
        let likes = self
            .likes
            .range((id, UserId::MIN)..=(id, UserId::MAX))
            .map(|(_, user_id)| *user_id)
            .collect();
        Ok(Film {
            id,
            name: row.name.clone(),
            description: row.description.clone(),
            release_date: row.release_date,
            duration: row.duration,
            mpa: Rating {
                id: row.rating_id,
                name: rating_name.clone(),
            },
            genres,
            likes,
        })
    }

    fn friends_of(&self, user_id: UserId) -> BTreeSet<UserId> {
        self.friends
            .range((user_id, UserId::MIN)..=(user_id, UserId::MAX))
            .map(|(_, friend_id)| *friend_id)
            .collect()
    }

    fn resolve_user(&self, id: UserId, row: &UserRow) -> User {
        User {
            id,
            email: row.email.clone(),
            login: row.login.clone(),
            name: row.name.clone(),
            birthday: row.birthday,
            friends: self.friends_of(id),
        }
    }
}

/// Map-backed storage, used by tests and by `STORAGE_BACKEND=memory`.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: RwLock<State>,
}

impl MemoryStorage {
    /// Creates an empty store (no catalog entries).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the default genre and rating vocabularies.
    pub fn with_default_catalogs() -> Self {
        let mut state = State::default();
        for (id, name) in DEFAULT_GENRES {
            state.genres.insert(*id, name.to_string());
        }
        for (id, name) in DEFAULT_RATINGS {
            state.ratings.insert(*id, name.to_string());
        }
        Self {
            state: RwLock::new(state),
        }
    }

    /// Adds or renames a genre. Catalogs are populated out-of-band.
    pub async fn put_genre(&self, genre: Genre) {
        self.state.write().await.genres.insert(genre.id, genre.name);
    }

    /// Adds or renames a rating.
    pub async fn put_rating(&self, rating: Rating) {
        self.state.write().await.ratings.insert(rating.id, rating.name);
    }

    /// Drops a genre and every film link to it.
    pub async fn remove_genre(&self, id: GenreId) {
        let mut state = self.state.write().await;
        state.genres.remove(&id);
        for row in state.films.values_mut() {
            row.genre_ids.remove(&id);
        }
    }
}

#[async_trait]
impl CatalogStorage for MemoryStorage {
    async fn all_genres(&self) -> CoreResult<Vec<Genre>> {
        let state = self.state.read().await;
        Ok(state
            .genres
            .iter()
            .map(|(id, name)| Genre {
                id: *id,
                name: name.clone(),
            })
            .collect())
    }

    async fn genre_by_id(&self, id: GenreId) -> CoreResult<Option<Genre>> {
        let state = self.state.read().await;
        Ok(state.genres.get(&id).map(|name| Genre {
            id,
            name: name.clone(),
        }))
    }

    async fn genres_by_ids(&self, ids: &[GenreId]) -> CoreResult<Vec<Genre>> {
        let state = self.state.read().await;
        let wanted: BTreeSet<GenreId> = ids.iter().copied().collect();
        Ok(wanted
            .into_iter()
            .filter_map(|id| {
                state.genres.get(&id).map(|name| Genre {
                    id,
                    name: name.clone(),
                })
            })
            .collect())
    }

    async fn all_ratings(&self) -> CoreResult<Vec<Rating>> {
        let state = self.state.read().await;
        Ok(state
            .ratings
            .iter()
            .map(|(id, name)| Rating {
                id: *id,
                name: name.clone(),
            })
            .collect())
    }

    async fn rating_by_id(&self, id: RatingId) -> CoreResult<Option<Rating>> {
        let state = self.state.read().await;
        Ok(state.ratings.get(&id).map(|name| Rating {
            id,
            name: name.clone(),
        }))
    }
}

#[async_trait]
impl FilmStorage for MemoryStorage {
    async fn insert_film(&self, draft: &FilmDraft) -> CoreResult<FilmId> {
        let mut state = self.state.write().await;
        state.check_references(draft)?;
        state.last_film_id += 1;
        let id = state.last_film_id;
        let row = State::film_row(draft);
        state.films.insert(id, row);
        Ok(id)
    }

    async fn update_film(&self, id: FilmId, draft: &FilmDraft) -> CoreResult<bool> {
        let mut state = self.state.write().await;
        if !state.films.contains_key(&id) {
            return Ok(false);
        }
        state.check_references(draft)?;
        state.films.insert(id, State::film_row(draft));
        Ok(true)
    }

    async fn film_by_id(&self, id: FilmId) -> CoreResult<Option<Film>> {
        let state = self.state.read().await;
        match state.films.get(&id) {
            Some(row) => Ok(Some(state.resolve_film(id, row)?)),
            None => Ok(None),
        }
    }

    async fn all_films(&self) -> CoreResult<Vec<Film>> {
        let state = self.state.read().await;
        state
            .films
            .iter()
            .map(|(id, row)| state.resolve_film(*id, row))
            .collect()
    }

    async fn film_exists(&self, id: FilmId) -> CoreResult<bool> {
        Ok(self.state.read().await.films.contains_key(&id))
    }
}

#[async_trait]
impl UserStorage for MemoryStorage {
    async fn insert_user(&self, draft: &UserDraft) -> CoreResult<UserId> {
        let mut state = self.state.write().await;
        state.last_user_id += 1;
        let id = state.last_user_id;
        state.users.insert(id, State::user_row(draft));
        Ok(id)
    }

    async fn update_user(&self, id: UserId, draft: &UserDraft) -> CoreResult<bool> {
        let mut state = self.state.write().await;
        match state.users.get_mut(&id) {
            Some(row) => {
                *row = State::user_row(draft);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn user_by_id(&self, id: UserId) -> CoreResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.get(&id).map(|row| state.resolve_user(id, row)))
    }

    async fn users_by_ids(&self, ids: &[UserId]) -> CoreResult<Vec<User>> {
        let state = self.state.read().await;
        let wanted: BTreeSet<UserId> = ids.iter().copied().collect();
        Ok(wanted
            .into_iter()
            .filter_map(|id| state.users.get(&id).map(|row| state.resolve_user(id, row)))
            .collect())
    }

    async fn all_users(&self) -> CoreResult<Vec<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .map(|(id, row)| state.resolve_user(*id, row))
            .collect())
    }

    async fn user_exists(&self, id: UserId) -> CoreResult<bool> {
        Ok(self.state.read().await.users.contains_key(&id))
    }
}

#[async_trait]
impl LikeStorage for MemoryStorage {
    async fn insert_like(&self, film_id: FilmId, user_id: UserId) -> CoreResult<()> {
        self.state.write().await.likes.insert((film_id, user_id));
        Ok(())
    }

    async fn delete_like(&self, film_id: FilmId, user_id: UserId) -> CoreResult<()> {
        self.state.write().await.likes.remove(&(film_id, user_id));
        Ok(())
    }

    async fn count_likes(&self, film_id: FilmId) -> CoreResult<u64> {
        let state = self.state.read().await;
        let count = state
            .likes
            .range((film_id, UserId::MIN)..=(film_id, UserId::MAX))
            .count();
        Ok(count as u64)
    }
}

#[async_trait]
impl FriendStorage for MemoryStorage {
    async fn insert_friend(&self, user_id: UserId, friend_id: UserId) -> CoreResult<()> {
        self.state.write().await.friends.insert((user_id, friend_id));
        Ok(())
    }

    async fn delete_friend(&self, user_id: UserId, friend_id: UserId) -> CoreResult<()> {
        self.state
            .write()
            .await
            .friends
            .remove(&(user_id, friend_id));
        Ok(())
    }

    async fn friend_ids(&self, user_id: UserId) -> CoreResult<BTreeSet<UserId>> {
        Ok(self.state.read().await.friends_of(user_id))
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn ping(&self) -> CoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
