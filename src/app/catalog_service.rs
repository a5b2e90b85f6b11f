//! Read-only lookups over the genre and rating vocabularies.

use crate::domain::model::{Genre, GenreId, Rating, RatingId};
use crate::domain::{CoreError, CoreResult, Entity};
use crate::storage::{CatalogStorage, Storage};
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Clone)]
pub struct CatalogService {
    storage: Arc<dyn Storage>,
}

impl CatalogService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn get_all_genres(&self) -> CoreResult<Vec<Genre>> {
        self.storage.all_genres().await
    }

    pub async fn get_genre_by_id(&self, id: GenreId) -> CoreResult<Genre> {
        self.storage
            .genre_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found(Entity::Genre, id))
    }

    /// Batch lookup; unknown ids are simply absent from the result.
    pub async fn get_genres_by_ids(&self, ids: &[GenreId]) -> CoreResult<Vec<Genre>> {
        self.storage.genres_by_ids(ids).await
    }

    pub async fn get_all_ratings(&self) -> CoreResult<Vec<Rating>> {
        self.storage.all_ratings().await
    }

    pub async fn get_rating_by_id(&self, id: RatingId) -> CoreResult<Rating> {
        self.storage
            .rating_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found(Entity::Rating, id))
    }

    /// Resolves every id in one round trip, failing with `Validation` if any is unknown.
    pub async fn require_genres(&self, ids: &BTreeSet<GenreId>) -> CoreResult<Vec<Genre>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let wanted: Vec<GenreId> = ids.iter().copied().collect();
        let found = self.get_genres_by_ids(&wanted).await?;
        if found.len() != wanted.len() {
            let known: BTreeSet<GenreId> = found.iter().map(|g| g.id).collect();
            let missing: Vec<GenreId> = ids.difference(&known).copied().collect();
            return Err(CoreError::validation(format!(
                "unknown genre ids {:?}",
                missing
            )));
        }
        Ok(found)
    }

    /// Like `get_rating_by_id`, but an unknown rating is a rule violation of the referencing film.
    pub async fn require_rating(&self, id: RatingId) -> CoreResult<Rating> {
        self.storage
            .rating_by_id(id)
            .await?
            .ok_or_else(|| CoreError::validation(format!("unknown rating id {}", id)))
    }
}
