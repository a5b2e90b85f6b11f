//! Film repository: creation, full-replacement updates and reads.

use crate::app::catalog_service::CatalogService;
use crate::domain::model::{Film, FilmDraft, FilmId, ValidateDraft};
use crate::domain::ranking;
use crate::domain::{CoreError, CoreResult, Entity};
use crate::storage::{FilmStorage, Storage};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct FilmService {
    storage: Arc<dyn Storage>,
    catalog: CatalogService,
}

impl FilmService {
    pub fn new(storage: Arc<dyn Storage>, catalog: CatalogService) -> Self {
        Self { storage, catalog }
    }

    /// Runs every rule a film write must satisfy. Nothing is written here.
    ///
    /// The rating and genre checks are independent; when both fail the error names both.
    async fn validate_references(&self, draft: &FilmDraft) -> CoreResult<()> {
        let (rating, genres) = tokio::join!(
            self.catalog.require_rating(draft.rating_id),
            self.catalog.require_genres(&draft.genre_ids)
        );
        match (rating, genres) {
            (Ok(_), Ok(_)) => Ok(()),
            (Err(CoreError::Validation(a)), Err(CoreError::Validation(b))) => {
                Err(CoreError::Validation(format!("{}; {}", a, b)))
            }
            (Err(e), _) | (_, Err(e)) => Err(e),
        }
    }

    pub async fn add_film(&self, draft: FilmDraft) -> CoreResult<Film> {
        draft.validate(Utc::now().date_naive())?;
        self.validate_references(&draft).await?;

        let id = self.storage.insert_film(&draft).await?;
        info!(film_id = id, name = %draft.name, "film added");
        self.get_film_by_id(id).await
    }

    /// Replaces scalars, rating and the entire genre set of film `id`. Likes are kept.
    pub async fn update_film(&self, id: FilmId, draft: FilmDraft) -> CoreResult<Film> {
        if !self.storage.film_exists(id).await? {
            return Err(CoreError::not_found(Entity::Film, id));
        }
        draft.validate(Utc::now().date_naive())?;
        self.validate_references(&draft).await?;

        if !self.storage.update_film(id, &draft).await? {
            return Err(CoreError::not_found(Entity::Film, id));
        }
        info!(film_id = id, "film updated");
        self.get_film_by_id(id).await
    }

    pub async fn get_film_by_id(&self, id: FilmId) -> CoreResult<Film> {
        self.storage
            .film_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found(Entity::Film, id))
    }

    pub async fn get_all_films(&self) -> CoreResult<Vec<Film>> {
        self.storage.all_films().await
    }

    /// At most `count` films, most liked first. Recomputed on every call.
    pub async fn get_most_popular_films(&self, count: usize) -> CoreResult<Vec<Film>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let films = self.storage.all_films().await?;
        Ok(ranking::most_popular(films, count))
    }
}
