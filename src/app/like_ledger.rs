//! Film-like edges.
//!
//! Only the endpoints are checked; the edge itself has no existence check, so
//! liking twice or removing a missing like both succeed without effect.

use crate::domain::model::{FilmId, UserId};
use crate::domain::{CoreError, CoreResult, Entity};
use crate::storage::{FilmStorage, LikeStorage, Storage, UserStorage};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct LikeLedger {
    storage: Arc<dyn Storage>,
}

impl LikeLedger {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    async fn require_endpoints(&self, film_id: FilmId, user_id: UserId) -> CoreResult<()> {
        if !self.storage.film_exists(film_id).await? {
            return Err(CoreError::not_found(Entity::Film, film_id));
        }
        if !self.storage.user_exists(user_id).await? {
            return Err(CoreError::not_found(Entity::User, user_id));
        }
        Ok(())
    }

    pub async fn add_like(&self, film_id: FilmId, user_id: UserId) -> CoreResult<()> {
        self.require_endpoints(film_id, user_id).await?;
        self.storage.insert_like(film_id, user_id).await?;
        info!(film_id, user_id, "like added");
        Ok(())
    }

    pub async fn remove_like(&self, film_id: FilmId, user_id: UserId) -> CoreResult<()> {
        self.require_endpoints(film_id, user_id).await?;
        self.storage.delete_like(film_id, user_id).await?;
        info!(film_id, user_id, "like removed");
        Ok(())
    }

    pub async fn count_likes(&self, film_id: FilmId) -> CoreResult<u64> {
        if !self.storage.film_exists(film_id).await? {
            return Err(CoreError::not_found(Entity::Film, film_id));
        }
        self.storage.count_likes(film_id).await
    }
}
