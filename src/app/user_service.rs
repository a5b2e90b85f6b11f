//! User repository. Friend edges are edited through `FriendshipGraph`, never here.

use crate::domain::model::{User, UserDraft, UserId, ValidateDraft};
use crate::domain::{CoreError, CoreResult, Entity};
use crate::storage::{Storage, UserStorage};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct UserService {
    storage: Arc<dyn Storage>,
}

impl UserService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn create_user(&self, draft: UserDraft) -> CoreResult<User> {
        draft.validate(Utc::now().date_naive())?;
        let draft = draft.normalized();

        let id = self.storage.insert_user(&draft).await?;
        info!(user_id = id, login = %draft.login, "user created");
        self.get_user_by_id(id).await
    }

    pub async fn update_user(&self, id: UserId, draft: UserDraft) -> CoreResult<User> {
        if !self.storage.user_exists(id).await? {
            return Err(CoreError::not_found(Entity::User, id));
        }
        draft.validate(Utc::now().date_naive())?;
        let draft = draft.normalized();

        if !self.storage.update_user(id, &draft).await? {
            return Err(CoreError::not_found(Entity::User, id));
        }
        info!(user_id = id, "user updated");
        self.get_user_by_id(id).await
    }

    pub async fn get_user_by_id(&self, id: UserId) -> CoreResult<User> {
        self.storage
            .user_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found(Entity::User, id))
    }

    pub async fn get_all_users(&self) -> CoreResult<Vec<User>> {
        self.storage.all_users().await
    }

    /// Fails with `NotFound` unless `id` exists.
    pub(crate) async fn require_user(&self, id: UserId) -> CoreResult<()> {
        if self.storage.user_exists(id).await? {
            Ok(())
        } else {
            Err(CoreError::not_found(Entity::User, id))
        }
    }
}
