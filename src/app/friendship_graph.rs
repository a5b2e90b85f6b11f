//! Directed "user added friend" edges.
//!
//! `add_friend(a, b)` does not make `b` a friend of `a`'s in return; a mutual
//! friendship is two calls.

use crate::app::user_service::UserService;
use crate::domain::model::UserId;
use crate::domain::CoreResult;
use crate::storage::{FriendStorage, Storage};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct FriendshipGraph {
    storage: Arc<dyn Storage>,
    users: UserService,
}

impl FriendshipGraph {
    pub fn new(storage: Arc<dyn Storage>, users: UserService) -> Self {
        Self { storage, users }
    }

    /// Self-friendship is allowed.
    pub async fn add_friend(&self, user_id: UserId, friend_id: UserId) -> CoreResult<()> {
        self.users.require_user(user_id).await?;
        self.users.require_user(friend_id).await?;
        self.storage.insert_friend(user_id, friend_id).await?;
        info!(user_id, friend_id, "friend added");
        Ok(())
    }

    pub async fn remove_friend(&self, user_id: UserId, friend_id: UserId) -> CoreResult<()> {
        self.users.require_user(user_id).await?;
        self.users.require_user(friend_id).await?;
        self.storage.delete_friend(user_id, friend_id).await?;
        info!(user_id, friend_id, "friend removed");
        Ok(())
    }
}
