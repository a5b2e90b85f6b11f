//! Read-only friend queries over the friendship graph.

use crate::app::user_service::UserService;
use crate::domain::model::{User, UserId};
use crate::domain::CoreResult;
use crate::storage::{FriendStorage, Storage, UserStorage};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct SocialQueryService {
    storage: Arc<dyn Storage>,
    users: UserService,
}

impl SocialQueryService {
    pub fn new(storage: Arc<dyn Storage>, users: UserService) -> Self {
        Self { storage, users }
    }

    async fn resolve(&self, ids: &BTreeSet<UserId>) -> CoreResult<Vec<User>> {
        let ids: Vec<UserId> = ids.iter().copied().collect();
        self.storage.users_by_ids(&ids).await
    }

    /// Users that `user_id` has added, ascending by id.
    pub async fn get_friends(&self, user_id: UserId) -> CoreResult<Vec<User>> {
        self.users.require_user(user_id).await?;
        let ids = self.storage.friend_ids(user_id).await?;
        self.resolve(&ids).await
    }

    /// Users both `user_id` and `other_id` have added, ascending by id.
    pub async fn get_common_friends(&self, user_id: UserId, other_id: UserId) -> CoreResult<Vec<User>> {
        self.users.require_user(user_id).await?;
        self.users.require_user(other_id).await?;
        let mine = self.storage.friend_ids(user_id).await?;
        let theirs = self.storage.friend_ids(other_id).await?;
        let common: BTreeSet<UserId> = mine.intersection(&theirs).copied().collect();
        debug!(user_id, other_id, common = common.len(), "common friends resolved");
        self.resolve(&common).await
    }
}
