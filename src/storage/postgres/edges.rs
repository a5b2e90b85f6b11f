use super::PgStorage;
use crate::domain::model::{FilmId, UserId};
use crate::domain::CoreResult;
use crate::storage::{FriendStorage, LikeStorage};
use async_trait::async_trait;
use std::collections::BTreeSet;

#[async_trait]
impl LikeStorage for PgStorage {
    async fn insert_like(&self, film_id: FilmId, user_id: UserId) -> CoreResult<()> {
        sqlx::query(
            "INSERT INTO film_likes (film_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(film_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_like(&self, film_id: FilmId, user_id: UserId) -> CoreResult<()> {
        sqlx::query("DELETE FROM film_likes WHERE film_id = $1 AND user_id = $2")
            .bind(film_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count_likes(&self, film_id: FilmId) -> CoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM film_likes WHERE film_id = $1")
            .bind(film_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }
}

#[async_trait]
impl FriendStorage for PgStorage {
    async fn insert_friend(&self, user_id: UserId, friend_id: UserId) -> CoreResult<()> {
        sqlx::query(
            "INSERT INTO friends (user_id, friend_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(friend_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_friend(&self, user_id: UserId, friend_id: UserId) -> CoreResult<()> {
        sqlx::query("DELETE FROM friends WHERE user_id = $1 AND friend_id = $2")
            .bind(user_id)
            .bind(friend_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn friend_ids(&self, user_id: UserId) -> CoreResult<BTreeSet<UserId>> {
        let ids: Vec<UserId> =
            sqlx::query_scalar("SELECT friend_id FROM friends WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(ids.into_iter().collect())
    }
}
