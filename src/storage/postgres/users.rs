use super::PgStorage;
use crate::domain::model::{User, UserDraft, UserId};
use crate::domain::CoreResult;
use crate::storage::UserStorage;
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::Row;
use std::collections::{BTreeSet, HashMap};

fn user_from_row(row: &PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("user_id")?,
        email: row.try_get("email")?,
        login: row.try_get("login")?,
        name: row.try_get("name")?,
        birthday: row.try_get("birthday")?,
        friends: BTreeSet::new(),
    })
}

impl PgStorage {
    async fn attach_friends(&self, mut users: Vec<User>) -> CoreResult<Vec<User>> {
        if users.is_empty() {
            return Ok(users);
        }
        let ids: Vec<UserId> = users.iter().map(|u| u.id).collect();
        let rows = sqlx::query("SELECT user_id, friend_id FROM friends WHERE user_id = ANY($1)")
            .bind(&ids)
            .fetch_all(&self.pool)
            .await?;
        let mut friends: HashMap<UserId, BTreeSet<UserId>> = HashMap::new();
        for row in rows {
            let user_id: UserId = row.try_get("user_id")?;
            friends
                .entry(user_id)
                .or_default()
                .insert(row.try_get("friend_id")?);
        }
        for user in &mut users {
            user.friends = friends.remove(&user.id).unwrap_or_default();
        }
        Ok(users)
    }

    async fn fetch_users(&self, sql: &str, ids: Option<&[UserId]>) -> CoreResult<Vec<User>> {
        let mut query = sqlx::query(sql);
        if let Some(ids) = ids {
            query = query.bind(ids);
        }
        let rows = query.fetch_all(&self.pool).await?;
        let users = rows
            .iter()
            .map(user_from_row)
            .collect::<Result<Vec<_>, sqlx::Error>>()?;
        self.attach_friends(users).await
    }
}

#[async_trait]
impl UserStorage for PgStorage {
    async fn insert_user(&self, draft: &UserDraft) -> CoreResult<UserId> {
        let user_id: UserId = sqlx::query_scalar(
            "INSERT INTO users (email, login, name, birthday) VALUES ($1, $2, $3, $4) RETURNING user_id",
        )
        .bind(&draft.email)
        .bind(&draft.login)
        .bind(draft.display_name())
        .bind(draft.birthday)
        .fetch_one(&self.pool)
        .await?;
        Ok(user_id)
    }

    async fn update_user(&self, id: UserId, draft: &UserDraft) -> CoreResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET email = $1, login = $2, name = $3, birthday = $4 WHERE user_id = $5",
        )
        .bind(&draft.email)
        .bind(&draft.login)
        .bind(draft.display_name())
        .bind(draft.birthday)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn user_by_id(&self, id: UserId) -> CoreResult<Option<User>> {
        let users = self
            .fetch_users(
                "SELECT user_id, email, login, name, birthday FROM users WHERE user_id = ANY($1)",
                Some(std::slice::from_ref(&id)),
            )
            .await?;
        Ok(users.into_iter().next())
    }

    async fn users_by_ids(&self, ids: &[UserId]) -> CoreResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch_users(
            "SELECT user_id, email, login, name, birthday FROM users WHERE user_id = ANY($1) ORDER BY user_id",
            Some(ids),
        )
        .await
    }

    async fn all_users(&self) -> CoreResult<Vec<User>> {
        self.fetch_users(
            "SELECT user_id, email, login, name, birthday FROM users ORDER BY user_id",
            None,
        )
        .await
    }

    async fn user_exists(&self, id: UserId) -> CoreResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE user_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}
