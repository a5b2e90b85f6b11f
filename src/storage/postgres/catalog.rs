use super::PgStorage;
use crate::domain::model::{Genre, GenreId, Rating, RatingId};
use crate::domain::CoreResult;
use crate::storage::CatalogStorage;
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::Row;

fn genre_from_row(row: &PgRow) -> Result<Genre, sqlx::Error> {
    Ok(Genre {
        id: row.try_get("genre_id")?,
        name: row.try_get("name")?,
    })
}

fn rating_from_row(row: &PgRow) -> Result<Rating, sqlx::Error> {
    Ok(Rating {
        id: row.try_get("rating_id")?,
        name: row.try_get("name")?,
    })
}

#[async_trait]
impl CatalogStorage for PgStorage {
    async fn all_genres(&self) -> CoreResult<Vec<Genre>> {
        let rows = sqlx::query("SELECT genre_id, name FROM genres ORDER BY genre_id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(genre_from_row).collect::<Result<Vec<_>, sqlx::Error>>()?)
    }

    async fn genre_by_id(&self, id: GenreId) -> CoreResult<Option<Genre>> {
        let row = sqlx::query("SELECT genre_id, name FROM genres WHERE genre_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(genre_from_row).transpose()?)
    }

    async fn genres_by_ids(&self, ids: &[GenreId]) -> CoreResult<Vec<Genre>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query(
            "SELECT genre_id, name FROM genres WHERE genre_id = ANY($1) ORDER BY genre_id",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(genre_from_row).collect::<Result<Vec<_>, sqlx::Error>>()?)
    }

    async fn all_ratings(&self) -> CoreResult<Vec<Rating>> {
        let rows = sqlx::query("SELECT rating_id, name FROM ratings ORDER BY rating_id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(rating_from_row).collect::<Result<Vec<_>, sqlx::Error>>()?)
    }

    async fn rating_by_id(&self, id: RatingId) -> CoreResult<Option<Rating>> {
        let row = sqlx::query("SELECT rating_id, name FROM ratings WHERE rating_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(rating_from_row).transpose()?)
    }
}
