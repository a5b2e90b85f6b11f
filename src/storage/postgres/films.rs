use super::{reference_error, PgStorage};
use crate::domain::model::{Film, FilmDraft, FilmId, Genre, GenreId, Rating, UserId};
use crate::domain::CoreResult;
use crate::storage::FilmStorage;
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row, Transaction};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

const FILM_SELECT: &str = "SELECT f.film_id, f.name, f.description, f.release_date, f.duration, \
     f.rating_id, r.name AS rating_name \
     FROM films f JOIN ratings r ON f.rating_id = r.rating_id";

fn film_from_row(row: &PgRow) -> Result<Film, sqlx::Error> {
    Ok(Film {
        id: row.try_get("film_id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        release_date: row.try_get("release_date")?,
        duration: row.try_get("duration")?,
        mpa: Rating {
            id: row.try_get("rating_id")?,
            name: row.try_get("rating_name")?,
        },
        genres: Vec::new(),
        likes: BTreeSet::new(),
    })
}

async fn insert_genre_links(
    tx: &mut Transaction<'_, Postgres>,
    film_id: FilmId,
    genre_ids: &BTreeSet<GenreId>,
) -> CoreResult<()> {
    if genre_ids.is_empty() {
        return Ok(());
    }
    let ids: Vec<GenreId> = genre_ids.iter().copied().collect();
    sqlx::query("INSERT INTO film_genres (film_id, genre_id) SELECT $1, UNNEST($2::int4[])")
        .bind(film_id)
        .bind(&ids)
        .execute(&mut **tx)
        .await
        .map_err(reference_error)?;
    Ok(())
}

impl PgStorage {
    /// Fills in genres and likes for a batch of films in two round trips.
    async fn resolve_films(&self, mut films: Vec<Film>) -> CoreResult<Vec<Film>> {
        if films.is_empty() {
            return Ok(films);
        }
        let ids: Vec<FilmId> = films.iter().map(|f| f.id).collect();

        let genre_rows = sqlx::query(
            "SELECT fg.film_id, g.genre_id, g.name FROM film_genres fg \
             JOIN genres g ON fg.genre_id = g.genre_id \
             WHERE fg.film_id = ANY($1) ORDER BY fg.film_id, g.genre_id",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        let mut genres: HashMap<FilmId, Vec<Genre>> = HashMap::new();
        for row in genre_rows {
            let film_id: FilmId = row.try_get("film_id")?;
            genres.entry(film_id).or_default().push(Genre {
                id: row.try_get("genre_id")?,
                name: row.try_get("name")?,
            });
        }

        let like_rows = sqlx::query("SELECT film_id, user_id FROM film_likes WHERE film_id = ANY($1)")
            .bind(&ids)
            .fetch_all(&self.pool)
            .await?;
        let mut likes: HashMap<FilmId, BTreeSet<UserId>> = HashMap::new();
        for row in like_rows {
            let film_id: FilmId = row.try_get("film_id")?;
            likes
                .entry(film_id)
                .or_default()
                .insert(row.try_get("user_id")?);
        }

        for film in &mut films {
            film.genres = genres.remove(&film.id).unwrap_or_default();
            film.likes = likes.remove(&film.id).unwrap_or_default();
        }
        Ok(films)
    }
}

#[async_trait]
impl FilmStorage for PgStorage {
    async fn insert_film(&self, draft: &FilmDraft) -> CoreResult<FilmId> {
        let mut tx = self.pool.begin().await?;
        let film_id: FilmId = sqlx::query_scalar(
            "INSERT INTO films (name, description, release_date, duration, rating_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING film_id",
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.release_date)
        .bind(draft.duration)
        .bind(draft.rating_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(reference_error)?;
        insert_genre_links(&mut tx, film_id, &draft.genre_ids).await?;
        tx.commit().await?;
        debug!(film_id, genres = draft.genre_ids.len(), "film row inserted");
        Ok(film_id)
    }

    async fn update_film(&self, id: FilmId, draft: &FilmDraft) -> CoreResult<bool> {
        let mut tx = self.pool.begin().await?;
        let updated = sqlx::query(
            "UPDATE films SET name = $1, description = $2, release_date = $3, duration = $4, \
             rating_id = $5 WHERE film_id = $6",
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.release_date)
        .bind(draft.duration)
        .bind(draft.rating_id)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(reference_error)?;
        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query("DELETE FROM film_genres WHERE film_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_genre_links(&mut tx, id, &draft.genre_ids).await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn film_by_id(&self, id: FilmId) -> CoreResult<Option<Film>> {
        let sql = format!("{} WHERE f.film_id = $1", FILM_SELECT);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        let film = match row {
            Some(row) => film_from_row(&row)?,
            None => return Ok(None),
        };
        Ok(self.resolve_films(vec![film]).await?.pop())
    }

    async fn all_films(&self) -> CoreResult<Vec<Film>> {
        let sql = format!("{} ORDER BY f.film_id", FILM_SELECT);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        let films = rows
            .iter()
            .map(film_from_row)
            .collect::<Result<Vec<_>, sqlx::Error>>()?;
        self.resolve_films(films).await
    }

    async fn film_exists(&self, id: FilmId) -> CoreResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM films WHERE film_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}
