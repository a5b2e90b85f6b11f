use super::catalog::{Genre, GenreId, Rating, RatingId};
use super::user::UserId;
use super::ValidateDraft;
use crate::domain::error::{CoreError, CoreResult};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use utoipa::ToSchema;

pub type FilmId = i64;

pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// The first public film screening; no release date may precede it.
pub fn earliest_release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1895, 12, 28).unwrap_or(NaiveDate::MIN)
}

/// A stored film with its references resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    #[schema(value_type = i64)]
    pub id: FilmId,
    pub name: String,
    pub description: Option<String>,
    pub release_date: NaiveDate,
    /// Minutes.
    pub duration: i32,
    pub mpa: Rating,
    /// Sorted by genre id.
    pub genres: Vec<Genre>,
    #[schema(value_type = Vec<i64>)]
    pub likes: BTreeSet<UserId>,
}

impl Film {
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }
}

/// Client-settable part of a film, used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmDraft {
    pub name: String,
    pub description: Option<String>,
    pub release_date: NaiveDate,
    pub duration: i32,
    pub rating_id: RatingId,
    pub genre_ids: BTreeSet<GenreId>,
}

impl ValidateDraft for FilmDraft {
    fn validate(&self, today: NaiveDate) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("film name must not be blank"));
        }
        if let Some(description) = &self.description {
            if description.chars().count() > MAX_DESCRIPTION_CHARS {
                return Err(CoreError::validation(format!(
                    "film description must not exceed {} characters",
                    MAX_DESCRIPTION_CHARS
                )));
            }
        }
        if self.release_date < earliest_release_date() {
            return Err(CoreError::validation(
                "release date must not be earlier than 1895-12-28",
            ));
        }
        if self.release_date > today {
            return Err(CoreError::validation("release date must not be in the future"));
        }
        if self.duration <= 0 {
            return Err(CoreError::validation("film duration must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(release_date: NaiveDate) -> FilmDraft {
        FilmDraft {
            name: "Arrival of a Train".to_string(),
            description: Some("Short".to_string()),
            release_date,
            duration: 1,
            rating_id: 1,
            genre_ids: BTreeSet::new(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn release_date_boundary_is_inclusive() {
        assert!(draft(earliest_release_date()).validate(today()).is_ok());

        let day_before = NaiveDate::from_ymd_opt(1895, 12, 27).unwrap();
        let err = draft(day_before).validate(today()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn future_release_date_is_rejected() {
        let tomorrow = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        assert!(draft(tomorrow).validate(today()).is_err());
        assert!(draft(today()).validate(today()).is_ok());
    }

    #[test]
    fn scalar_rules() {
        let mut blank = draft(today());
        blank.name = "   ".to_string();
        assert!(blank.validate(today()).is_err());

        let mut long = draft(today());
        long.description = Some("x".repeat(MAX_DESCRIPTION_CHARS + 1));
        assert!(long.validate(today()).is_err());
        long.description = Some("x".repeat(MAX_DESCRIPTION_CHARS));
        assert!(long.validate(today()).is_ok());

        let mut zero = draft(today());
        zero.duration = 0;
        assert!(zero.validate(today()).is_err());
    }
}
