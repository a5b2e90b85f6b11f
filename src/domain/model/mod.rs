//! Domain model definitions: films, users and the reference catalogs.

use crate::domain::error::CoreResult;
use chrono::NaiveDate;

pub mod catalog;
pub mod film;
pub mod user;

pub use catalog::{Genre, GenreId, Rating, RatingId, DEFAULT_GENRES, DEFAULT_RATINGS};
pub use film::{earliest_release_date, Film, FilmDraft, FilmId};
pub use user::{User, UserDraft, UserId};

/// Scalar-field rules a draft must satisfy before any storage call.
///
/// `today` is passed in so that "not in the future" checks stay testable.
pub trait ValidateDraft {
    /// Applies to both creation and full replacement.
    fn validate(&self, today: NaiveDate) -> CoreResult<()>;
}
