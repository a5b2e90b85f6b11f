use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub type GenreId = i32;
pub type RatingId = i32;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub struct Genre {
    #[schema(value_type = i32)]
    pub id: GenreId,
    pub name: String,
}

/// Age-rating classification (exposed as `mpa` on the wire).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub struct Rating {
    #[schema(value_type = i32)]
    pub id: RatingId,
    pub name: String,
}

/// Genre vocabulary seeded into a fresh store.
pub const DEFAULT_GENRES: &[(GenreId, &str)] = &[
    (1, "Comedy"),
    (2, "Drama"),
    (3, "Cartoon"),
    (4, "Thriller"),
    (5, "Documentary"),
    (6, "Action"),
];

/// Rating vocabulary seeded into a fresh store.
pub const DEFAULT_RATINGS: &[(RatingId, &str)] = &[
    (1, "G"),
    (2, "PG"),
    (3, "PG-13"),
    (4, "R"),
    (5, "NC-17"),
];
