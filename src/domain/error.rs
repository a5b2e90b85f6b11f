//! Error taxonomy shared by the services and the storage backends.

use std::fmt;

/// Entity kinds that can be referenced by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Film,
    User,
    Genre,
    Rating,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Film => "film",
            Entity::User => "user",
            Entity::Genre => "genre",
            Entity::Rating => "rating",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Input violates a business rule. Always raised before anything is written.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An endpoint id does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: Entity, id: i64 },

    /// Anything else (storage unavailable, driver errors, ...).
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    pub fn not_found(entity: Entity, id: impl Into<i64>) -> Self {
        CoreError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }
}

impl From<sqlx::Error> for CoreError {
    fn from(err: sqlx::Error) -> Self {
        CoreError::Storage(err.into())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
