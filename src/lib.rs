pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::Services;
pub use domain::model::{Film, FilmDraft, Genre, Rating, User, UserDraft};
pub use domain::{CoreError, CoreResult, Entity};
pub use infra::config::Config;
pub use storage::{MemoryStorage, PgStorage, Storage};
