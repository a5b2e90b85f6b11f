pub mod router;
pub mod types;
pub mod handlers {
    pub mod catalog;
    pub mod common;
    pub mod films;
    pub mod health;
    pub mod users;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
