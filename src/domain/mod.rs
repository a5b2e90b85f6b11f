pub mod error;
pub mod model;
pub mod ranking;

pub use error::{CoreError, CoreResult, Entity};
