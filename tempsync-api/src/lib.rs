pub mod error;
pub mod models;
pub mod uuid;

pub use error::ReadingError;
