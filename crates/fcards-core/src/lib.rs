// Core types shared by the store, the TUI and the binary
pub mod config;
pub mod error;
pub mod models;
pub mod source;

pub use config::Config;
pub use error::Error;
pub use models::{CategoryGroup, Question};
pub use source::QuestionSource;

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
