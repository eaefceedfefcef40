use thiserror::Error;

/// All the ways things can go wrong in fcards
///
/// The interaction engine never produces these; they come from the edges
/// (storage, config, startup).
#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage operation failed: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("no questions found in database")]
    NoQuestions,

    #[error("unsupported group: {0}")]
    UnsupportedGroup(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
