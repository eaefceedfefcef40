use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl From<StoreError> for fcards_core::Error {
    fn from(err: StoreError) -> Self {
        fcards_core::Error::StorageError(err.to_string())
    }
}
