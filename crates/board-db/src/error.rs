use thiserror::Error;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("message {0} not found")]
    NotFound(i64),

    #[error("invalid message: {0}")]
    Validation(String),

    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("database lock poisoned")]
    LockPoisoned,
}
