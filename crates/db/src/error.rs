use thiserror::Error;

/// Outcome of a storage call that did not produce a value.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A keyed lookup matched no row.
    #[error("record not found")]
    NotFound,

    /// The driver or the database rejected the statement.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}
