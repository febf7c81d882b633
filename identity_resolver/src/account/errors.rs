use thiserror::Error;

/// Faults reported by an [`AccountRepository`](super::AccountRepository)
#[derive(Clone, Error, Debug, PartialEq)]
pub enum RepositoryError {
    /// The (method, external id) pair is already bound to another account
    #[error("Conflict: {method}/{external_id} is already bound")]
    Conflict { method: String, external_id: String },

    /// `update` targeted an id the store does not hold
    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::InvalidData(err.to_string())
    }
}
