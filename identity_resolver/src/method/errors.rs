use thiserror::Error;

/// Faults raised by an auth method while checking proof arguments.
///
/// A proof that is merely wrong is not a fault: validators report it through
/// [`AuthRecord::validated`](super::AuthRecord) instead.
#[derive(Clone, Error, Debug)]
pub enum MethodError {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Provider error: {0}")]
    Provider(String),
}

impl From<serde_json::Error> for MethodError {
    fn from(err: serde_json::Error) -> Self {
        MethodError::InvalidArgs(err.to_string())
    }
}
