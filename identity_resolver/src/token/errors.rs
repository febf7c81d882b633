use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum TokenError {
    #[error("Token issuance error: {0}")]
    Issuance(String),
}
