//! Error types returned by the identity resolution service

use std::fmt;

use thiserror::Error;

use crate::account::RepositoryError;
use crate::method::MethodError;
use crate::token::TokenError;

/// Step of an operation at which a collaborator failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ValidateAuthData,
    FindUserById,
    FindUserByAuthMethod,
    CreateUser,
    UpdateUser,
    GenerateToken,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            Self::ValidateAuthData => "validate auth data",
            Self::FindUserById => "find user by uuid",
            Self::FindUserByAuthMethod => "find user by auth method and id",
            Self::CreateUser => "create new user",
            Self::UpdateUser => "update user by uuid",
            Self::GenerateToken => "generate token",
        };
        f.write_str(description)
    }
}

/// Underlying failure of a validator, repository or token issuer
#[derive(Clone, Error, Debug)]
pub enum CollaboratorFault {
    #[error("Auth method error: {0}")]
    Method(MethodError),

    #[error("Repository error: {0}")]
    Repository(RepositoryError),

    #[error("Token error: {0}")]
    Token(TokenError),

    /// The request deadline passed while waiting on the collaborator
    #[error("Deadline exceeded")]
    DeadlineExceeded,
}

impl From<MethodError> for CollaboratorFault {
    fn from(err: MethodError) -> Self {
        Self::Method(err)
    }
}

impl From<RepositoryError> for CollaboratorFault {
    fn from(err: RepositoryError) -> Self {
        Self::Repository(err)
    }
}

impl From<TokenError> for CollaboratorFault {
    fn from(err: TokenError) -> Self {
        Self::Token(err)
    }
}

/// Errors returned by [`IdentityService`](super::IdentityService) operations
///
/// Callers are expected to map these onto their own codes: `UserNotFound` to
/// not-found, `InvalidAuthMethod`/`InvalidAuthData` to bad-request,
/// `BindingConflict` to conflict and `Collaborator` to an internal error.
#[derive(Clone, Error, Debug)]
pub enum ResolutionError {
    /// The requested account does not exist
    #[error("user with uuid '{account_id}' not found")]
    UserNotFound { account_id: String },

    /// No auth method is registered under this name
    #[error("auth method '{name}' is not valid")]
    InvalidAuthMethod { name: String },

    /// The auth method rejected the proof
    #[error("auth data is not valid")]
    InvalidAuthData,

    /// Link refused because the pair already belongs to another account
    #[error("auth method '{method}' with id '{external_id}' is already linked to another user")]
    BindingConflict { method: String, external_id: String },

    /// A collaborator failed at the given stage
    #[error("error on {stage}: {source}")]
    Collaborator {
        stage: Stage,
        #[source]
        source: CollaboratorFault,
    },
}

impl ResolutionError {
    /// Log the error and return self
    ///
    /// This method logs the error with appropriate context and returns self,
    /// allowing for method chaining and explicit logging when needed.
    pub fn log(self) -> Self {
        match &self {
            Self::UserNotFound { account_id } => {
                tracing::error!("User not found: {}", account_id)
            }
            Self::InvalidAuthMethod { name } => tracing::error!("Invalid auth method: {}", name),
            Self::InvalidAuthData => tracing::error!("Invalid auth data"),
            Self::BindingConflict {
                method,
                external_id,
            } => tracing::error!("Binding conflict: {}/{}", method, external_id),
            Self::Collaborator { stage, source } => {
                tracing::error!("Error on {}: {}", stage, source)
            }
        }
        self
    }

    /// Wrap a collaborator failure with the stage it happened at, logging it
    pub(crate) fn collaborator(stage: Stage, fault: impl Into<CollaboratorFault>) -> Self {
        Self::Collaborator {
            stage,
            source: fault.into(),
        }
        .log()
    }

    /// Stage of a collaborator failure, `None` for the other kinds
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Collaborator { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound { .. })
    }
}
