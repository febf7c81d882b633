//! identity_resolver - Multi-method identity resolution and account linking
//!
//! This crate maps successful authentication events from any number of pluggable
//! authentication methods onto a single logical account. It provides:
//! - `method`: the auth method capability and the immutable name-keyed registry
//! - `account`: the account entity and the repository contract it is persisted through
//! - `token`: the token issuer contract and the session bundle returned on login
//! - `resolution`: the service orchestrating login, link, unlink and lookup
//!
//! Credential validation, persistence and token construction are left to the
//! collaborators plugged into [`IdentityService`].

mod account;
mod config;
mod context;
mod method;
mod resolution;
mod token;


pub use account::{Account, AccountRepository, InMemoryAccountStore, RepositoryError};
pub use config::ServiceConfig;
pub use context::RequestContext;
pub use method::{
    AuthArgs, AuthMethod, AuthMethodRegistry, AuthMethodRegistryBuilder, AuthRecord, MethodError,
};
pub use resolution::{CollaboratorFault, IdentityService, ResolutionError, Stage};
pub use token::{IssuedToken, SessionBundle, TokenError, TokenIssuer};
