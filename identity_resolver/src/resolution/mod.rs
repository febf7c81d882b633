//! Identity resolution module
//!
//! This module maps proven (method, external id) pairs onto accounts and
//! coordinates attaching and detaching auth methods. It is the main entry point
//! of the crate.
//!
//! The module is divided into several submodules:
//! - `errors`: Error taxonomy returned to callers
//! - `service`: The service itself, account lookup and shared helpers
//! - `login`: Find-or-create on successful authentication
//! - `linking`: Link and unlink of auth methods on an existing account

mod errors;
mod linking;
mod login;
mod service;

pub use errors::{CollaboratorFault, ResolutionError, Stage};
pub use service::IdentityService;
