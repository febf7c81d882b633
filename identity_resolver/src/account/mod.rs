mod errors;
mod store;
mod types;

pub use errors::RepositoryError;
pub use store::{AccountRepository, InMemoryAccountStore};
pub use types::Account;
