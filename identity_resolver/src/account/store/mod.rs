mod memory;
mod traits;

pub use memory::InMemoryAccountStore;
pub use traits::AccountRepository;
