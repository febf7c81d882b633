mod errors;
mod registry;
mod traits;
mod types;

pub use errors::MethodError;
pub use registry::{AuthMethodRegistry, AuthMethodRegistryBuilder};
pub use traits::AuthMethod;
pub use types::{AuthArgs, AuthRecord};
