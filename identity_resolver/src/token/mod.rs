mod errors;
mod traits;
mod types;

pub use errors::TokenError;
pub use traits::TokenIssuer;
pub use types::{IssuedToken, SessionBundle};
