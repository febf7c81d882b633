use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque proof arguments handed to an auth method (credentials, codes, tokens...)
pub type AuthArgs = serde_json::Map<String, Value>;

/// Result of validating proof arguments, stored verbatim as the method binding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthRecord {
    /// Whether the proof was accepted
    pub validated: bool,
    /// Stable identifier of the principal in the method's upstream system
    pub external_id: String,
    /// Provider-defined data (token expiry, profile fields, ...)
    #[serde(default)]
    pub payload: Value,
}

impl AuthRecord {
    /// An accepted proof for `external_id`
    pub fn validated(external_id: impl Into<String>, payload: Value) -> Self {
        Self {
            validated: true,
            external_id: external_id.into(),
            payload,
        }
    }

    /// A rejected proof. The external id may be empty if the method could not derive one.
    pub fn rejected(external_id: impl Into<String>) -> Self {
        Self {
            validated: false,
            external_id: external_id.into(),
            payload: Value::Null,
        }
    }
}
