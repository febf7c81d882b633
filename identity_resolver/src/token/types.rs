use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credentials produced by a [`TokenIssuer`](super::TokenIssuer)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub refresh_token: Option<String>,
}

/// Returned by a successful login. Never persisted by this crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionBundle {
    pub account_id: String,
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl SessionBundle {
    pub(crate) fn new(account_id: String, token: IssuedToken) -> Self {
        Self {
            account_id,
            access_token: token.access_token,
            expires_at: token.expires_at,
            refresh_token: token.refresh_token,
        }
    }
}
