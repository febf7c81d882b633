use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::method::AuthRecord;

/// Durable identity record a caller authenticates into
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    /// Unique, immutable account identifier (UUID v4)
    pub id: String,
    /// When the account was first created
    pub registered_at: DateTime<Utc>,
    /// Method name -> record returned by that method's validator
    #[serde(default)]
    pub auth_data: BTreeMap<String, AuthRecord>,
}

impl Account {
    /// Create an account bound to the method that authenticated it
    pub fn new(method: impl Into<String>, record: AuthRecord) -> Self {
        let mut auth_data = BTreeMap::new();
        auth_data.insert(method.into(), record);
        Self {
            id: Uuid::new_v4().to_string(),
            registered_at: Utc::now(),
            auth_data,
        }
    }

    pub fn binding(&self, method: &str) -> Option<&AuthRecord> {
        self.auth_data.get(method)
    }

    pub fn has_binding(&self, method: &str) -> bool {
        self.auth_data.contains_key(method)
    }

    /// Set or overwrite the binding for `method`
    pub fn bind(&mut self, method: impl Into<String>, record: AuthRecord) -> Option<AuthRecord> {
        self.auth_data.insert(method.into(), record)
    }

    /// Remove the binding for `method`, if any
    pub fn unbind(&mut self, method: &str) -> Option<AuthRecord> {
        self.auth_data.remove(method)
    }

    /// Bound method names in order
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.auth_data.keys().map(String::as_str)
    }
}
