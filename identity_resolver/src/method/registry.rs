use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::traits::AuthMethod;

/// Immutable, name-keyed set of auth methods
///
/// Built once at startup through [`AuthMethodRegistryBuilder`]; there is no way to
/// add, remove or replace a method afterwards, so it can be shared freely.
#[derive(Clone, Default)]
pub struct AuthMethodRegistry {
    methods: Arc<HashMap<String, Arc<dyn AuthMethod>>>,
}

impl AuthMethodRegistry {
    pub fn builder() -> AuthMethodRegistryBuilder {
        AuthMethodRegistryBuilder::default()
    }

    /// Look up the method registered under `name`
    pub fn get(&self, name: &str) -> Option<Arc<dyn AuthMethod>> {
        self.methods.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Registered method names, sorted
    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl fmt::Debug for AuthMethodRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthMethodRegistry")
            .field("methods", &self.method_names())
            .finish()
    }
}

/// Additive configuration step for [`AuthMethodRegistry`]
#[derive(Default)]
pub struct AuthMethodRegistryBuilder {
    methods: HashMap<String, Arc<dyn AuthMethod>>,
}

impl AuthMethodRegistryBuilder {
    /// Register `method` under `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered. Two providers sharing a name is a
    /// configuration error and must stop startup rather than shadow each other.
    pub fn with_method(mut self, name: impl Into<String>, method: impl AuthMethod) -> Self {
        self.insert(name.into(), Arc::new(method));
        self
    }

    /// Same as [`with_method`](Self::with_method) for an already shared method
    pub fn with_shared_method(
        mut self,
        name: impl Into<String>,
        method: Arc<dyn AuthMethod>,
    ) -> Self {
        self.insert(name.into(), method);
        self
    }

    fn insert(&mut self, name: String, method: Arc<dyn AuthMethod>) {
        if self.methods.contains_key(&name) {
            panic!("duplicate auth method registered: {name}");
        }
        tracing::debug!("Registering auth method: {}", name);
        self.methods.insert(name, method);
    }

    pub fn build(self) -> AuthMethodRegistry {
        tracing::info!("Auth method registry built with {} method(s)", self.methods.len());
        AuthMethodRegistry {
            methods: Arc::new(self.methods),
        }
    }
}
