//! Name-to-identity registry.
//!
//! One registry exists per process. It is constructed at startup and handed to
//! whatever serves requests; nothing here is global.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::info;

use crate::identity::Identity;

/// Concurrent mapping from identity name to identity.
///
/// Registering an existing name replaces the previous identity.
#[derive(Debug, Default)]
pub struct Registry {
    by_name: DashMap<String, Arc<Identity>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `identity`, overwriting any identity with the same name.
    ///
    /// Crate-private: outside callers register through
    /// `BankService::create_identity`, which rebinds the account as well.
    pub(crate) fn register(&self, identity: Identity) -> Arc<Identity> {
        let identity = Arc::new(identity);
        let previous = self
            .by_name
            .insert(identity.name().to_string(), Arc::clone(&identity));

        if previous.is_some() {
            info!(name = %identity.name(), message_key = "registry.replaced", "Identity re-registered");
        } else {
            info!(name = %identity.name(), message_key = "registry.registered", "User registered successfully");
        }
        identity
    }

    /// Looks up an identity by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Arc<Identity>> {
        self.by_name.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Returns the identity only if `secret` verifies against its credential.
    ///
    /// The map shard is released before hashing starts.
    #[must_use]
    pub fn authenticate(&self, name: &str, secret: &str) -> Option<Arc<Identity>> {
        self.find(name)
            .filter(|identity| identity.verify_secret(secret))
    }

    /// Name-only check used when identities carry no credential.
    #[must_use]
    pub fn authenticate_by_name_only(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of registered identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_then_find() {
        let registry = Registry::new();
        registry.register(Identity::create("Edison", 20, "Male", None).unwrap());

        let found = registry.find("Edison").unwrap();
        assert_eq!(found.age().years(), 20);
        assert!(registry.find("Nobody").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn last_registration_wins() {
        let registry = Registry::new();
        registry.register(Identity::create("A", 20, "Male", None).unwrap());
        registry.register(Identity::create("A", 45, "Female", None).unwrap());

        let found = registry.find("A").unwrap();
        assert_eq!(found.age().years(), 45);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn authenticate_with_secret() {
        let registry = Registry::new();
        registry.register(Identity::create("Ada", 36, "Female", Some("engine")).unwrap());

        assert!(registry.authenticate("Ada", "engine").is_some());
        assert!(registry.authenticate("Ada", "wrong").is_none());
        assert!(registry.authenticate("Bob", "engine").is_none());
    }

    #[test]
    fn authenticate_by_name_only() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        registry.register(Identity::create("Edison", 20, "Male", None).unwrap());

        assert!(registry.authenticate_by_name_only("Edison"));
        assert!(!registry.authenticate_by_name_only("edison"));
    }

    #[test]
    fn registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Registry>();
    }
}
