//! The provider registry: capability keys mapped to their build recipes.

use crate::core::{CapabilityKey, Provider};
use crate::error::ResolveError;
use dashmap::DashMap;

/// Thread-safe store of [`Provider`]s, keyed by [`CapabilityKey`].
///
/// Registration is insert-or-replace: the last registration for a key wins.
/// Replacing a provider never touches a resolver's singleton cache, so an
/// already-built singleton for that key stays live until its resolver is
/// dropped; the new provider only applies to future first-builds (fresh
/// resolvers and scopes).
#[derive(Default)]
pub struct Registry {
  providers: DashMap<CapabilityKey, Provider>,
}

impl Registry {
  /// Creates a new, empty `Registry`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds or replaces the provider for `key`.
  pub fn register(&self, key: CapabilityKey, provider: Provider) {
    log::debug!("registered {key} as {:?}", provider.lifecycle());
    self.providers.insert(key, provider);
  }

  /// Returns a handle to the provider registered for `key`.
  pub fn lookup(&self, key: &CapabilityKey) -> Result<Provider, ResolveError> {
    self
      .providers
      .get(key)
      .map(|entry| entry.value().clone())
      .ok_or_else(|| ResolveError::Unregistered(key.clone()))
  }

  /// Whether a provider is registered for `key`.
  pub fn contains(&self, key: &CapabilityKey) -> bool {
    self.providers.contains_key(key)
  }

  /// Number of registered providers.
  pub fn len(&self) -> usize {
    self.providers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.providers.is_empty()
  }
}
