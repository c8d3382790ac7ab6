//! Depth-first capability resolution with lifecycle bookkeeping.

use crate::core::{CapabilityKey, Dependencies, Instance, Lifecycle, Provider};
use crate::error::ResolveError;
use crate::registry::Registry;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Resolves capabilities against a shared [`Registry`].
///
/// The resolver owns the singleton cache: entries are created on the first
/// successful resolution of a `Singleton` capability and never evicted while
/// the resolver is alive. Dropping the resolver releases every cached
/// instance; the registry it points at is unaffected.
///
/// Resolution is a pure depth-first traversal of the dependency graph the
/// registered providers imply. Each top-level [`resolve`](Resolver::resolve)
/// call carries its own resolution path, so concurrent calls never observe
/// each other's in-progress state.
pub struct Resolver {
  registry: Arc<Registry>,
  cache: DashMap<CapabilityKey, Arc<OnceCell<Instance>>>,
}

impl Resolver {
  /// Creates a resolver over `registry` with an empty singleton cache.
  pub fn new(registry: Arc<Registry>) -> Self {
    Self {
      registry,
      cache: DashMap::new(),
    }
  }

  /// The registry this resolver resolves against.
  pub fn registry(&self) -> &Arc<Registry> {
    &self.registry
  }

  /// Creates a child resolver sharing this resolver's registry but holding
  /// its own, empty singleton cache.
  ///
  /// This is how per-request resolution is modeled: singletons resolved
  /// through the child live exactly as long as the child does and never leak
  /// into the parent's cache.
  pub fn scope(&self) -> Resolver {
    Resolver::new(Arc::clone(&self.registry))
  }

  /// Resolves `key`, recursively building its declared dependencies.
  ///
  /// Returns the type-erased instance; [`Container`](crate::Container) is the
  /// typed surface over this call.
  pub fn resolve(&self, key: &CapabilityKey) -> Result<Instance, ResolveError> {
    let mut path = Vec::new();
    self.resolve_key(key, &mut path)
  }

  fn resolve_key(
    &self,
    key: &CapabilityKey,
    path: &mut Vec<CapabilityKey>,
  ) -> Result<Instance, ResolveError> {
    if let Some(position) = path.iter().position(|visited| visited == key) {
      let mut cycle = path[position..].to_vec();
      cycle.push(key.clone());
      return Err(ResolveError::CircularDependency(cycle));
    }

    path.push(key.clone());
    let resolved = self.resolve_pushed(key, path);
    path.pop();
    resolved
  }

  // `key` is on the path here; the caller owns the matching pop.
  fn resolve_pushed(
    &self,
    key: &CapabilityKey,
    path: &mut Vec<CapabilityKey>,
  ) -> Result<Instance, ResolveError> {
    if let Some(cached) = self.cached(key) {
      log::trace!("singleton cache hit for {key}");
      return Ok(cached);
    }

    let provider = self.registry.lookup(key)?;

    match provider.lifecycle() {
      Lifecycle::Transient => self.build(key, &provider, path),
      Lifecycle::Singleton => {
        let cell = self.cell(key);
        let instance = cell.get_or_try_init(|| self.build(key, &provider, path))?;
        Ok(Arc::clone(instance))
      }
    }
  }

  fn cached(&self, key: &CapabilityKey) -> Option<Instance> {
    let cell = Arc::clone(self.cache.get(key)?.value());
    cell.get().cloned()
  }

  // Fetches the cell guarding `key`'s singleton slot. The shard lock is
  // released before the factory runs; the cell itself serializes first-builds
  // so a singleton factory executes at most once even under contention.
  fn cell(&self, key: &CapabilityKey) -> Arc<OnceCell<Instance>> {
    Arc::clone(self.cache.entry(key.clone()).or_default().value())
  }

  fn build(
    &self,
    key: &CapabilityKey,
    provider: &Provider,
    path: &mut Vec<CapabilityKey>,
  ) -> Result<Instance, ResolveError> {
    let mut arguments = Vec::with_capacity(provider.dependencies().len());
    for dependency in provider.dependencies() {
      arguments.push(self.resolve_key(dependency, path)?);
    }

    log::trace!("building {key}");
    provider
      .invoke(Dependencies::new(arguments))
      .map_err(|source| ResolveError::Factory {
        key: key.clone(),
        source,
      })
  }
}
