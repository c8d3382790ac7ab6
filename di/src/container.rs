//! The typed facade over a registry/resolver pair.

use crate::core::{key_for, BoxError, CapabilityKey, Dependencies, Instance, Lifecycle, Provider};
use crate::error::ResolveError;
use crate::registry::Registry;
use crate::resolver::Resolver;
use std::any::Any;
use std::sync::Arc;

/// The dependency injection container.
///
/// A `Container` pairs a [`Registry`] of providers with a [`Resolver`] that
/// builds instances on demand, and puts a typed API on top of both. It is the
/// surface application bootstrap code is expected to use; the registry and
/// resolver stay reachable for callers that need the untyped layer.
///
/// Containers are explicit values: create one, wire it, pass it by reference
/// to whatever needs to resolve capabilities, and drop it to release every
/// cached singleton. There is deliberately no process-wide container.
pub struct Container {
  registry: Arc<Registry>,
  resolver: Resolver,
}

impl Default for Container {
  fn default() -> Self {
    Self::new()
  }
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    let registry = Arc::new(Registry::new());
    let resolver = Resolver::new(Arc::clone(&registry));
    Self { registry, resolver }
  }

  // --- REGISTRATION ---

  /// Registers a factory producing a concrete type `T`.
  ///
  /// `dependencies` lists the capabilities the factory consumes, in the order
  /// [`Dependencies::take`] will yield them. The constructed value is wrapped
  /// in an `Arc` by the container. Registering a key twice replaces the
  /// provider; the last registration wins.
  pub fn register<T, F>(
    &self,
    name: Option<&str>,
    lifecycle: Lifecycle,
    dependencies: Vec<CapabilityKey>,
    factory: F,
  ) where
    T: Any + Send + Sync,
    F: Fn(Dependencies) -> Result<T, BoxError> + Send + Sync + 'static,
  {
    let provider = Provider::new(lifecycle, dependencies, move |arguments| {
      factory(arguments).map(|value| Arc::new(Arc::new(value)) as Instance)
    });
    self.registry.register(key_for::<T>(name), provider);
  }

  /// Registers a factory producing a trait object `Arc<I>`.
  ///
  /// The capability key is the trait itself, so the service is resolved as
  /// `Arc<dyn Trait>` without the call site naming a concrete implementation:
  /// `container.register_trait::<dyn Loader, _>(..)`.
  pub fn register_trait<I, F>(
    &self,
    name: Option<&str>,
    lifecycle: Lifecycle,
    dependencies: Vec<CapabilityKey>,
    factory: F,
  ) where
    I: ?Sized + Any + Send + Sync,
    F: Fn(Dependencies) -> Result<Arc<I>, BoxError> + Send + Sync + 'static,
  {
    let provider = Provider::new(lifecycle, dependencies, move |arguments| {
      factory(arguments).map(|implementation| Arc::new(implementation) as Instance)
    });
    self.registry.register(key_for::<I>(name), provider);
  }

  /// Registers an already-built value as a singleton.
  pub fn register_instance<T: Any + Send + Sync>(&self, name: Option<&str>, value: T) {
    let payload: Instance = Arc::new(Arc::new(value));
    let provider = Provider::new(Lifecycle::Singleton, Vec::new(), move |_arguments| {
      Ok(Arc::clone(&payload))
    });
    self.registry.register(key_for::<T>(name), provider);
  }

  // --- RESOLUTION ---

  /// Resolves the capability identified by `T` and the optional `name`.
  ///
  /// Fails fast: a missing registration, a cycle, or a factory error anywhere
  /// in the dependency graph aborts the whole call and leaves the container
  /// usable for unrelated resolutions.
  pub fn resolve<T: ?Sized + Any + Send + Sync>(
    &self,
    name: Option<&str>,
  ) -> Result<Arc<T>, ResolveError> {
    self.resolve_key(&key_for::<T>(name))
  }

  /// Resolves a pre-built [`CapabilityKey`], downcasting to `Arc<T>`.
  pub fn resolve_key<T: ?Sized + Any + Send + Sync>(
    &self,
    key: &CapabilityKey,
  ) -> Result<Arc<T>, ResolveError> {
    let instance = self.resolver.resolve(key)?;
    instance
      .downcast_ref::<Arc<T>>()
      .cloned()
      .ok_or_else(|| ResolveError::CapabilityTypeMismatch {
        key: key.clone(),
        expected: std::any::type_name::<T>(),
      })
  }

  // --- SCOPES & ACCESS ---

  /// Creates a child container sharing this container's registry with a
  /// fresh singleton cache.
  ///
  /// Registrations made through either container are visible to both;
  /// singletons are not. A scope models the per-request boundary of an outer
  /// framework: drop it and its request-scoped singletons go with it.
  pub fn scope(&self) -> Container {
    Container {
      registry: Arc::clone(&self.registry),
      resolver: self.resolver.scope(),
    }
  }

  /// The underlying registry, for untyped registration.
  pub fn registry(&self) -> &Arc<Registry> {
    &self.registry
  }

  /// The underlying resolver, for untyped resolution.
  pub fn resolver(&self) -> &Resolver {
    &self.resolver
  }
}
