// di/src/local_container.rs

//! A single-threaded, non-thread-safe rendition of the container.

use crate::core::{key_for, BoxError, CapabilityKey, DependencyError, Lifecycle};
use crate::error::ResolveError;
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

// Payload behind the `dyn Any` is the user-facing `Rc<T>` (or `Rc<dyn Trait>`).
type LocalInstance = Rc<dyn Any>;

// A local, non-thread-safe version of the provider. It uses `Rc` and drops
// every `Send + Sync` bound on factories and payloads.
#[derive(Clone)]
struct LocalProvider {
  factory: Rc<dyn Fn(LocalDependencies) -> Result<LocalInstance, BoxError>>,
  dependencies: Rc<[CapabilityKey]>,
  lifecycle: Lifecycle,
}

/// Ordered cursor over resolved dependencies, the `Rc` counterpart of
/// [`Dependencies`](crate::Dependencies).
pub struct LocalDependencies {
  resolved: Vec<LocalInstance>,
  next: usize,
}

impl LocalDependencies {
  fn new(resolved: Vec<LocalInstance>) -> Self {
    Self { resolved, next: 0 }
  }

  /// Takes the next resolved dependency as an `Rc<T>`, in declaration order.
  pub fn take<T: ?Sized + Any>(&mut self) -> Result<Rc<T>, DependencyError> {
    let index = self.next;
    let instance = self
      .resolved
      .get(index)
      .ok_or(DependencyError::MissingArgument {
        index,
        expected: std::any::type_name::<T>(),
      })?;
    let argument = instance
      .downcast_ref::<Rc<T>>()
      .cloned()
      .ok_or(DependencyError::ArgumentTypeMismatch {
        index,
        expected: std::any::type_name::<T>(),
      })?;
    self.next += 1;
    Ok(argument)
  }

  /// Number of resolved arguments not yet taken.
  pub fn remaining(&self) -> usize {
    self.resolved.len() - self.next
  }

  pub fn is_empty(&self) -> bool {
    self.remaining() == 0
  }
}

/// A single-threaded dependency injection container.
///
/// `LocalContainer` folds registry, resolver and facade into one value backed
/// by a plain `HashMap`, with `Rc` instead of `Arc` for shared ownership. It
/// follows the same resolution contract as [`Container`](crate::Container) —
/// declared dependencies resolved depth-first in declaration order, cycle
/// detection over a per-call path, singleton caching, fail-fast errors — and
/// can additionally hold services that are not `Send` or `Sync`.
///
/// # Note on API
///
/// Registration methods require `&mut self` because the provider map has no
/// interior mutability; resolution takes `&self`.
#[derive(Default)]
pub struct LocalContainer {
  providers: HashMap<CapabilityKey, LocalProvider>,
  cache: RefCell<HashMap<CapabilityKey, LocalInstance>>,
}

impl LocalContainer {
  /// Creates a new, empty `LocalContainer`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- REGISTRATION ---

  /// Registers a factory producing a concrete type `T`.
  pub fn register<T, F>(
    &mut self,
    name: Option<&str>,
    lifecycle: Lifecycle,
    dependencies: Vec<CapabilityKey>,
    factory: F,
  ) where
    T: Any,
    F: Fn(LocalDependencies) -> Result<T, BoxError> + 'static,
  {
    let provider = LocalProvider {
      factory: Rc::new(move |arguments| {
        factory(arguments).map(|value| Rc::new(Rc::new(value)) as LocalInstance)
      }),
      dependencies: dependencies.into(),
      lifecycle,
    };
    self.providers.insert(key_for::<T>(name), provider);
  }

  /// Registers a factory producing a trait object `Rc<I>`.
  pub fn register_trait<I, F>(
    &mut self,
    name: Option<&str>,
    lifecycle: Lifecycle,
    dependencies: Vec<CapabilityKey>,
    factory: F,
  ) where
    I: ?Sized + Any,
    F: Fn(LocalDependencies) -> Result<Rc<I>, BoxError> + 'static,
  {
    let provider = LocalProvider {
      factory: Rc::new(move |arguments| {
        factory(arguments).map(|implementation| Rc::new(implementation) as LocalInstance)
      }),
      dependencies: dependencies.into(),
      lifecycle,
    };
    self.providers.insert(key_for::<I>(name), provider);
  }

  /// Registers an already-built value as a singleton.
  pub fn register_instance<T: Any>(&mut self, name: Option<&str>, value: T) {
    let payload: LocalInstance = Rc::new(Rc::new(value));
    let provider = LocalProvider {
      factory: Rc::new(move |_arguments| Ok(Rc::clone(&payload))),
      dependencies: Vec::new().into(),
      lifecycle: Lifecycle::Singleton,
    };
    self.providers.insert(key_for::<T>(name), provider);
  }

  // --- RESOLUTION ---

  /// Resolves the capability identified by `T` and the optional `name`.
  pub fn resolve<T: ?Sized + Any>(&self, name: Option<&str>) -> Result<Rc<T>, ResolveError> {
    let key = key_for::<T>(name);
    let mut path = Vec::new();
    let instance = self.resolve_key(&key, &mut path)?;
    instance
      .downcast_ref::<Rc<T>>()
      .cloned()
      .ok_or_else(|| ResolveError::CapabilityTypeMismatch {
        key,
        expected: std::any::type_name::<T>(),
      })
  }

  fn resolve_key(
    &self,
    key: &CapabilityKey,
    path: &mut Vec<CapabilityKey>,
  ) -> Result<LocalInstance, ResolveError> {
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

  fn resolve_pushed(
    &self,
    key: &CapabilityKey,
    path: &mut Vec<CapabilityKey>,
  ) -> Result<LocalInstance, ResolveError> {
    if let Some(cached) = self.cache.borrow().get(key).cloned() {
      return Ok(cached);
    }

    let provider = self
      .providers
      .get(key)
      .cloned()
      .ok_or_else(|| ResolveError::Unregistered(key.clone()))?;

    let mut arguments = Vec::with_capacity(provider.dependencies.len());
    for dependency in provider.dependencies.iter() {
      arguments.push(self.resolve_key(dependency, path)?);
    }

    let instance = (provider.factory)(LocalDependencies::new(arguments)).map_err(|source| {
      ResolveError::Factory {
        key: key.clone(),
        source,
      }
    })?;

    if provider.lifecycle == Lifecycle::Singleton {
      self
        .cache
        .borrow_mut()
        .insert(key.clone(), Rc::clone(&instance));
    }

    Ok(instance)
  }
}
