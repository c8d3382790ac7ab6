//! Core data types shared by the registry and the resolver.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Boxed error type returned by provider factories.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A type-erased, shareable instance produced by a provider.
///
/// The payload behind the `dyn Any` is always the user-facing `Arc<T>`
/// (or `Arc<dyn Trait>` for trait registrations), so the typed facade can
/// hand out clones without re-wrapping.
pub type Instance = Arc<dyn Any + Send + Sync>;

pub(crate) type Factory = Arc<dyn Fn(Dependencies) -> Result<Instance, BoxError> + Send + Sync>;

/// Identifies an abstract capability within a [`Registry`](crate::Registry).
///
/// A key is the `TypeId` of the capability's type — usually a trait object
/// like `dyn DataLoader` — plus an optional name so several registrations of
/// the same type can coexist. Keys are immutable once created.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CapabilityKey {
  type_id: TypeId,
  type_name: &'static str,
  name: Option<String>,
}

impl CapabilityKey {
  /// Key for the capability type `T`, unnamed.
  pub fn of<T: ?Sized + Any>() -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      type_name: std::any::type_name::<T>(),
      name: None,
    }
  }

  /// Key for the capability type `T` under an explicit name.
  pub fn named<T: ?Sized + Any>(name: &str) -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      type_name: std::any::type_name::<T>(),
      name: Some(name.to_owned()),
    }
  }

  /// The registration name, if any.
  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  /// The type name of the capability, as produced by `std::any::type_name`.
  pub fn type_name(&self) -> &'static str {
    self.type_name
  }
}

pub(crate) fn key_for<T: ?Sized + Any>(name: Option<&str>) -> CapabilityKey {
  match name {
    Some(name) => CapabilityKey::named::<T>(name),
    None => CapabilityKey::of::<T>(),
  }
}

impl fmt::Debug for CapabilityKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.name {
      Some(name) => write!(f, "Key({}, \"{}\")", self.type_name, name),
      None => write!(f, "Key({})", self.type_name),
    }
  }
}

impl fmt::Display for CapabilityKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.name {
      Some(name) => write!(f, "{} (\"{}\")", self.type_name, name),
      None => f.write_str(self.type_name),
    }
  }
}

/// Policy governing instance reuse across resolutions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
  /// A new instance is built on every resolution.
  Transient,
  /// The first resolution builds the instance; later resolutions through the
  /// same resolver return the cached one.
  Singleton,
}

/// The registered recipe for building a capability: a factory, the ordered
/// list of capabilities the factory consumes, and a [`Lifecycle`].
///
/// Providers are cheap to clone; the resolver clones the handle out of the
/// registry so no registry lock is held while a factory runs.
#[derive(Clone)]
pub struct Provider {
  factory: Factory,
  dependencies: Arc<[CapabilityKey]>,
  lifecycle: Lifecycle,
}

impl Provider {
  /// Creates a provider from its parts.
  ///
  /// The factory receives the resolved dependencies as a [`Dependencies`]
  /// cursor, in the same order as `dependencies`, and must return the
  /// type-erased instance. The typed registration methods on
  /// [`Container`](crate::Container) build this wrapper for you; reach for
  /// `Provider::new` only when registering through the raw registry.
  pub fn new(
    lifecycle: Lifecycle,
    dependencies: Vec<CapabilityKey>,
    factory: impl Fn(Dependencies) -> Result<Instance, BoxError> + Send + Sync + 'static,
  ) -> Self {
    Self {
      factory: Arc::new(factory),
      dependencies: dependencies.into(),
      lifecycle,
    }
  }

  /// The provider's declared lifecycle.
  pub fn lifecycle(&self) -> Lifecycle {
    self.lifecycle
  }

  /// The capabilities the factory consumes, in declaration order.
  pub fn dependencies(&self) -> &[CapabilityKey] {
    &self.dependencies
  }

  pub(crate) fn invoke(&self, arguments: Dependencies) -> Result<Instance, BoxError> {
    (self.factory)(arguments)
  }
}

impl fmt::Debug for Provider {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Provider({:?}, {} dependencies)",
      self.lifecycle,
      self.dependencies.len()
    )
  }
}

/// Ordered cursor over the resolved dependencies handed to a factory.
///
/// Each call to [`take`](Dependencies::take) yields the next argument in the
/// order the dependency keys were declared at registration. Taking past the
/// end, or with the wrong type, returns a [`DependencyError`]; propagating it
/// with `?` surfaces as a factory construction failure on the resolve call.
pub struct Dependencies {
  resolved: Vec<Instance>,
  next: usize,
}

impl Dependencies {
  pub(crate) fn new(resolved: Vec<Instance>) -> Self {
    Self { resolved, next: 0 }
  }

  /// Takes the next resolved dependency as an `Arc<T>`.
  pub fn take<T: ?Sized + Any + Send + Sync>(&mut self) -> Result<Arc<T>, DependencyError> {
    let index = self.next;
    let instance = self
      .resolved
      .get(index)
      .ok_or(DependencyError::MissingArgument {
        index,
        expected: std::any::type_name::<T>(),
      })?;
    let argument = instance
      .downcast_ref::<Arc<T>>()
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

  /// Whether every resolved argument has been taken.
  pub fn is_empty(&self) -> bool {
    self.remaining() == 0
  }
}

/// Errors from consuming a [`Dependencies`] cursor inside a factory.
#[derive(Debug, thiserror::Error)]
pub enum DependencyError {
  /// The factory asked for more arguments than it declared dependencies.
  #[error("factory requested a {expected} argument at position {index}, but no resolved dependency remains")]
  MissingArgument { index: usize, expected: &'static str },

  /// The resolved dependency at this position is not of the requested type.
  #[error("resolved dependency at position {index} is not a {expected}")]
  ArgumentTypeMismatch { index: usize, expected: &'static str },
}
