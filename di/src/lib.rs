//! # Weft DI
//!
//! A thread-safe dependency injection container for Rust with declared
//! dependencies, lifecycle management, scopes and cycle detection.
//!
//! Weft DI manages the object graph of an application. Providers are
//! registered for abstract capabilities — usually trait objects — together
//! with the ordered list of capabilities their factory consumes; resolution
//! walks that graph depth-first, builds every transitive dependency, and
//! hands each factory its arguments in declaration order.
//!
//! ## Core Concepts
//!
//! - **Capability**: an abstract role a component needs, identified by a
//!   [`CapabilityKey`] (a type, optionally named), decoupled from any
//!   concrete implementation.
//! - **Provider**: the registered recipe for building a capability — a
//!   factory, its declared dependencies, and a [`Lifecycle`].
//! - **Lifecycle**: `Transient` builds a fresh instance per resolution;
//!   `Singleton` builds once and caches for the life of the resolver.
//! - **Container**: an explicit value pairing a [`Registry`] with a
//!   [`Resolver`]. There is no global container; wire one at startup and
//!   pass it to whatever needs it.
//! - **Scope**: a child container sharing the registry but caching its own
//!   singletons, for request-style boundaries.
//!
//! ## Quick Start
//!
//! ```
//! use weft_di::{capability, Container, Lifecycle};
//! use std::sync::Arc;
//!
//! // Define a trait and a concrete implementation.
//! trait Greeter: Send + Sync {
//!   fn greet(&self) -> String;
//! }
//!
//! struct EnglishGreeter {
//!   message: String,
//! }
//!
//! impl Greeter for EnglishGreeter {
//!   fn greet(&self) -> String {
//!     self.message.clone()
//!   }
//! }
//!
//! let container = Container::new();
//!
//! // Register a plain value.
//! container.register_instance(Some("greeting_message"), String::from("Hello, World!"));
//!
//! // Register a service against its trait. The container resolves the
//! // declared dependencies and hands them to the factory in order.
//! container.register_trait::<dyn Greeter, _>(
//!   None,
//!   Lifecycle::Singleton,
//!   vec![capability!(String, "greeting_message")],
//!   |mut deps| {
//!     let message = deps.take::<String>()?;
//!     Ok(Arc::new(EnglishGreeter {
//!       message: (*message).clone(),
//!     }))
//!   },
//! );
//!
//! // In another part of the application, resolve the service by its trait.
//! let greeter = container.resolve::<dyn Greeter>(None)?;
//! assert_eq!(greeter.greet(), "Hello, World!");
//! # Ok::<(), weft_di::ResolveError>(())
//! ```

mod container;
mod core;
mod error;
#[cfg(feature = "local")]
mod local_container;
mod macros;
mod registry;
mod resolver;

pub use container::Container;
pub use self::core::{
  BoxError, CapabilityKey, Dependencies, DependencyError, Instance, Lifecycle, Provider,
};
pub use error::ResolveError;
#[cfg(feature = "local")]
pub use local_container::{LocalContainer, LocalDependencies};
pub use registry::Registry;
pub use resolver::Resolver;
