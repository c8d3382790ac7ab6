//! Error types surfaced by capability resolution.

use crate::core::{BoxError, CapabilityKey};
use thiserror::Error;

/// Errors returned by `resolve`.
///
/// Every variant aborts the whole top-level resolve call: there is no partial
/// wiring and no fallback substitution. Side effects of factories that ran
/// before the failure are not rolled back.
#[derive(Debug, Error)]
pub enum ResolveError {
  /// No provider has been registered for the requested capability.
  #[error("no provider registered for capability {0}")]
  Unregistered(CapabilityKey),

  /// A capability was re-encountered while it was already being resolved.
  ///
  /// The contained path runs from the first occurrence of the repeated key
  /// back to itself, in resolution order, so the full cycle can be reported.
  #[error("circular dependency detected: {}", render_cycle(.0))]
  CircularDependency(Vec<CapabilityKey>),

  /// The provider's factory failed while constructing the instance. The key
  /// being built is attached for diagnosability; the cause is the source.
  #[error("factory for capability {key} failed")]
  Factory {
    key: CapabilityKey,
    #[source]
    source: BoxError,
  },

  /// The instance registered under the key is not of the requested type.
  ///
  /// Only reachable through hand-built providers registered via the raw
  /// registry; the typed registration methods keep key and payload in sync.
  #[error("capability {key} did not resolve to the requested type {expected}")]
  CapabilityTypeMismatch {
    key: CapabilityKey,
    expected: &'static str,
  },
}

fn render_cycle(cycle: &[CapabilityKey]) -> String {
  cycle
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join(" -> ")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cycle_rendering_names_every_key() {
    struct A;
    struct B;
    let cycle = vec![
      CapabilityKey::of::<A>(),
      CapabilityKey::of::<B>(),
      CapabilityKey::of::<A>(),
    ];
    let rendered = ResolveError::CircularDependency(cycle).to_string();

    assert!(rendered.contains("circular dependency"));
    assert_eq!(rendered.matches(" -> ").count(), 2);
  }
}
