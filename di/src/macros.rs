//! Public macros for ergonomic capability keys.

/// Builds a [`CapabilityKey`](crate::CapabilityKey) for a concrete type or a
/// trait object, optionally named.
///
/// This is the intended way to spell out dependency lists at registration:
/// the `trait` arms construct the `dyn Trait` key without the call site
/// writing `dyn` itself.
///
/// # Examples
///
/// ```
/// use weft_di::capability;
///
/// trait Loader {
///   fn load(&self) -> Vec<String>;
/// }
///
/// let unnamed = capability!(String);
/// let named = capability!(String, "greeting");
/// let by_trait = capability!(trait Loader);
/// let named_trait = capability!(trait Loader, "csv");
///
/// assert_eq!(named.name(), Some("greeting"));
/// assert_eq!(by_trait.name(), None);
/// assert_ne!(unnamed, named);
/// assert_ne!(by_trait, named_trait);
/// ```
#[macro_export]
macro_rules! capability {
  // Trait arms first: `trait` is a keyword and would not parse as `:ty`.
  (trait $trait_ident:ident, $name:expr) => {
    $crate::CapabilityKey::named::<dyn $trait_ident>($name)
  };
  (trait $trait_ident:ident) => {
    $crate::CapabilityKey::of::<dyn $trait_ident>()
  };
  ($type:ty, $name:expr) => {
    $crate::CapabilityKey::named::<$type>($name)
  };
  ($type:ty) => {
    $crate::CapabilityKey::of::<$type>()
  };
}
