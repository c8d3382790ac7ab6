use weft_di::{capability, CapabilityKey, Container, Lifecycle, ResolveError};
use std::sync::Arc;

// --- Test Fixtures ---

// The trait must be Send + Sync for the container to accept it.
trait Greeter: Send + Sync {
  fn greet(&self) -> String;
}

struct EnglishGreeter;
impl Greeter for EnglishGreeter {
  fn greet(&self) -> String {
    "Hello!".to_string()
  }
}

// A simple struct for testing.
#[derive(Debug, PartialEq, Eq)]
struct SimpleService {
  id: u32,
}

// --- Basic Tests ---

#[test]
fn test_unnamed_singleton_factory() {
  // Arrange
  let container = Container::new();
  container.register(
    None,
    Lifecycle::Singleton,
    Vec::new(),
    |_| Ok(SimpleService { id: 101 }),
  );

  // Act
  let r1 = container.resolve::<SimpleService>(None).unwrap();
  let r2 = container.resolve::<SimpleService>(None).unwrap();

  // Assert
  assert_eq!(r1.id, 101);
  // Ensure it's a singleton by checking pointer equality.
  assert!(Arc::ptr_eq(&r1, &r2));
}

#[test]
fn test_named_singleton_instance() {
  // Arrange
  let container = Container::new();
  container.register_instance(Some("named_instance"), SimpleService { id: 202 });

  // Act
  let r1 = container.resolve::<SimpleService>(Some("named_instance")).unwrap();
  let r2 = container.resolve::<SimpleService>(Some("named_instance")).unwrap();

  // Assert
  assert_eq!(r1.id, 202);
  assert!(Arc::ptr_eq(&r1, &r2));
}

#[test]
fn test_unnamed_transient_factory() {
  // Arrange
  let container = Container::new();
  container.register(
    None,
    Lifecycle::Transient,
    Vec::new(),
    |_| Ok(SimpleService { id: 303 }),
  );

  // Act
  let r1 = container.resolve::<SimpleService>(None).unwrap();
  let r2 = container.resolve::<SimpleService>(None).unwrap();

  // Assert
  assert_eq!(r1.id, 303);
  assert_eq!(r2.id, 303);
  // Ensure it's a transient by checking the pointers are different.
  assert!(!Arc::ptr_eq(&r1, &r2));
}

#[test]
fn test_unnamed_trait_resolution() {
  // Arrange
  let container = Container::new();
  container.register_trait::<dyn Greeter, _>(None, Lifecycle::Singleton, Vec::new(), |_| {
    Ok(Arc::new(EnglishGreeter))
  });

  // Act
  let greeter = container.resolve::<dyn Greeter>(None).unwrap();

  // Assert
  assert_eq!(greeter.greet(), "Hello!");
}

#[test]
fn test_named_trait_resolution() {
  // Arrange
  struct GermanGreeter;
  impl Greeter for GermanGreeter {
    fn greet(&self) -> String {
      "Hallo!".to_string()
    }
  }
  let container = Container::new();
  container.register_trait::<dyn Greeter, _>(
    Some("german"),
    Lifecycle::Singleton,
    Vec::new(),
    |_| Ok(Arc::new(GermanGreeter)),
  );

  // Act
  let greeter = container.resolve::<dyn Greeter>(Some("german")).unwrap();

  // Assert
  assert_eq!(greeter.greet(), "Hallo!");
}

#[test]
fn test_missing_concrete_service_is_an_error() {
  #[derive(Debug)]
  struct MissingService;

  let container = Container::new();
  let result = container.resolve::<MissingService>(None);

  // No partial construction, just the error naming the capability.
  let error = result.unwrap_err();
  assert!(matches!(error, ResolveError::Unregistered(_)));
  assert!(error.to_string().contains("MissingService"));
}

#[test]
fn test_missing_trait_service_is_an_error() {
  trait MissingTrait: Send + Sync {}

  let container = Container::new();
  let result = container.resolve::<dyn MissingTrait>(None);

  assert!(matches!(result, Err(ResolveError::Unregistered(_))));
}

#[test]
fn test_capability_macro_builds_matching_keys() {
  assert_eq!(capability!(SimpleService), CapabilityKey::of::<SimpleService>());
  assert_eq!(
    capability!(SimpleService, "primary"),
    CapabilityKey::named::<SimpleService>("primary")
  );
  assert_eq!(capability!(trait Greeter), CapabilityKey::of::<dyn Greeter>());
  assert_eq!(
    capability!(trait Greeter, "german"),
    CapabilityKey::named::<dyn Greeter>("german")
  );

  // Named and unnamed keys for the same type are distinct registrations.
  assert_ne!(capability!(SimpleService), capability!(SimpleService, "primary"));
}

#[test]
fn test_registry_introspection() {
  let container = Container::new();
  assert!(container.registry().is_empty());

  container.register_instance(None, SimpleService { id: 1 });
  container.register_instance(Some("second"), SimpleService { id: 2 });

  assert_eq!(container.registry().len(), 2);
  assert!(container.registry().contains(&capability!(SimpleService)));
  assert!(container.registry().contains(&capability!(SimpleService, "second")));
  assert!(!container.registry().contains(&capability!(SimpleService, "third")));
}
