use weft_di::{capability, Container, Lifecycle, ResolveError};
use std::error::Error as _;

// Every failure mode surfaces as a `ResolveError` on the top-level resolve
// call; nothing panics and the container stays usable afterwards.

struct UnregisteredService;

struct ServiceA;
struct ServiceB;

struct Flaky;

fn main() {
  let container = Container::new();

  // --- Missing registration ---
  println!("Resolving a service that was never registered...");
  match container.resolve::<UnregisteredService>(None) {
    Ok(_) => panic!("should not have found the service"),
    Err(error) => println!("  -> {error}"),
  }

  // --- Circular dependency ---
  container.register(None, Lifecycle::Singleton, vec![capability!(ServiceB)], |_| {
    Ok(ServiceA)
  });
  container.register(None, Lifecycle::Singleton, vec![capability!(ServiceA)], |_| {
    Ok(ServiceB)
  });

  println!("Resolving a service whose dependencies form a cycle...");
  match container.resolve::<ServiceA>(None) {
    Ok(_) => panic!("the cycle should have been detected"),
    Err(error) => {
      assert!(matches!(error, ResolveError::CircularDependency(_)));
      println!("  -> {error}");
    }
  }

  // --- Factory failure ---
  container.register::<Flaky, _>(None, Lifecycle::Transient, Vec::new(), |_| {
    Err("upstream connection refused".into())
  });

  println!("Resolving a service whose factory fails...");
  match container.resolve::<Flaky>(None) {
    Ok(_) => panic!("the factory should have failed"),
    Err(error) => {
      println!("  -> {error}");
      if let Some(cause) = error.source() {
        println!("     caused by: {cause}");
      }
    }
  }

  // A failed resolution never corrupts the container.
  container.register_instance(None, String::from("still alive"));
  let check = container.resolve::<String>(None).unwrap();
  println!("Container still resolves unrelated capabilities: \"{check}\"");
}
