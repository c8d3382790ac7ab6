use weft_di::{capability, Lifecycle, LocalContainer, ResolveError};
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn test_local_singleton() {
  let mut container = LocalContainer::new();
  container.register(None, Lifecycle::Singleton, Vec::new(), |_| {
    Ok("hello".to_string())
  });

  let r1 = container.resolve::<String>(None).unwrap();
  let r2 = container.resolve::<String>(None).unwrap();

  assert_eq!(*r1, "hello");
  // Ensure it's a singleton by checking pointer equality.
  assert!(Rc::ptr_eq(&r1, &r2));
}

#[test]
fn test_local_transient() {
  let mut container = LocalContainer::new();
  // Use a Cell to show that we get new instances
  container.register(None, Lifecycle::Transient, Vec::new(), |_| Ok(Cell::new(10)));

  let r1 = container.resolve::<Cell<i32>>(None).unwrap();
  let r2 = container.resolve::<Cell<i32>>(None).unwrap();

  r1.set(20);

  assert_eq!(r1.get(), 20);
  assert_eq!(r2.get(), 10); // r2 is a different instance
  assert!(!Rc::ptr_eq(&r1, &r2));
}

#[test]
fn test_local_trait_resolution() {
  trait Greeter {
    fn greet(&self) -> String;
  }
  struct English;
  impl Greeter for English {
    fn greet(&self) -> String {
      "Hello".to_string()
    }
  }

  let mut container = LocalContainer::new();
  container.register_trait::<dyn Greeter, _>(None, Lifecycle::Singleton, Vec::new(), |_| {
    Ok(Rc::new(English))
  });

  let greeter = container.resolve::<dyn Greeter>(None).unwrap();
  assert_eq!(greeter.greet(), "Hello");
}

#[test]
fn test_local_declared_dependency_chain() {
  struct Config {
    prefix: &'static str,
  }
  struct Service {
    config: Rc<Config>,
  }

  let mut container = LocalContainer::new();
  container.register_instance(None, Config { prefix: "local" });
  container.register(
    None,
    Lifecycle::Singleton,
    vec![capability!(Config)],
    |mut deps| {
      Ok(Service {
        config: deps.take::<Config>()?,
      })
    },
  );

  let service = container.resolve::<Service>(None).unwrap();
  assert_eq!(service.config.prefix, "local");
}

#[test]
fn test_local_circular_dependency_is_an_error() {
  // Declared dependencies make this direct to express: no factory needs to
  // call back into the container it is registered in.
  #[derive(Debug)]
  struct ServiceA;
  struct ServiceB;

  let mut container = LocalContainer::new();
  container.register(
    None,
    Lifecycle::Singleton,
    vec![capability!(ServiceB)],
    |_| Ok(ServiceA),
  );
  container.register(
    None,
    Lifecycle::Singleton,
    vec![capability!(ServiceA)],
    |_| Ok(ServiceB),
  );

  // Resolution path: A -> B -> A, reported instead of overflowing.
  let error = container.resolve::<ServiceA>(None).unwrap_err();
  match error {
    ResolveError::CircularDependency(cycle) => {
      assert_eq!(cycle.len(), 3);
      assert_eq!(cycle.first(), cycle.last());
    }
    other => panic!("expected a circular dependency error, got {other}"),
  }
}

#[test]
fn test_local_container_handles_not_send_sync_types() {
  // `Rc<i32>` is neither `Send` nor `Sync`.
  // This is impossible with the thread-safe `Container`.
  struct NotSendSyncService {
    data: Rc<i32>,
  }

  let mut container = LocalContainer::new();
  let shared_data = Rc::new(42);

  // The factory closure must be `Fn`, so we clone the Rc inside it.
  container.register(None, Lifecycle::Singleton, Vec::new(), move |_| {
    Ok(NotSendSyncService {
      data: Rc::clone(&shared_data),
    })
  });

  let service = container.resolve::<NotSendSyncService>(None).unwrap();
  assert_eq!(*service.data, 42);

  // Resolve twice and check that the singleton contains the same inner Rc.
  let service2 = container.resolve::<NotSendSyncService>(None).unwrap();
  assert!(Rc::ptr_eq(&service.data, &service2.data));
}
