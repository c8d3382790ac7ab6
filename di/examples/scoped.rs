use weft_di::{capability, Container, Lifecycle};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// Scopes model the per-request boundary an outer framework would own: the
// registry is wired once at startup, and each inbound request resolves
// against a child container with its own singleton cache.

struct AppConfig {
  service_name: &'static str,
}

struct RequestContext {
  request_id: usize,
  service_name: &'static str,
}

static REQUEST_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn handle_request(scope: &Container) {
  let ctx = scope
    .resolve::<RequestContext>(None)
    .expect("request context should be wired");

  // Within one request, the context is a singleton.
  let again = scope.resolve::<RequestContext>(None).unwrap();
  assert!(Arc::ptr_eq(&ctx, &again));

  println!(
    "  [{}] handling request #{}",
    ctx.service_name, ctx.request_id
  );
}

fn main() {
  // --- Startup wiring, done once ---
  let container = Container::new();
  container.register_instance(None, AppConfig { service_name: "weft-demo" });
  container.register(
    None,
    Lifecycle::Singleton,
    vec![capability!(AppConfig)],
    |mut deps| {
      let config = deps.take::<AppConfig>()?;
      Ok(RequestContext {
        request_id: REQUEST_COUNTER.fetch_add(1, Ordering::SeqCst),
        service_name: config.service_name,
      })
    },
  );

  // --- Two simulated requests ---
  println!("Request A:");
  let request_a = container.scope();
  handle_request(&request_a);

  println!("Request B:");
  let request_b = container.scope();
  handle_request(&request_b);

  // Each scope first-built its own RequestContext singleton.
  let a = request_a.resolve::<RequestContext>(None).unwrap();
  let b = request_b.resolve::<RequestContext>(None).unwrap();
  assert_ne!(a.request_id, b.request_id);

  println!("Request-scoped singletons did not leak across scopes.");
}
