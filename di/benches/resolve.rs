use criterion::{black_box, criterion_group, criterion_main, Criterion};
use weft_di::{capability, Container, Lifecycle};

struct Config {
  value: u64,
}
struct Connection {
  value: u64,
}
struct Service {
  value: u64,
}

// A small three-level graph: instance -> singleton -> transient.
fn wired_container() -> Container {
  let container = Container::new();
  container.register_instance(None, Config { value: 7 });
  container.register(
    None,
    Lifecycle::Singleton,
    vec![capability!(Config)],
    |mut deps| {
      let config = deps.take::<Config>()?;
      Ok(Connection {
        value: config.value,
      })
    },
  );
  container.register(
    None,
    Lifecycle::Transient,
    vec![capability!(Connection)],
    |mut deps| {
      let connection = deps.take::<Connection>()?;
      Ok(Service {
        value: connection.value + 1,
      })
    },
  );
  container
}

fn bench_singleton_hit(c: &mut Criterion) {
  let container = wired_container();
  // Prime the cache so the loop measures the hit path.
  container.resolve::<Connection>(None).unwrap();

  c.bench_function("resolve_singleton_hit", |b| {
    b.iter(|| {
      let connection = container.resolve::<Connection>(None).unwrap();
      black_box(connection.value)
    })
  });
}

fn bench_transient_chain(c: &mut Criterion) {
  let container = wired_container();

  c.bench_function("resolve_transient_chain", |b| {
    b.iter(|| {
      let service = container.resolve::<Service>(None).unwrap();
      black_box(service.value)
    })
  });
}

criterion_group!(benches, bench_singleton_hit, bench_transient_chain);
criterion_main!(benches);
