use weft_di::{capability, Container, Lifecycle};
use std::sync::Arc;

// A tiny data pipeline wired entirely through the container. The pipeline
// only knows the abstract roles; which concrete loader, transformer, and
// exporter it ends up with is decided at registration time.

#[derive(Clone, Debug)]
struct Record {
  name: String,
  age: Option<u32>,
}

fn record(name: &str, age: Option<u32>) -> Record {
  Record {
    name: name.to_string(),
    age,
  }
}

// --- Abstract roles ---

trait Loader: Send + Sync {
  fn load(&self) -> Vec<Record>;
}

trait Transformer: Send + Sync {
  fn transform(&self, records: Vec<Record>) -> Vec<Record>;
}

trait Exporter: Send + Sync {
  fn export(&self, records: Vec<Record>);
}

// --- Concrete implementations ---

struct MemoryLoader;
impl Loader for MemoryLoader {
  fn load(&self) -> Vec<Record> {
    vec![
      record("Big Boi", Some(37)),
      record("Patrick", Some(29)),
      record("Paul Wall", None),
      record("Clyde", Some(13)),
    ]
  }
}

struct RemoveNamed {
  banned: &'static str,
}
impl Transformer for RemoveNamed {
  fn transform(&self, records: Vec<Record>) -> Vec<Record> {
    records.into_iter().filter(|r| r.name != self.banned).collect()
  }
}

struct ConsoleExporter;
impl Exporter for ConsoleExporter {
  fn export(&self, records: Vec<Record>) {
    for r in &records {
      match r.age {
        Some(age) => println!("  {} ({})", r.name, age),
        None => println!("  {} (age unknown)", r.name),
      }
    }
  }
}

// --- The pipeline, depending only on the roles ---

struct Pipeline {
  loader: Arc<dyn Loader>,
  transformer: Arc<dyn Transformer>,
  exporter: Arc<dyn Exporter>,
}

impl Pipeline {
  fn run(&self) {
    let data = self.loader.load();
    let cleaned = self.transformer.transform(data);
    self.exporter.export(cleaned);
  }
}

fn main() {
  let container = Container::new();

  // --- Registration ---
  container.register_trait::<dyn Loader, _>(None, Lifecycle::Singleton, Vec::new(), |_| {
    Ok(Arc::new(MemoryLoader))
  });
  container.register_trait::<dyn Transformer, _>(None, Lifecycle::Transient, Vec::new(), |_| {
    Ok(Arc::new(RemoveNamed { banned: "Patrick" }))
  });
  container.register_trait::<dyn Exporter, _>(None, Lifecycle::Singleton, Vec::new(), |_| {
    Ok(Arc::new(ConsoleExporter))
  });

  // The pipeline declares the roles it consumes; the container resolves them
  // in declaration order and hands them to the factory.
  container.register(
    None,
    Lifecycle::Transient,
    vec![
      capability!(trait Loader),
      capability!(trait Transformer),
      capability!(trait Exporter),
    ],
    |mut deps| {
      Ok(Pipeline {
        loader: deps.take::<dyn Loader>()?,
        transformer: deps.take::<dyn Transformer>()?,
        exporter: deps.take::<dyn Exporter>()?,
      })
    },
  );

  // --- Resolution and usage ---
  println!("Resolving the pipeline...");
  let pipeline = container
    .resolve::<Pipeline>(None)
    .expect("pipeline should be fully wired");

  println!("Running it:");
  pipeline.run();

  println!("Pipeline completed.");
}
