use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use proctor::{callback, job, predicate, Job, Process, Registry};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::runtime::Runtime; // To run async code within Criterion

// Using anyhow::Error (the default) for benchmark simplicity.
type BenchProcess = Process<Value, anyhow::Error>;

// --- Helper: Job returning a small object, optionally after a sleep ---
fn create_object_job(index: usize, delay_micros: u64) -> Job<Value, anyhow::Error> {
  job(move |_process: BenchProcess| async move {
    if delay_micros > 0 {
      tokio::time::sleep(std::time::Duration::from_micros(delay_micros)).await;
    }
    let mut fields = serde_json::Map::new();
    fields.insert(format!("job_{}", index), json!(index));
    Ok::<_, anyhow::Error>(Value::Object(fields))
  })
}

// --- Benchmark Functions ---

fn bench_start_with_sync_jobs(c: &mut Criterion) {
  let mut group = c.benchmark_group("StartSyncJobs");
  let rt = Runtime::new().unwrap();

  for num_jobs in [1usize, 5, 10].iter() {
    let registry = Registry::new_default();
    let process = registry.get_or_create_with("bench", [format!("{}jobs", num_jobs)]);
    process.perform((0..*num_jobs).map(|i| create_object_job(i, 0)));
    process.on_success([callback(|_p: BenchProcess| async { Ok::<_, anyhow::Error>(()) })]);

    group.throughput(Throughput::Elements(*num_jobs as u64));
    group.bench_with_input(BenchmarkId::from_parameter(num_jobs), num_jobs, |b, _| {
      b.to_async(&rt).iter(|| {
        let p = process.clone();
        async move { criterion::black_box(p.start().await) }
      });
    });
  }
  group.finish();
}

fn bench_start_with_async_jobs(c: &mut Criterion) {
  let mut group = c.benchmark_group("StartAsyncJobs");
  let rt = Runtime::new().unwrap();

  for delay_us in [0u64, 10, 100].iter() {
    let registry = Registry::new_default();
    let process = registry.get_or_create_with("bench-async", [delay_us.to_string()]);
    process.perform((0..5).map(|i| create_object_job(i, *delay_us)));

    group.throughput(Throughput::Elements(5));
    group.bench_with_input(BenchmarkId::new("5jobs", format!("{}us_delay", delay_us)), delay_us, |b, _| {
      b.to_async(&rt).iter(|| {
        let p = process.clone();
        async move { criterion::black_box(p.start().await) }
      });
    });
  }
  group.finish();
}

fn bench_predicate_skip(c: &mut Criterion) {
  let mut group = c.benchmark_group("PredicateSkip");
  let rt = Runtime::new().unwrap();

  let registry = Registry::new_default();
  let process = registry.get_or_create("skipped");
  process
    .when([predicate(|_p: BenchProcess| async { Ok::<_, anyhow::Error>(false) })])
    .perform([create_object_job(0, 0)]);

  group.throughput(Throughput::Elements(1));
  group.bench_function("skip", |b| {
    b.to_async(&rt).iter(|| {
      let p = process.clone();
      async move { criterion::black_box(p.start().await) }
    });
  });
  group.finish();
}

fn bench_registry_lookup(c: &mut Criterion) {
  let mut group = c.benchmark_group("RegistryLookup");
  let registry = Arc::new(Registry::new_default());
  for i in 0..1_000 {
    registry.get_or_create_with("entity", [i.to_string()]);
  }

  group.bench_function("existing", |b| {
    b.iter(|| criterion::black_box(registry.get_or_create_with("entity", ["500"])))
  });
  group.bench_function("registration_overwrite", |b| {
    let process = registry.get_or_create("overwrite");
    b.iter(|| {
      process.perform([create_object_job(0, 0)]);
    })
  });
  group.finish();
}

criterion_group!(
  benches,
  bench_start_with_sync_jobs,
  bench_start_with_async_jobs,
  bench_predicate_skip,
  bench_registry_lookup
);
criterion_main!(benches);
