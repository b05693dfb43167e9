use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;

use chiamate::config::RecorderConfig;
use chiamate::recorder::Recorder;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const NUM_THREADS: usize = 8;
const ITERATIONS_PER_THREAD: usize = 100_000;
const KEYS: [&str; 8] = [
    "Shop#add_item",
    "Shop#remove_item",
    "Shop#checkout",
    "Cart#total",
    "Auth#login",
    "Auth#logout",
    "Db#query",
    "Db#commit",
];

/// Single global lock over counts and histories, the naive baseline.
#[derive(Default)]
struct GlobalLock {
    inner: Mutex<HashMap<String, (u64, Vec<String>)>>,
}

impl GlobalLock {
    fn record(&self, key: &str, args: String) {
        let mut map = self.inner.lock().unwrap();
        let entry = map.entry(key.to_string()).or_default();
        entry.0 += 1;
        if entry.1.len() == 200 {
            entry.1.remove(0);
        }
        entry.1.push(args);
    }
}

fn bench_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("record");
    let label = format!("{}threads x {}iter", NUM_THREADS, ITERATIONS_PER_THREAD);

    group.bench_function(BenchmarkId::new("Recorder (sharded)", &label), |b| {
        b.iter(|| {
            let recorder = Arc::new(Recorder::with_config(
                RecorderConfig::new().history_capacity(200),
            ));
            let mut handles = vec![];

            for t in 0..NUM_THREADS {
                let recorder = Arc::clone(&recorder);
                handles.push(thread::spawn(move || {
                    for i in 0..ITERATIONS_PER_THREAD {
                        recorder.record(KEYS[(t + i) % KEYS.len()], &[&i]);
                    }
                }));
            }

            for handle in handles {
                handle.join().unwrap();
            }

            black_box(recorder.count(KEYS[0]))
        })
    });

    group.bench_function(BenchmarkId::new("Mutex<HashMap> (global)", &label), |b| {
        b.iter(|| {
            let registry = Arc::new(GlobalLock::default());
            let mut handles = vec![];

            for t in 0..NUM_THREADS {
                let registry = Arc::clone(&registry);
                handles.push(thread::spawn(move || {
                    for i in 0..ITERATIONS_PER_THREAD {
                        registry.record(KEYS[(t + i) % KEYS.len()], format!("[{i}]"));
                    }
                }));
            }

            for handle in handles {
                handle.join().unwrap();
            }

            black_box(registry.inner.lock().unwrap().len())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_record);
criterion_main!(benches);
