use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use matchbook_rs::{MatchingEngine, Side};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

/// Admission throughput against a book that is never crossed: pure insert cost.
fn benchmark_resting_admission(c: &mut Criterion) {
    let mut group = c.benchmark_group("MatchingEngine - Resting Admissions");

    group.bench_function("admit_resting_bid", |b| {
        let engine = MatchingEngine::new();
        // Keep the list shallow so the bench measures CAS cost, not traversal depth.
        let mut tick = 0u32;
        b.iter(|| {
            let price = 100.0 + f64::from(tick % 16);
            engine.admit(Side::Buy, "BENCH", 10, price);
            tick = tick.wrapping_add(1);
            if tick % 4096 == 0 {
                engine.book().bids("BENCH").clear();
            }
        });
    });

    group.finish();
}

/// A buy/sell pair that crosses immediately: insert plus one full sweep and unlink.
fn benchmark_crossing_pair(c: &mut Criterion) {
    let mut group = c.benchmark_group("MatchingEngine - Crossing");

    group.bench_function("admit_crossing_pair", |b| {
        let engine = MatchingEngine::new();
        b.iter(|| {
            engine.admit(Side::Buy, "BENCH", 100, 101.0);
            engine.admit(Side::Sell, "BENCH", 100, 99.0);
        });
    });

    group.finish();
}

/// Multi-threaded producers hammering a single symbol slot.
fn benchmark_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("MatchingEngine - Contention");
    group.measurement_time(Duration::from_secs(8));

    for thread_count in [2usize, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("single_symbol_producers", thread_count),
            &thread_count,
            |b, &thread_count| {
                b.iter_custom(|iters| measure_contended_admissions(thread_count, iters));
            },
        );
    }

    group.finish();
}

/// Measures wall time for `iters` admissions split across `thread_count` producers that
/// alternate sides so the slot keeps matching while it is written.
fn measure_contended_admissions(thread_count: usize, iters: u64) -> Duration {
    let engine = Arc::new(MatchingEngine::new());
    let barrier = Arc::new(Barrier::new(thread_count + 1));
    let per_thread = iters / thread_count as u64 + 1;

    let mut handles = Vec::with_capacity(thread_count);
    for thread_id in 0..thread_count {
        let engine = Arc::clone(&engine);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for i in 0..per_thread {
                let price = 100.0 + (i % 8) as f64;
                if (thread_id + i as usize) % 2 == 0 {
                    engine.admit(Side::Buy, "BENCH", 10, price);
                } else {
                    engine.admit(Side::Sell, "BENCH", 10, price);
                }
            }
        }));
    }

    barrier.wait();
    let start = Instant::now();
    for handle in handles {
        handle.join().expect("bench worker panicked");
    }
    start.elapsed()
}

criterion_group!(
    benches,
    benchmark_resting_admission,
    benchmark_crossing_pair,
    benchmark_contention,
);

criterion_main!(benches);
