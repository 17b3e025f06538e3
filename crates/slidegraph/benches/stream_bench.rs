use criterion::{black_box, criterion_group, criterion_main, Criterion};
use slidegraph::{DegreeStream, IndexedMinPQ, WindowConfig};

fn synthetic_events(n: usize) -> Vec<(i64, Vec<String>)> {
    // 200 labels, 2-4 per event, one event per second.
    (0..n)
        .map(|i| {
            let width = 2 + i % 3;
            let labels = (0..width)
                .map(|j| format!("tag_{}", (i * 7 + j * 13) % 200))
                .collect::<std::collections::BTreeSet<_>>()
                .into_iter()
                .collect();
            (i as i64, labels)
        })
        .collect()
}

fn bench_stream(c: &mut Criterion) {
    let events = synthetic_events(10_000);

    c.bench_function("stream_10k_events_window_60", |b| {
        b.iter(|| {
            let mut stream = DegreeStream::new(&WindowConfig::with_window(60));
            for (t, labels) in &events {
                black_box(stream.ingest(*t, labels));
            }
        })
    });
}

fn bench_minpq(c: &mut Criterion) {
    c.bench_function("minpq_add_update_pop_10k", |b| {
        b.iter(|| {
            let mut pq = IndexedMinPQ::new();
            for i in 0..10_000u32 {
                pq.add(i, i64::from((i * 7919) % 10_007));
            }
            for i in (0..10_000u32).step_by(3) {
                pq.update(&i, -i64::from(i));
            }
            while let Some(entry) = pq.pop_min() {
                black_box(entry);
            }
        })
    });
}

criterion_group!(benches, bench_stream, bench_minpq);
criterion_main!(benches);
