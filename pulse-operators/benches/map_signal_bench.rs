// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{BenchmarkId, Criterion, Throughput};
use pulse_core::Publisher;
use pulse_operators::map_signal;
use pulse_test_utils::RecordingSubscriber;
use std::hint::black_box;
use std::sync::Arc;

/// Benchmarks `map_signal` with an identity-shaped `f_next` over varying
/// input sizes.
pub fn bench_map_signal(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_signal");
    let sizes = [100u64, 1_000, 10_000];

    for &size in &sizes {
        let id = BenchmarkId::from_parameter(size);
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(id, &size, |bencher, &size| {
            bencher.iter(|| {
                let upstream: Arc<dyn Publisher<i64>> = Arc::new(pulse_sources::range(0, size));
                let mapped = map_signal::<i64, i64>(
                    upstream,
                    Some(Arc::new(|v: i64| v * 2)),
                    None,
                    None,
                );
                let (handle, subscriber) = RecordingSubscriber::<i64>::unbounded();
                mapped.subscribe(Box::new(subscriber));
                black_box(handle.values());
            });
        });
    }

    group.finish();
}
