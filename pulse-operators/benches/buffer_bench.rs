// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{BenchmarkId, Criterion, Throughput};
use pulse_core::Publisher;
use pulse_operators::buffer;
use pulse_sources::range;
use pulse_test_utils::RecordingSubscriber;
use std::hint::black_box;
use std::sync::Arc;

/// Benchmarks `buffer` with various window sizes, `skip == size` (exact,
/// non-overlapping windows).
pub fn bench_buffer_exact(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_exact");
    let sizes = [100usize, 1_000, 10_000];
    let window_sizes = [2u32, 10, 50];

    for &size in &sizes {
        for &window_size in &window_sizes {
            let id = BenchmarkId::from_parameter(format!("n{size}_w{window_size}"));
            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(id, &(size, window_size), |bencher, &(size, window_size)| {
                bencher.iter(|| {
                    let upstream: Arc<dyn Publisher<i64>> = Arc::new(range(0, size as u64));
                    let windows =
                        buffer(upstream, window_size, window_size, || Some(Vec::<i64>::new()))
                            .unwrap();
                    let (handle, subscriber) = RecordingSubscriber::<Vec<i64>>::unbounded();
                    windows.subscribe(Box::new(subscriber));
                    black_box(handle.values());
                });
            });
        }
    }

    group.finish();
}

/// Benchmarks `buffer` in the overlapping regime (`skip < size`), the
/// costliest since every item fans out into multiple open windows.
pub fn bench_buffer_overlap(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_overlap");
    let sizes = [100usize, 1_000, 10_000];
    let size_skip_pairs = [(5u32, 1u32), (10u32, 3u32)];

    for &size in &sizes {
        for &(window_size, skip) in &size_skip_pairs {
            let id = BenchmarkId::from_parameter(format!("n{size}_w{window_size}_s{skip}"));
            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(
                id,
                &(size, window_size, skip),
                |bencher, &(size, window_size, skip)| {
                    bencher.iter(|| {
                        let upstream: Arc<dyn Publisher<i64>> = Arc::new(range(0, size as u64));
                        let windows = buffer(upstream, window_size, skip, || {
                            Some(Vec::<i64>::new())
                        })
                        .unwrap();
                        let (handle, subscriber) = RecordingSubscriber::<Vec<i64>>::unbounded();
                        windows.subscribe(Box::new(subscriber));
                        black_box(handle.values());
                    });
                },
            );
        }
    }

    group.finish();
}
