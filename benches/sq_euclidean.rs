use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use l2kernel::{
    numerics::{reference::sq_euclidean_scalar, sq_euclidean},
    workload::Workload,
};

const VECTORS: usize = 1024;

fn bench_dim<const DIM: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("sq_euclidean_{DIM}"));

    // offset 1: no vector starts on a 16-byte boundary
    let workload = Workload::<DIM>::gaussian(VECTORS, 1, 42);

    group.bench_with_input(BenchmarkId::new("kernel", DIM), &workload, |bench, w| {
        bench.iter(|| {
            let mut total = 0.0f32;
            for i in 0..w.len() {
                let (x, y) = w.pair(i);
                total += unsafe { sq_euclidean::<DIM>(black_box(w.as_ptr(x)), w.as_ptr(y)) };
            }
            total
        })
    });

    group.bench_with_input(BenchmarkId::new("scalar", DIM), &workload, |bench, w| {
        bench.iter(|| {
            let mut total = 0.0f32;
            for i in 0..w.len() {
                let (x, y) = w.pair(i);
                total += sq_euclidean_scalar(black_box(w.vector(x)), w.vector(y));
            }
            total
        })
    });

    group.finish();
}

fn sq_euclidean_benchmarks(c: &mut Criterion) {
    bench_dim::<15>(c);
    bench_dim::<100>(c);
    bench_dim::<128>(c);
    bench_dim::<768>(c);
    bench_dim::<960>(c);
}

criterion_group!(benches, sq_euclidean_benchmarks);
criterion_main!(benches);
