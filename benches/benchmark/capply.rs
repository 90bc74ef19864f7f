use criterion::{black_box, Criterion};
use poststrat::capply;

pub fn large_benchmark_stratum_sizes(c: &mut Criterion) {
    let test_data = super::fetch_test_dataset(10000, 50);

    c.bench_function("stratum_sizes n10000 s50", |b| b.iter(|| {
        capply::stratum_sizes(black_box(&test_data.by))
    }));
}

pub fn large_benchmark_capply_mean(c: &mut Criterion) {
    let test_data = super::fetch_test_dataset(10000, 50);

    c.bench_function("capply mean n10000 s50", |b| b.iter(|| {
        capply::capply_scalar(black_box(&test_data.x), black_box(&test_data.by), |s| s.iter().sum::<f64>() / s.len() as f64)
    }));
}
