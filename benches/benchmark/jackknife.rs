use criterion::{black_box, Criterion};
use poststrat::estimates::wtd_mean;
use poststrat::errors::Result;
use poststrat::helper::Strata;
use poststrat::jackknife;

pub fn small_benchmark_jk_wtd_mean_se(c: &mut Criterion) {
    let x = vec![10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 18.0, 19.0];
    let by = Strata::from_labels(&["A", "A", "A", "A", "A", "A", "B", "B", "B", "B"]);
    let wgt = vec![1.0];

    c.bench_function("jk_wtd_mean_se n10 s2", |b| b.iter(|| {
        jackknife::jk_wtd_mean_se(black_box(&x), black_box(Some(&by)), black_box(Some(wgt.as_slice())), true)
    }));
}

pub fn large_benchmark_jk_wtd_mean_se(c: &mut Criterion) {
    let test_data = super::fetch_test_dataset(10000, 50);

    c.bench_function("jk_wtd_mean_se n10000 s50", |b| b.iter(|| {
        jackknife::jk_wtd_mean_se(
            black_box(&test_data.x),
            black_box(Some(&test_data.by)),
            black_box(Some(test_data.wgt.as_slice())),
            true
        )
    }));
}

pub fn large_benchmark_jk_reestimation(c: &mut Criterion) {
    let test_data = super::fetch_test_dataset(1000, 20);
    let mean = |x: &[f64], w: &[f64]| -> Result<f64> { wtd_mean(x, w) };

    c.bench_function("jk_se re-estimation n1000 s20", |b| b.iter(|| {
        jackknife::jk_se(
            black_box(&test_data.x),
            black_box(Some(&test_data.by)),
            black_box(Some(test_data.wgt.as_slice())),
            true,
            &mean
        )
    }));
}
