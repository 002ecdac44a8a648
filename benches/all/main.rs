// benches/all/main.rs
use criterion::*;
#[path = "../quantile/main.rs"]
mod quantile;

#[path = "../smooth/main.rs"]
mod smooth;

// Benchmark group configuration
#[cfg(not(target_os = "windows"))]
use pprof::criterion::{Output, PProfProfiler};

#[cfg(not(target_os = "windows"))]
pub fn get_benchmark_config() -> Criterion {
    Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

#[cfg(target_os = "windows")]
pub fn get_benchmark_config() -> Criterion {
    Criterion::default()
}

// Main benchmark function
pub fn run_all_benchmarks(c: &mut Criterion) {
    quantile::run_quantile_benchmarks(c);
    smooth::run_smooth_benchmarks(c);
}

criterion_group! {
    name = benches;
    config = get_benchmark_config();
    targets = run_all_benchmarks
}

criterion_main!(benches);
