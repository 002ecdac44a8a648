// benches/quantile/main.rs
use criterion::*;
use qhsmooth_core::quantile::evaluate;
use qhsmooth_core::{Counts, Strategy};

pub const KERNEL_WIDTHS: &[usize] = &[16, 256, 4096];

pub fn filled_kernel(nb: usize) -> Counts {
    let mut counts = Counts::zeroed(nb + 1);
    for bin in 0..nb as u32 {
        counts.add_bin(bin);
    }
    counts
}

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

pub fn run_quantile_benchmarks(c: &mut Criterion) {
    for &nb in KERNEL_WIDTHS {
        let mut group = c.benchmark_group("quantile");
        group.throughput(Throughput::Elements(nb as u64));
        let counts = filled_kernel(nb);

        for strategy in [Strategy::IntegerExact, Strategy::FptBinCenters, Strategy::FptInterpolate] {
            group.bench_with_input(BenchmarkId::new(format!("{strategy:?}"), nb), &counts, |b, counts| {
                b.iter(|| evaluate(black_box(counts), nb, 0.5, strategy))
            });
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = get_benchmark_config();
    targets = run_quantile_benchmarks
}

criterion_main!(benches);
