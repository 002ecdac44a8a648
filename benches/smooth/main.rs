// benches/smooth/main.rs
use criterion::*;
use qhsmooth_core::{smooth, Image, NullProgress, SmoothParams, Strategy};

pub const IMAGE_SIDES: &[usize] = &[32, 128, 512];

pub fn generate_test_image(side: usize) -> Image<f32> {
    let data: Vec<f32> = (0..side * side).map(|i| (i % 4096) as f32).collect();
    Image::from_vec(side, side, data)
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

pub fn run_smooth_benchmarks(c: &mut Criterion) {
    for &side in IMAGE_SIDES {
        let mut group = c.benchmark_group("smooth");
        group.throughput(Throughput::Elements((side * side) as u64));
        let image = generate_test_image(side);

        for strategy in [Strategy::IntegerExact, Strategy::FptBinCenters, Strategy::FptInterpolate] {
            let params = SmoothParams {
                half_x: 3,
                half_y: 3,
                quantile: 0.5,
                hmin: 0.0,
                hmax: 4096.0,
                bins: 4096,
                strategy,
            };
            group.bench_with_input(BenchmarkId::new(format!("{strategy:?}"), side), &image, |b, image| {
                b.iter(|| smooth(black_box(image), &params, &mut NullProgress).unwrap())
            });
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = get_benchmark_config();
    targets = run_smooth_benchmarks
}

criterion_main!(benches);
