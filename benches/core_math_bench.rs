use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use extrema_chart::core::{
    DEFAULT_BIN_COUNT, DataPoint, LinearScale, Point, SpatialPartition, Viewport, compute_bins,
};
use extrema_chart::{ChartConfig, ChartModel};
use std::hint::black_box;

fn generated_points(count: usize) -> Vec<DataPoint> {
    let start = NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date");
    (0..count)
        .map(|i| {
            let t = i as f64;
            let seasonal = (t / 365.25 * std::f64::consts::TAU).sin();
            let noise = ((t * 12.9898).sin() * 43_758.545_3).fract();
            let min = 45.0 + 25.0 * seasonal + 8.0 * noise;
            let date = start
                .checked_add_days(chrono::Days::new(i as u64))
                .expect("date in range");
            DataPoint::new(min, min + 10.0 + 6.0 * noise.abs(), date)
        })
        .collect()
}

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::new((-12.0, 104.0), (0.0, 1920.0)).nice(10);

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.map(black_box(43.21));
            let _ = scale.invert(px);
        })
    });
}

fn bench_partition_build_10k(c: &mut Criterion) {
    let bounds = Viewport::new(1000.0, 1000.0);
    let sites: Vec<Point> = generated_points(10_000)
        .iter()
        .map(|p| Point::new(p.temp_min * 8.0, 1000.0 - p.temp_max * 8.0))
        .collect();

    c.bench_function("partition_build_10k", |b| {
        b.iter(|| {
            let _ = SpatialPartition::build(black_box(sites.clone()), bounds)
                .expect("partition should build");
        })
    });
}

fn bench_partition_locate_10k(c: &mut Criterion) {
    let model = ChartModel::build(generated_points(10_000), ChartConfig::default())
        .expect("model should build");
    let partition = model.partition();
    let bounds = model.bounds();

    c.bench_function("partition_locate_sweep_10k", |b| {
        b.iter(|| {
            let mut previous = None;
            for step in 0..200 {
                let x = bounds.width * (step as f64 / 200.0);
                let y = bounds.height * 0.5;
                let hit = match previous {
                    Some(start) => partition.locate_from(x, y, start),
                    None => partition.locate(x, y),
                };
                previous = hit.ok();
            }
            black_box(previous)
        })
    });
}

fn bench_histogram_binning_10k(c: &mut Criterion) {
    let values: Vec<f64> = generated_points(10_000).iter().map(|p| p.temp_max).collect();

    c.bench_function("histogram_binning_10k", |b| {
        b.iter(|| {
            let _ = compute_bins(
                black_box(values.iter().copied()),
                black_box((0.0, 120.0)),
                DEFAULT_BIN_COUNT,
            )
            .expect("binning should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_partition_build_10k,
    bench_partition_locate_10k,
    bench_histogram_binning_10k
);
criterion_main!(benches);
