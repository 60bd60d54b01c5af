#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for composing and rasterizing panel figures.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trueno_panels::prelude::*;
use trueno_panels::output::{JpegEncoder, PngEncoder};

fn table(rows: usize, series: usize) -> SeriesTable {
    let x: Vec<f64> = (0..rows).map(|i| i as f64).collect();
    let cols = (0..series)
        .map(|s| x.iter().map(|v| (v * 0.1 + s as f64).sin()).collect())
        .collect();
    SeriesTable::from_columns(x, cols).expect("table should build")
}

fn compose_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose_each");

    for rows in [32, 1_000, 10_000] {
        let data = table(rows, 6);
        let labels = data.labels();
        let grid = PanelGrid::new(2, 3).expect("grid");

        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, _| {
            b.iter(|| {
                compose_each(black_box(&data), grid, "x", &labels, &EachOptions::default())
                    .expect("compose should succeed")
            });
        });
    }

    group.finish();
}

fn render_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.sample_size(20);

    let data = table(1_000, 4);
    let labels = data.labels();

    let all = compose_all(&data, &AxisLabels::new("x", "y"), &labels, &AllOptions::default().x_tick_interval(100))
        .expect("compose_all");
    group.bench_function("all_5x5in", |b| b.iter(|| black_box(&all).render().expect("render")));

    let grouped = compose_each_group(
        &data,
        PanelGrid::new(1, 2).expect("grid"),
        2,
        &AxisLabels::new("x", "y"),
        &labels,
        &GroupOptions::default().x_tick_interval(100),
    )
    .expect("compose_each_group");
    group.bench_function("group_7x7in", |b| b.iter(|| black_box(&grouped).render().expect("render")));

    group.finish();
}

fn encoder_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    let data = table(200, 3);
    let fb = compose_all(&data, &AxisLabels::default(), &data.labels(), &AllOptions::default())
        .and_then(|fig| fig.render())
        .expect("render");

    group.bench_function("png", |b| {
        b.iter(|| PngEncoder::new(100.0).to_bytes(black_box(&fb)).expect("png"));
    });
    group.bench_function("jpeg", |b| {
        b.iter(|| JpegEncoder::new(100.0).to_bytes(black_box(&fb)).expect("jpeg"));
    });

    group.finish();
}

criterion_group!(benches, compose_benchmark, render_benchmark, encoder_benchmark);
criterion_main!(benches);
