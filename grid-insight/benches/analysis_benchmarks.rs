//! Benchmarks for full sheet analysis, search and chart building.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use grid_insight::analysis::{analyze, prepare_chart_data, search};
use grid_insight::grid::{CellValue, Grid};
use std::hint::black_box;

fn clinic_sheet(rows: usize) -> Grid {
    let headers = [
        "patient",
        "department",
        "wait_minutes",
        "arrival_time",
        "visit_date",
    ]
    .iter()
    .map(|h| h.to_string())
    .collect();
    let data = (0..rows)
        .map(|i| {
            vec![
                CellValue::from(format!("P-{i:05}")),
                CellValue::from(["Cardiology", "Radiology", "Emergency", "Oncology"][i % 4]),
                if i % 17 == 0 {
                    CellValue::Empty
                } else {
                    CellValue::from((i % 90) as f64 + 1.0)
                },
                CellValue::from(format!("{}:{:02}", 7 + i % 12, i % 60)),
                CellValue::from(format!("2024-{:02}-{:02}", i % 12 + 1, i % 28 + 1)),
            ]
        })
        .collect();
    Grid::new(headers, data)
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");

    for rows in [100usize, 1_000, 10_000] {
        let grid = clinic_sheet(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &grid, |b, grid| {
            b.iter(|| analyze(black_box(grid), black_box("Clinic")));
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let grid = clinic_sheet(10_000);

    for query in ["", "oncology", "cardiology p-00042 13:15"] {
        group.bench_with_input(BenchmarkId::from_parameter(query), &query, |b, query| {
            b.iter(|| search(black_box(grid.rows()), black_box(query)));
        });
    }

    group.finish();
}

fn bench_chart(c: &mut Criterion) {
    let grid = clinic_sheet(10_000);
    let profiles = analyze(&grid, "Clinic").columns;

    c.bench_function("prepare_chart_data", |b| {
        b.iter(|| prepare_chart_data(black_box(&profiles), black_box(grid.rows())));
    });
}

criterion_group!(benches, bench_analyze, bench_search, bench_chart);
criterion_main!(benches);
