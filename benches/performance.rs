// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use bendprep::geometry::fit_spline;
use bendprep::io::parse_path_data;
use bendprep::wire::{Segment, WirePath};
use bendprep::{compute_bend_allowance, BendSpec, FlatPattern};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::{Point2, Point3};

fn bench_bend(c: &mut Criterion) {
    let mut group = c.benchmark_group("bend");

    let spec = BendSpec::new(2.0, 90.0, 3.0, 0.44);
    group.bench_function("allowance", |b| {
        b.iter(|| compute_bend_allowance(black_box(&spec)).unwrap());
    });

    group.bench_function("flat_pattern_10_bends", |b| {
        b.iter(|| {
            let mut pattern = FlatPattern::new(2.0, 3.0, 0.44).leg(10.0);
            for i in 0..10 {
                pattern = pattern.bend(black_box(30.0 + i as f64 * 10.0)).leg(10.0);
            }
            pattern.compute().unwrap()
        });
    });

    group.finish();
}

fn bench_path_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_length");

    for count in [10, 100, 1000] {
        let path = WirePath::from_segments((0..count).map(|i| {
            let x = i as f64 * 10.0;
            Segment::curve(
                Point2::new(x, 0.0),
                Point2::new(x + 5.0, 5.0),
                Point2::new(x + 10.0, 0.0),
            )
        }));
        group.bench_with_input(BenchmarkId::new("curves", count), &path, |b, path| {
            b.iter(|| path.length(black_box(20)));
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    let simple = "M 0 0 L 10 0 Q 15 5 20 0";
    group.bench_with_input(BenchmarkId::new("simple", ""), &simple, |b, source| {
        b.iter(|| parse_path_data(black_box(source)).unwrap());
    });

    let long: String = (0..500)
        .map(|i| format!("l{},{} q5,5 10,0 ", i % 7, -(i % 5)))
        .collect();
    let long = format!("m0,0 {}z", long);
    group.bench_with_input(BenchmarkId::new("relative_1000", ""), &long, |b, source| {
        b.iter(|| parse_path_data(black_box(source)).unwrap());
    });

    group.finish();
}

fn bench_spline(c: &mut Criterion) {
    let points: Vec<Point3<f64>> = (0..2000)
        .map(|i| {
            let t = i as f64 * 0.01;
            Point3::new(t.cos() * 10.0, t.sin() * 10.0, t)
        })
        .collect();

    c.bench_function("fit_spline_helix", |b| {
        b.iter(|| fit_spline(black_box(&points), 5.0, 1.0));
    });
}

criterion_group!(benches, bench_bend, bench_path_length, bench_parse, bench_spline);
criterion_main!(benches);
