// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::{Point3, Vector3};
use stl_extract::geometry::triangulate_planar_polygon;
use stl_extract::host::Element;
use stl_extract::scene::{Instance, Vec3};
use stl_extract::{
    Encoding, ExportSettings, GeometryNode, MemoryDocument, MemoryModel, MeshExtractor,
    Primitive, Transform,
};
use tempfile::TempDir;

/// `count` instances of one shared prism laid out on a grid
fn instanced_model(count: usize) -> MemoryModel {
    let mut doc = MemoryDocument::new("Bench");
    let column = doc.add_definition(GeometryNode::Solid(
        Primitive::prism(3.0, 0.25, 16).to_solid(),
    ));

    for i in 0..count {
        let offset = Vec3::new((i % 32) as f64, (i / 32) as f64, 0.0);
        doc.add_element(Element::new(
            i as u64 + 1,
            None,
            GeometryNode::Instance(Instance::new(column, Transform::translation(offset))),
        ));
    }

    let mut model = MemoryModel::new();
    model.add_document(doc);
    model
}

fn bench_triangulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangulation");

    for sides in [8usize, 64, 512] {
        let outline: Vec<Point3<f64>> = (0..sides)
            .map(|i| {
                let theta = std::f64::consts::TAU * i as f64 / sides as f64;
                Point3::new(theta.cos(), theta.sin(), 0.0)
            })
            .collect();
        group.bench_with_input(BenchmarkId::new("polygon", sides), &outline, |b, outline| {
            b.iter(|| triangulate_planar_polygon(black_box(outline), &[]));
        });
    }

    group.bench_function("cuboid_solid", |b| {
        b.iter(|| Primitive::cuboid(black_box(Vector3::new(10.0, 10.0, 10.0)), true).to_solid());
    });

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    let dir = TempDir::new().unwrap();

    for count in [16usize, 256, 1024] {
        let model = instanced_model(count);
        for encoding in [Encoding::Binary, Encoding::Ascii] {
            let settings = ExportSettings::new(encoding);
            let path = dir.path().join(format!("bench-{}-{}.stl", count, encoding));
            group.bench_with_input(
                BenchmarkId::new(encoding.to_string(), count),
                &model,
                |b, model| {
                    b.iter(|| {
                        let outcome = MeshExtractor::new(model).export(&settings, &path);
                        assert!(outcome.is_success());
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_triangulation, bench_export);
criterion_main!(benches);
