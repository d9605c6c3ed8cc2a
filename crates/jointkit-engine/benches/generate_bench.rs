//! Benchmarks for the generation pipeline.
//!
//! Run with: cargo bench -p jointkit-engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jointkit_engine::{generate, FingerPlan, GenerateParams, JointFamily, JointSettings, TemplateId};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let params = GenerateParams::default();
    for id in TemplateId::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(id.as_str()), &id, |b, &id| {
            b.iter(|| generate(black_box(id), black_box(&params)));
        });
    }
    group.finish();
}

fn bench_finger_plan(c: &mut Criterion) {
    let settings = JointSettings {
        target_width: 10.0,
        min_fingers: 3,
        count_outer: None,
        count_vertical: None,
    };
    c.bench_function("finger_plan_1m_edge", |b| {
        b.iter(|| FingerPlan::new(black_box(1000.0), JointFamily::Outer, &settings));
    });
}

criterion_group!(benches, bench_generate, bench_finger_plan);
criterion_main!(benches);
