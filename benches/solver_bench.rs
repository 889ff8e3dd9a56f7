//! Benchmarks for Mech Solver

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mech_solver::analysis::AnalysisOptions;
use mech_solver::cantilever;
use mech_solver::prelude::*;

fn reference_beam(num_elements: usize) -> Beam {
    Beam::new(1.0, 200e9, 8.333e-6, num_elements).unwrap()
}

fn benchmark_assembly(c: &mut Criterion) {
    let beam = reference_beam(200);
    c.bench_function("assemble_200_elements", |b| {
        b.iter(|| black_box(cantilever::global_stiffness(black_box(&beam))))
    });
}

fn benchmark_cantilever(c: &mut Criterion) {
    let options = AnalysisOptions::default().without_reference();
    for n in [20, 200, 1000] {
        let beam = reference_beam(n);
        c.bench_function(&format!("cantilever_{}_elements_lu", n), |b| {
            b.iter(|| black_box(analyze_cantilever(&beam, 1000.0, &options).unwrap()))
        });
    }
}

fn benchmark_cholesky(c: &mut Criterion) {
    let beam = reference_beam(200);
    let options = AnalysisOptions::cholesky().without_reference();
    c.bench_function("cantilever_200_elements_cholesky", |b| {
        b.iter(|| black_box(analyze_cantilever(&beam, 1000.0, &options).unwrap()))
    });
}

fn benchmark_conduction(c: &mut Criterion) {
    let sim = HeatConduction1D::default();
    c.bench_function("heat_conduction_default", |b| {
        b.iter(|| black_box(sim.run().unwrap()))
    });
}

criterion_group!(
    benches,
    benchmark_assembly,
    benchmark_cantilever,
    benchmark_cholesky,
    benchmark_conduction,
);

criterion_main!(benches);
