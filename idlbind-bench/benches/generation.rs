//! Stub generation benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use idlbind_bench::{lattice_graph, lattice_xml};
use idlbind_codegen::{Backend, Generator, JsonipcBackend, V8Backend};
use idlbind_model::{UnitIr, parse_unit};
use std::hint::black_box;

fn benchmark_generate(c: &mut Criterion) {
    let graph = lattice_graph(6, 6);
    let ir = UnitIr::from_graph(&graph).expect("valid unit");
    let backends: [&dyn Backend; 2] = [&JsonipcBackend, &V8Backend];

    let mut group = c.benchmark_group("generate");
    for backend in backends {
        group.bench_function(BenchmarkId::new(backend.name(), "lattice_6x6"), |b| {
            b.iter(|| Generator::new(black_box(&ir), backend).generate())
        });
    }
    group.finish();
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_unit");
    for width in [4, 8, 16] {
        let xml = lattice_xml(4, width);
        group.throughput(Throughput::Bytes(xml.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(width), &xml, |b, xml| {
            b.iter(|| parse_unit(black_box(xml)))
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_generate, benchmark_parse);
criterion_main!(benches);
