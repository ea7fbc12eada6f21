//! Benchmarks for the compression pipeline.
//!
//! Benchmark groups:
//! - `dead_code_chain`: dead procedure elimination on a chain of N unused
//!   procedures, each only called by the next. Every removal restarts the
//!   scan, so time grows roughly with N^2.
//! - `compress_live`: the full pipeline on N live procedures.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use pscompress_core::lexer::Document;
use pscompress_core::passes::{DefinitionScan, eliminate_dead_procedures};
use pscompress_core::Compressor;

// =============================================================================
// Data Generation
// =============================================================================

/// `/p0 { 1 } def /p1 { p0 } def ... /pN-1 { pN-2 } def`, none called.
fn generate_dead_chain(n: usize) -> String {
    let mut src = String::from("/p0 { 1 } def\n");
    for i in 1..n {
        src.push_str(&format!("/p{i} {{ p{} 2 add }} bind def\n", i - 1));
    }
    src
}

/// N procedures, each called once after its definition.
fn generate_live(n: usize) -> String {
    let mut src = String::from("%!PS\n");
    for i in 0..n {
        src.push_str(&format!(
            "/proc{i} {{ {i} 0 moveto 10 0 rlineto stroke }} bind def % segment {i}\nproc{i}\n"
        ));
    }
    src.push_str("showpage\n%%EOF");
    src
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_dead_code_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("dead_code_chain");
    for n in [10, 50, 200] {
        let body = Document::parse(&generate_dead_chain(n)).body;
        group.bench_with_input(BenchmarkId::from_parameter(n), &body, |b, body| {
            b.iter(|| {
                let mut body = body.clone();
                eliminate_dead_procedures(black_box(&mut body), DefinitionScan::Lenient)
            })
        });
    }
    group.finish();
}

fn bench_compress_live(c: &mut Criterion) {
    let compressor = Compressor::new().expect("default configuration is valid");
    let mut group = c.benchmark_group("compress_live");
    for n in [10, 100, 1000] {
        let src = generate_live(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &src, |b, src| {
            b.iter(|| compressor.compress(black_box(src)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dead_code_chain, bench_compress_live);
criterion_main!(benches);
