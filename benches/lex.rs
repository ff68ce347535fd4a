//! Lexing throughput benchmarks.
//!
//! Compares a full scan against plain UTF-8 validation of the same buffer,
//! which is a lower bound for any single pass over the input.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use watlex::wat::{scan, LexError};

const FIBONACCI: &str = include_str!("../tests/fixtures/fibonacci.wat");

fn inputs() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("example", FIBONACCI.as_bytes().to_vec()),
        ("whitespace chars", b"(                        \nmodule)\n".to_vec()),
        ("unicode line comment", "( ;; брэд-ЛГТМ   \nmodule)\n".as_bytes().to_vec()),
        ("unicode block comment", "( (; брэд-ЛГТМ ;)\nmodule)\n".as_bytes().to_vec()),
        ("nested block comments", format!("{}{}", "(;".repeat(1000), ";)".repeat(1000)).into_bytes()),
    ]
}

fn bench_lex(c: &mut Criterion) {
    let mut group = c.benchmark_group("lex");

    for (name, data) in inputs() {
        group.throughput(Throughput::Bytes(data.len() as u64));

        group.bench_with_input(BenchmarkId::new("utf8 validation", name), &data, |b, data| {
            b.iter(|| std::str::from_utf8(black_box(data)).is_ok())
        });

        group.bench_with_input(BenchmarkId::new("scan", name), &data, |b, data| {
            b.iter(|| {
                scan(black_box(data), |_, _, _, _, _, _| Ok::<_, LexError>(())).expect("valid input")
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lex);
criterion_main!(benches);
