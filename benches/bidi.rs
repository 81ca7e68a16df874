//! Bidi preparation and level resolution benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use unibidi::{BidiData, BidiResolver};

fn samples() -> Vec<(&'static str, String)> {
    vec![
        ("ltr", "The quick brown fox jumps over the lazy dog. ".repeat(20)),
        (
            "rtl",
            "\u{5E9}\u{5DC}\u{5D5}\u{5DD} \u{5E2}\u{5D5}\u{5DC}\u{5DD} ".repeat(40),
        ),
        (
            "mixed",
            "abc (\u{5D0}\u{5D1}\u{5D2} 123) \u{627}\u{644}\u{639}\u{631}\u{628}\u{64A}\u{629} 4.5 "
                .repeat(20),
        ),
        (
            "isolates",
            "x \u{2067}\u{5D0}\u{5D1} [1]\u{2069} \u{202B}y z\u{202C} ".repeat(30),
        ),
    ]
}

fn prepare(c: &mut Criterion) {
    let mut group = c.benchmark_group("bidi_prepare");
    let mut data = BidiData::new();
    for (name, text) in samples() {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("init", name), &text, |b, text| {
            b.iter(|| data.init(black_box(text)));
        });
    }
    group.finish();
}

fn resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("bidi_resolve");
    let mut resolver = BidiResolver::new();
    for (name, text) in samples() {
        let mut data = BidiData::new();
        data.init(&text);
        let mut out = Default::default();
        group.throughput(Throughput::Elements(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("resolve", name), &data, |b, data| {
            b.iter(|| resolver.resolve_into(black_box(data), None, &mut out));
        });
    }
    group.finish();
}

fn reorder(c: &mut Criterion) {
    let mut data = BidiData::new();
    data.init(&"abc \u{5D0}\u{5D1}\u{5D2} 123 ".repeat(50));
    let resolved = BidiResolver::new().resolve(&data, None);
    c.bench_function("bidi_visual_order", |b| {
        b.iter(|| black_box(&resolved).visual_order());
    });
}

criterion_group!(benches, prepare, resolve, reorder);
criterion_main!(benches);
