//! Rating throughput: uniques parsed and forces computed per second.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use forcecalc::force::{compute_base_force, Domain, UnitStats};
use forcecalc::uniques::parse_uniques;

fn sample_uniques() -> Vec<String> {
    [
        "[+25]% Strength <vs cities>",
        "[-10]% Strength <vs [Mounted] units>",
        "Must set up to ranged attack",
        "May Paradrop up to [5] tiles",
        "Founds a new city",
        "[1] additional attack per turn",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn bench_parse(c: &mut Criterion) {
    let uniques = sample_uniques();
    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Elements(uniques.len() as u64));
    group.bench_function("parse_uniques", |b| {
        b.iter(|| parse_uniques(black_box(&uniques)))
    });
    group.finish();
}

fn bench_compute(c: &mut Criterion) {
    let stats = UnitStats::ranged(20.0, 28.0, 4.0).with_domain(Domain::Water);
    let modifiers = parse_uniques(&sample_uniques());
    let mut group = c.benchmark_group("compute");
    group.throughput(Throughput::Elements(1));
    group.bench_function("compute_base_force", |b| {
        b.iter(|| compute_base_force(black_box(&stats), black_box(&modifiers)))
    });
    group.finish();
}

criterion_group!(benches, bench_parse, bench_compute);
criterion_main!(benches);
