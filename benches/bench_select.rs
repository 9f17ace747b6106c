use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use triplequery::{
    Column, SearchMethod, Table, clean,
    fixtures::{TripleKind, dummy_triples},
    search, select,
};

const ATTR_SEED: u64 = 0xA771;
const SAMPLE_SIZE: usize = 20;
const WARM_UP: Duration = Duration::from_millis(300);
const MEASURE: Duration = Duration::from_millis(500);

fn bench_scale() -> usize {
    #[cfg(feature = "bench-ci")]
    {
        10_000
    }
    #[cfg(not(feature = "bench-ci"))]
    {
        100_000
    }
}

fn cleaned_attributes() -> Table {
    let mut table = dummy_triples(bench_scale(), TripleKind::Attribute, ATTR_SEED);
    clean(&mut table).expect("clean");
    table
}

fn bench_clean(c: &mut Criterion) {
    let raw = dummy_triples(bench_scale(), TripleKind::Attribute, ATTR_SEED);
    let mut group = c.benchmark_group("clean");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    group.bench_function("attributes", |b| {
        b.iter(|| {
            let mut table = raw.clone();
            clean(&mut table).expect("clean").len()
        });
    });
    group.finish();
}

fn bench_select(c: &mut Criterion) {
    let table = cleaned_attributes();
    let many: Vec<String> = (0..100).map(|idx| format!("e{}", idx * 7)).collect();
    let mut group = c.benchmark_group("select");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    group.bench_function("single", |b| {
        b.iter(|| select(&table, "e42", Column::Head).expect("select"));
    });
    group.bench_function("many", |b| {
        b.iter(|| select(&table, &many, Column::Head).expect("select"));
    });
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let table = cleaned_attributes();
    let mut group = c.benchmark_group("search");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for (label, method) in [
        ("exact", SearchMethod::Exact),
        ("substring", SearchMethod::Substring),
        ("close", SearchMethod::Close),
    ] {
        group.bench_function(label, |b| {
            b.iter(|| search(&table, "Rupert Everett", method).expect("search"));
        });
    }
    group.finish();
}

criterion_group!(
    name = select_benches;
    config = Criterion::default();
    targets = bench_clean, bench_select, bench_search
);
criterion_main!(select_benches);
