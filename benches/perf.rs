use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use wc_winners::aggregate::WinAggregate;
use wc_winners::callbacks::{COUNTRY_DROPDOWN, CallbackRegistry, InputValue, YEAR_DROPDOWN};
use wc_winners::country_codes::CountryCodeTable;
use wc_winners::dataset::{MatchRecord, parse_matches_csv};
use wc_winners::snapshot::DashboardSnapshot;

const FINALS_CSV: &str = include_str!("../tests/fixtures/world_cup.csv");

fn scaled_records(copies: usize) -> Vec<MatchRecord> {
    let base = parse_matches_csv(FINALS_CSV).expect("valid fixture csv");
    let mut out = Vec::with_capacity(base.len() * copies);
    for copy in 0..copies {
        for record in &base {
            let mut record = record.clone();
            record.year += (copy as i32) * 100;
            out.push(record);
        }
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_finals_csv", |b| {
        b.iter(|| {
            let records = parse_matches_csv(black_box(FINALS_CSV)).unwrap();
            black_box(records.len());
        })
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let records = scaled_records(500);
    c.bench_function("aggregate_wins_11k", |b| {
        b.iter(|| {
            let aggregate = WinAggregate::from_records(black_box(&records));
            black_box(aggregate.total_wins());
        })
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let snapshot = DashboardSnapshot::build(scaled_records(1), CountryCodeTable::builtin());
    let registry = CallbackRegistry::standard().expect("standard registry");
    let country = InputValue::Text("Brazil".to_string());
    let year = InputValue::Integer(2022);

    c.bench_function("dispatch_country_change", |b| {
        b.iter(|| {
            let updates = registry.dispatch(&snapshot, COUNTRY_DROPDOWN, black_box(&country));
            black_box(updates.len());
        })
    });
    c.bench_function("dispatch_year_change", |b| {
        b.iter(|| {
            let updates = registry.dispatch(&snapshot, YEAR_DROPDOWN, black_box(&year));
            black_box(updates.len());
        })
    });
}

criterion_group!(benches, bench_parse, bench_aggregate, bench_dispatch);
criterion_main!(benches);
