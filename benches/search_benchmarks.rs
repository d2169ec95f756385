//! Performance benchmarks for contact search.
//!
//! These benchmarks measure the search engine under various conditions:
//! - Different address book sizes
//! - Exact vs fuzzy-heavy queries
//! - Different score thresholds
//! - Suggestions

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;
use tria_contacts::matching::{search, suggest, SearchOptions};
use tria_contacts::Contact;

const FIRST_NAMES: [&str; 10] = [
    "Alice", "Bob", "Carol", "Dave", "Erin", "Frank", "Grace", "Heidi", "Ivan", "Judy",
];
const LAST_NAMES: [&str; 8] = [
    "Johnson", "Smith", "Nguyen", "Garcia", "Okafor", "Larsen", "Kowalski", "Tanaka",
];

/// Deterministic address book of `size` contacts.
fn generate_contacts(size: usize) -> Vec<Contact> {
    (0..size)
        .map(|i| {
            let first = FIRST_NAMES[i % FIRST_NAMES.len()];
            let last = LAST_NAMES[(i / FIRST_NAMES.len()) % LAST_NAMES.len()];
            Contact::new(
                i as i64 + 1,
                format!("{} {}", first, last),
                format!("{}.{}{}@example.com", first.to_lowercase(), last.to_lowercase(), i),
                format!("555-{:04}", i % 10_000),
            )
        })
        .collect()
}

/// Benchmark search over growing address books.
fn bench_search_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_sizes");
    let options = SearchOptions::default();

    for size in [100, 1_000, 5_000].iter() {
        let contacts = generate_contacts(*size);

        group.bench_with_input(BenchmarkId::new("exact", size), &contacts, |b, contacts| {
            b.iter(|| search(black_box(contacts), black_box("smith"), &options));
        });
        group.bench_with_input(BenchmarkId::new("fuzzy", size), &contacts, |b, contacts| {
            b.iter(|| search(black_box(contacts), black_box("jonhson"), &options));
        });
    }

    group.finish();
}

/// Benchmark search with different score thresholds.
fn bench_search_thresholds(c: &mut Criterion) {
    let contacts = generate_contacts(1_000);
    let mut group = c.benchmark_group("search_thresholds");

    for threshold in [0.1, 0.3, 0.6, 0.9].iter() {
        let options = SearchOptions {
            threshold: *threshold,
            ..Default::default()
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(threshold),
            &options,
            |b, options| {
                b.iter(|| search(black_box(&contacts), black_box("grase"), options));
            },
        );
    }

    group.finish();
}

/// Benchmark type-ahead suggestions.
fn bench_suggest(c: &mut Criterion) {
    let contacts = generate_contacts(5_000);

    c.bench_function("suggest_5000", |b| {
        b.iter(|| suggest(black_box(&contacts), black_box("ka"), 5));
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(50);
    targets = bench_search_sizes,
        bench_search_thresholds,
        bench_suggest
}

criterion_main!(benches);
