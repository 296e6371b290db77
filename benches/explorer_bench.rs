//! Benchmarks for schema exploration
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use json_explorer::inference::{
    Document, MajorityKind, SchemaExplorer, parse_date_literal, parse_date_wrapper,
};
use serde_json::json;

/// Generate sample documents for benchmarking
fn generate_sample_documents(count: usize) -> Vec<Document> {
    (0..count)
        .filter_map(|i| {
            json!({
                "id": format!("user-{}", i),
                "name": format!("User {}", i % 50),
                "age": 20 + (i % 60),
                "balance": 1000.0 + (i as f64 * 10.5),
                "is_active": i % 2 == 0,
                "created_at": format!("2024-{:02}-{:02}T10:30:00.000000", i % 12 + 1, i % 28 + 1),
                "address": {
                    "city": format!("City {}", i % 7),
                    "zip": 10000 + (i % 900),
                },
            })
            .as_object()
            .cloned()
        })
        .collect()
}

/// Benchmark date detection and wrapper parsing
fn bench_date_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("date_parsing");

    let test_cases = vec![
        ("literal", "2024-01-15T10:30:00.000000"),
        ("short_fraction", "2024-01-15T10:30:00.5"),
        ("plain_string", "hello world"),
    ];

    for (name, value) in test_cases {
        group.bench_with_input(BenchmarkId::new("detect", name), &value, |b, value| {
            b.iter(|| black_box(parse_date_literal(value)));
        });
    }

    let wrapper = json!({"$date": "2024-01-15T10:30:00+02:00"});
    group.bench_function("wrapper", |b| {
        b.iter(|| black_box(parse_date_wrapper(&wrapper)));
    });

    group.finish();
}

/// Benchmark full analysis with varying document counts
fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");

    for count in [10, 100, 1000].iter() {
        let documents = generate_sample_documents(*count);
        group.throughput(Throughput::Elements(*count as u64));

        group.bench_with_input(
            BenchmarkId::new("first_document", count),
            &documents,
            |b, documents| {
                b.iter(|| {
                    let mut batch = documents.clone();
                    black_box(SchemaExplorer::new().analyze(&mut batch))
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("majority_kind", count),
            &documents,
            |b, documents| {
                b.iter(|| {
                    let mut batch = documents.clone();
                    let explorer = SchemaExplorer::new().with_policy(MajorityKind);
                    black_box(explorer.analyze(&mut batch))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_date_parsing, bench_analysis);
criterion_main!(benches);
