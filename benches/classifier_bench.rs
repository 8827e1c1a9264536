//! Classifier benchmarks.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `classify` | One frame of each kind, including the fall-through paths |
//! | `batch` | Logs exports with a growing number of records |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench classifier_bench
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use otail::classify;
use std::hint::black_box;

const LOGS: &str = r#"{"resourceLogs":[{"resource":{"attributes":[{"key":"service.name","value":{"stringValue":"checkout"}}]},"scopeLogs":[{"logRecords":[{"severityText":"INFO","body":{"stringValue":"order placed"}}]}]}]}"#;
const METRICS: &str = r#"{"resourceMetrics":[{"scopeMetrics":[{"metrics":[{"name":"cpu","gauge":{"dataPoints":[{"asDouble":0.5}]}}]}]}]}"#;
const TRACES: &str = r#"{"resourceSpans":[{"scopeSpans":[{"spans":[{"name":"GET /","traceId":"5b8efff798038103d269b633813fc60c"}]}]}]}"#;
const GENERIC: &str = r#"{"hello":"world","nested":{"a":[1,2,3]}}"#;
const RAW: &[u8] = b"definitely not json \x01\x02";

fn classify_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    // Traces and generic JSON pay for the failed logs/metrics attempts first.
    let frames: [(&str, &[u8]); 5] = [
        ("logs", LOGS.as_bytes()),
        ("metrics", METRICS.as_bytes()),
        ("traces", TRACES.as_bytes()),
        ("generic_json", GENERIC.as_bytes()),
        ("raw", RAW),
    ];
    for (name, frame) in frames {
        group.throughput(Throughput::Bytes(frame.len() as u64));
        group.bench_function(name, |b| b.iter(|| black_box(classify(black_box(frame)))));
    }

    group.finish();
}

fn logs_export(records: usize) -> Vec<u8> {
    let records: Vec<String> = (0..records)
        .map(|i| format!(r#"{{"severityText":"INFO","body":{{"stringValue":"record {i}"}}}}"#))
        .collect();
    format!(
        r#"{{"resourceLogs":[{{"scopeLogs":[{{"logRecords":[{}]}}]}}]}}"#,
        records.join(",")
    )
    .into_bytes()
}

fn batch_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");

    for records in [10usize, 100, 1_000] {
        let frame = logs_export(records);
        group.throughput(Throughput::Elements(records as u64));
        group.bench_with_input(BenchmarkId::new("logs_records", records), &frame, |b, frame| {
            b.iter(|| black_box(classify(frame).line_count()))
        });
    }

    group.finish();
}

criterion_group!(benches, classify_bench, batch_bench);
criterion_main!(benches);
