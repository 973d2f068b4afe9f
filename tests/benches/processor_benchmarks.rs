//! # Ingestion Benchmarks
//!
//! | Benchmark | Measures |
//! |-----------|----------|
//! | process_stream | end-to-end derivation of a mixed stream |
//! | alias_resolution | cached alias lookups against a seeded store |
//! | allowance_batch | last-wins reconciliation of large approvals |

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mn_01_entity_derivation::{EntityIdService, ParserConfig, RecordItemApi, RecordingListener};
use mn_tests::fixtures::{approve_allowances, processor, sample_stream};
use shared_types::{AccountId, EntityId};

// ============================================================================
// End-to-end processing
// ============================================================================

fn bench_process_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("process-stream");
    group.measurement_time(Duration::from_secs(10));

    for rounds in [10i64, 100, 500] {
        let items = sample_stream(rounds);
        group.throughput(Throughput::Elements(items.len() as u64));
        group.bench_with_input(BenchmarkId::new("mixed", rounds), &items, |b, items| {
            b.iter(|| {
                let (processor, _) = processor(ParserConfig::default());
                let mut listener = RecordingListener::new();
                processor.process_all(items, &mut listener).unwrap();
                black_box(listener.len())
            })
        });
    }

    group.finish();
}

// ============================================================================
// Alias resolution
// ============================================================================

fn bench_alias_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("alias-resolution");

    let (_, resolver) = processor(ParserConfig::default());
    let aliases: Vec<Vec<u8>> = (0..1_000u32)
        .map(|i| {
            let mut alias = vec![0x02; 33];
            alias[..4].copy_from_slice(&i.to_be_bytes());
            alias
        })
        .collect();
    for (num, alias) in aliases.iter().enumerate() {
        resolver
            .store()
            .insert_alias(alias, EntityId::num(10_000 + num as i64));
    }

    group.throughput(Throughput::Elements(aliases.len() as u64));
    group.bench_function("cached_lookup", |b| {
        b.iter(|| {
            for alias in &aliases {
                black_box(resolver.lookup_account(&AccountId::alias(alias.clone())).unwrap());
            }
        })
    });

    group.finish();
}

// ============================================================================
// Allowance reconciliation
// ============================================================================

fn bench_allowance_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("allowance-batch");

    for size in [10i64, 100, 1_000] {
        let grants: Vec<_> = (0..size)
            .map(|i| (1_001 + i % 7, 2_001 + i % 13, i))
            .collect();
        let item = approve_allowances(1, &grants);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("approve", size), &item, |b, item| {
            let (processor, _) = processor(ParserConfig::default());
            b.iter(|| {
                let mut listener = RecordingListener::new();
                processor.process(item, &mut listener).unwrap();
                black_box(listener.len())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_process_stream,
    bench_alias_resolution,
    bench_allowance_batch
);
criterion_main!(benches);
