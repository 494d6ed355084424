//! Benchmarks for snapshot classification and file fingerprinting
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fimon::diff::classify;
use fimon::scan::hasher::fingerprint_reader;
use fimon::scan::HashAlgorithm;
use fimon::snapshot::Snapshot;

fn snapshot_pair(size: usize) -> (Snapshot, Snapshot) {
    let mut baseline = Snapshot::new();
    let mut current = Snapshot::new();
    for i in 0..size {
        let digest = [(i % 251) as u8; 32];
        baseline.insert(format!("/watched/dir{}/file{}.dat", i % 64, i), digest);
        // every tenth file modified, every twentieth deleted
        if i % 20 == 0 {
            continue;
        }
        let next = if i % 10 == 0 { [0xff; 32] } else { digest };
        current.insert(format!("/watched/dir{}/file{}.dat", i % 64, i), next);
    }
    for i in 0..size / 20 {
        current.insert(format!("/watched/new/file{}.dat", i), [7; 32]);
    }
    (baseline, current)
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    for size in [1_000usize, 10_000, 100_000] {
        let (baseline, current) = snapshot_pair(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| classify(black_box(&baseline), black_box(&current)))
        });
    }
    group.finish();
}

fn bench_fingerprint(c: &mut Criterion) {
    let data = vec![0x5au8; 4 * 1024 * 1024];
    let mut group = c.benchmark_group("fingerprint_4mib");
    for algorithm in [HashAlgorithm::Sha256, HashAlgorithm::Blake3] {
        group.bench_function(algorithm.as_str(), |b| {
            b.iter(|| fingerprint_reader(black_box(data.as_slice()), algorithm))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_classify, bench_fingerprint);
criterion_main!(benches);
