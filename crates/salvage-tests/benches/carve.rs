use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use salvage_decoder::{decompress_archive, BsonDecoder, Carver, Compression, RecordDecoder};
use salvage_driver::{SalvageConfig, Salvager};
use salvage_tests::application_dump;

fn bench_decode_document(c: &mut Criterion) {
    let archive = application_dump(1).finish().unwrap();
    let carved = Carver::new().scan(&archive);
    let user = &archive[carved.records[4].offset..][..carved.records[4].len];

    c.bench_function("decode_user_document", |b| {
        b.iter(|| BsonDecoder::default().decode(user).unwrap());
    });
}

fn bench_carve_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("carve_throughput");

    for users in [100, 1_000, 10_000] {
        let archive = application_dump(users).finish().unwrap();
        group.throughput(Throughput::Bytes(archive.len() as u64));
        group.bench_with_input(BenchmarkId::new("clean", users), &archive, |b, a| {
            b.iter(|| Carver::new().scan(a));
        });
    }

    group.finish();
}

fn bench_carve_noise(c: &mut Criterion) {
    // Worst case for the scanner: no documents, every offset probed.
    let mut group = c.benchmark_group("carve_noise");
    for size_kb in [64, 1024] {
        let noise: Vec<u8> = (0..size_kb * 1024).map(|i| (i * 31 % 251) as u8).collect();
        group.throughput(Throughput::Bytes(noise.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("pseudo_random", format!("{size_kb}kb")),
            &noise,
            |b, n| b.iter(|| Carver::new().scan(n)),
        );
    }
    group.finish();
}

fn bench_recover(c: &mut Criterion) {
    let gzip = application_dump(1_000).finish_gzip().unwrap();
    let salvager = Salvager::new(SalvageConfig::default());

    c.bench_function("decompress_and_recover_1000_users", |b| {
        b.iter(|| {
            let buffer = decompress_archive(&gzip, Compression::Auto, u64::MAX).unwrap();
            salvager.recover(&buffer)
        });
    });
}

criterion_group!(
    benches,
    bench_decode_document,
    bench_carve_throughput,
    bench_carve_noise,
    bench_recover
);
criterion_main!(benches);
