//! Hamming(7,4) data codec benchmarks.
//!
//! Run with: cargo bench --bench hamming
//! Add `--features parallel` to measure the rayon path.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hamming74::{decode_data, encode_data};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

fn random_bytes(len: usize) -> Vec<u8> {
    let mut data = vec![0u8; len];
    StdRng::seed_from_u64(len as u64).fill_bytes(&mut data);
    data
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_data");

    for size in [1 << 10, 1 << 16, 1 << 20] {
        let data = random_bytes(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| encode_data(black_box(data)))
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_data");

    for size in [1 << 10, 1 << 16, 1 << 20] {
        let encoded = encode_data(&random_bytes(size));
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &encoded, |b, encoded| {
            b.iter(|| decode_data(black_box(encoded)))
        });
    }

    group.finish();
}

fn bench_round_trip(c: &mut Criterion) {
    let data = random_bytes(1 << 20);
    let mut group = c.benchmark_group("round_trip");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("1MiB", |b| {
        b.iter(|| decode_data(&encode_data(black_box(&data))))
    });
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_round_trip);
criterion_main!(benches);
