// Secret sharing benchmarks.
//
// Covers splitting and combining a 32-byte master key at a few common
// (threshold, shares) shapes, plus raw field multiplication.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use vaultkeep_core::field::gf256;
use vaultkeep_core::sharing::{combine, split};

const SHAPES: [(usize, usize); 3] = [(2, 3), (3, 5), (5, 10)];

fn bench_split(c: &mut Criterion) {
    let secret = [0x5Au8; 32];
    let mut group = c.benchmark_group("shamir/split_32b");

    for (threshold, shares) in SHAPES {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{threshold}-of-{shares}")),
            &(threshold, shares),
            |b, &(t, n)| b.iter(|| split(black_box(&secret), n, t).unwrap()),
        );
    }
    group.finish();
}

fn bench_combine(c: &mut Criterion) {
    let secret = [0x5Au8; 32];
    let mut group = c.benchmark_group("shamir/combine_32b");

    for (threshold, shares) in SHAPES {
        let all = split(&secret, shares, threshold).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{threshold}-of-{shares}")),
            &all[..threshold],
            |b, subset| b.iter(|| combine(black_box(subset), Some(threshold)).unwrap()),
        );
    }
    group.finish();
}

fn bench_field_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("gf256");
    group.throughput(Throughput::Elements(256 * 256));
    group.bench_function("mul_all_pairs", |b| {
        b.iter(|| {
            let mut acc = 0u8;
            for x in 0..=255u8 {
                for y in 0..=255u8 {
                    acc ^= gf256::mul(black_box(x), y);
                }
            }
            acc
        });
    });
    group.finish();
}

criterion_group!(benches, bench_split, bench_combine, bench_field_mul);
criterion_main!(benches);
