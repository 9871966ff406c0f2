use alloy::primitives::U256;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use swapquote::quote::get_amount_out;

/// Random reserves/amount triples in a realistic range of base units
fn generate_quotes(count: usize) -> Vec<(U256, U256, U256)> {
    (0..count)
        .map(|_| {
            let amount_in = U256::from(fastrand::u128(1..10_u128.pow(24)));
            let reserve_in = U256::from(fastrand::u128(10_u128.pow(18)..10_u128.pow(30)));
            let reserve_out = U256::from(fastrand::u128(10_u128.pow(18)..10_u128.pow(30)));
            (amount_in, reserve_in, reserve_out)
        })
        .collect()
}

fn bench_get_amount_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_amount_out");

    for count in [1, 100, 10_000] {
        let quotes = generate_quotes(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &quotes, |b, quotes| {
            b.iter(|| {
                for (amount_in, reserve_in, reserve_out) in quotes {
                    black_box(get_amount_out(
                        black_box(*amount_in),
                        black_box(*reserve_in),
                        black_box(*reserve_out),
                    ));
                }
            });
        });
    }

    group.bench_function("full_width", |b| {
        b.iter(|| get_amount_out(black_box(U256::MAX), black_box(U256::MAX), black_box(U256::MAX)));
    });

    group.finish();
}

criterion_group!(benches, bench_get_amount_out);
criterion_main!(benches);
