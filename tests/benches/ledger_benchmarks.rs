//! # CHAMP Ledger Benchmarks
//!
//! ```bash
//! cargo bench --package champ-tests --bench ledger_benchmarks
//! cargo bench --package champ-tests --bench ledger_benchmarks -- conversion
//! ```
//!
//! | Group | Claim |
//! |-------|-------|
//! | transfer | taxed transfer cost independent of holder count |
//! | voucher | decode + signer recovery < 1ms |
//! | conversion | accrual is O(1) in the number of holders |

use champ_tests::fixtures::{addr, units, Harness, LEDGER};
use champ_token::prelude::*;
use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use rand::Rng;
use std::time::Duration;

fn holder(i: u32) -> Address {
    let mut bytes = [0u8; 20];
    bytes[0] = 0xB0;
    bytes[16..].copy_from_slice(&i.to_be_bytes());
    Address::new(bytes)
}

fn populated(holders: u32) -> Harness {
    let mut h = Harness::new();
    for i in 0..holders {
        h.fund(holder(i), units(1_000));
    }
    h
}

fn bench_transfers(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer");
    group.throughput(Throughput::Elements(1));

    for holders in [10u32, 1_000] {
        let mut h = populated(holders);
        h.fund(addr(0x20), units(500_000));
        let ctx = h.ctx(addr(0x20));
        let mut rng = rand::thread_rng();

        group.bench_with_input(BenchmarkId::new("taxed", holders), &holders, |b, &n| {
            b.iter(|| {
                let to = holder(rng.gen_range(0..n));
                black_box(h.token.transfer(&ctx, to, U256::from(1_000u64)))
            });
        });
    }
    group.finish();
}

fn bench_vouchers(c: &mut Criterion) {
    let mut group = c.benchmark_group("voucher");
    let h = Harness::new();
    let (message, signature) = h.voucher(addr(10), units(5), h.now + 600, U256::zero());

    group.bench_function("decode", |b| {
        b.iter(|| Voucher::decode(black_box(&message)));
    });
    group.bench_function("decode_and_recover", |b| {
        b.iter(|| {
            Voucher::decode(black_box(&message))
                .and_then(|voucher| voucher.recover_signer(black_box(&signature)))
        });
    });
    group.bench_function("redeem", |b| {
        b.iter_batched(
            || {
                let mut h = Harness::new();
                h.fund(LEDGER, units(100));
                let (message, signature) =
                    h.voucher(addr(10), units(1), h.now + 600, U256::zero());
                (h, message, signature)
            },
            |(mut h, message, signature)| {
                let ctx = h.ctx(addr(10));
                black_box(h.token.claim_reward_points_with_chp(&ctx, &message, &signature))
            },
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");

    for holders in [10u32, 100, 1_000] {
        group.bench_with_input(
            BenchmarkId::new("process_reflections", holders),
            &holders,
            |b, &n| {
                b.iter_batched(
                    || {
                        let mut h = populated(n);
                        let admin = h.admin();
                        let _ = h.token.transfer(&admin, addr(0xF0), units(10_000));
                        h
                    },
                    |mut h| {
                        let admin = h.admin();
                        black_box(h.token.process_reflections(&admin))
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }
    group.finish();
}

criterion_group!(
    name = ledger_benches;
    config = Criterion::default()
        .sample_size(20)
        .measurement_time(Duration::from_secs(5));
    targets = bench_transfers, bench_vouchers, bench_conversion
);

criterion_main!(ledger_benches);
