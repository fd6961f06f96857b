use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use stakeable_nullables::{NullClock, NullLedger};
use stakeable_stake::accrual::settle;
use stakeable_stake::{rate_for, StakeEngine, StakeRecord};
use stakeable_types::{AccountId, Timestamp, TokenAmount, SECS_PER_HOUR, TOKEN_UNIT};

fn bench_rate_for(c: &mut Criterion) {
    let mut group = c.benchmark_group("rate_for");

    for whole in [1u128, 500, 5_000, 1_000_000] {
        let principal = TokenAmount::new(whole * TOKEN_UNIT + 123_456_789);
        group.bench_with_input(BenchmarkId::new("tokens", whole), &principal, |b, p| {
            b.iter(|| black_box(rate_for(black_box(*p))));
        });
    }

    group.finish();
}

fn bench_settle(c: &mut Criterion) {
    let mut group = c.benchmark_group("settle");

    for hours in [1u64, 729, 8_670] {
        let template = StakeRecord::open(TokenAmount::new(100 * TOKEN_UNIT), Timestamp::new(0));
        let now = Timestamp::new(hours * SECS_PER_HOUR + 17);
        group.bench_with_input(BenchmarkId::new("hours", hours), &hours, |b, _| {
            b.iter(|| {
                let mut record = template.clone();
                black_box(settle(&mut record, black_box(now)))
            });
        });
    }

    group.finish();
}

fn bench_engine_cycle(c: &mut Criterion) {
    c.bench_function("stake_claim_withdraw_cycle", |b| {
        b.iter(|| {
            let account = AccountId::new("bench");
            let ledger = NullLedger::new(account.clone())
                .with_balance(account.clone(), TokenAmount::new(1_000 * TOKEN_UNIT));
            let mut engine = StakeEngine::new(ledger, NullClock::new(0));
            engine
                .stake(&account, TokenAmount::new(100 * TOKEN_UNIT))
                .unwrap();
            engine.clock().advance_hours(729);
            engine
                .stake(&account, TokenAmount::new(100 * TOKEN_UNIT))
                .unwrap();
            engine.clock().advance_hours(24);
            let reward = engine.claim(&account).unwrap();
            engine.claim_and_withdraw(&account, reward).unwrap();
            engine.clock().advance_hours(24);
            black_box(engine.withdraw(&account).unwrap())
        });
    });
}

criterion_group!(benches, bench_rate_for, bench_settle, bench_engine_cycle);
criterion_main!(benches);
