#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use stakeable_ledger::Ledger;
use stakeable_nullables::{NullClock, NullLedger};
use stakeable_stake::{rate_for, StakeEngine};
use stakeable_types::{AccountId, TokenAmount};

#[derive(Arbitrary, Debug)]
enum Op {
    Stake { account: u8, amount: u128 },
    Claim { account: u8 },
    ClaimAndWithdraw { account: u8, amount: u128 },
    Withdraw { account: u8 },
    Wait { secs: u32 },
}

/// Balance plus every stake bucket of `account`; `None` if the sum overflows.
fn held(engine: &StakeEngine<NullLedger, NullClock>, account: &AccountId) -> Option<u128> {
    let view = engine.get_stake(account);
    engine
        .ledger()
        .balance_of(account)
        .raw()
        .checked_add(view.principal.raw())?
        .checked_add(view.unclaimed_reward.raw())?
        .checked_add(view.pending_withdraw.raw())
}

// Drive the engine with arbitrary operation sequences. Nothing may panic, a
// rejected operation must leave the record and balance untouched, the stored
// rate must always match the principal, tokens held by an account grow only by
// the reward an operation settles, and `withdrawn_total` is the sum of every
// accepted claim-and-withdraw.
fuzz_target!(|ops: Vec<Op>| {
    let accounts: Vec<AccountId> = (0..4).map(|i| AccountId::new(format!("acct{i}"))).collect();
    let mut ledger = NullLedger::new(accounts[0].clone());
    for account in &accounts {
        ledger = ledger.with_balance(account.clone(), TokenAmount::new(u128::MAX / 8));
    }
    let mut engine = StakeEngine::new(ledger, NullClock::new(0));
    let mut queued = [0u128; 4];

    for op in ops.into_iter().take(256) {
        let index = match &op {
            Op::Stake { account, .. }
            | Op::Claim { account }
            | Op::ClaimAndWithdraw { account, .. }
            | Op::Withdraw { account } => usize::from(*account) % accounts.len(),
            Op::Wait { secs } => {
                engine.clock().advance(u64::from(*secs));
                continue;
            }
        };
        let account = accounts[index].clone();

        let before = engine.record(&account).cloned();
        let balance_before = engine.ledger().balance_of(&account);
        let held_before = held(&engine, &account);
        let accrued = engine.pending_reward(&account).ok().and_then(|pending| {
            pending.checked_sub(engine.get_stake(&account).unclaimed_reward)
        });

        let (failed, settles) = match op {
            Op::Stake { amount, .. } => {
                (engine.stake(&account, TokenAmount::new(amount)).is_err(), true)
            }
            Op::Claim { .. } => (engine.claim(&account).is_err(), true),
            Op::ClaimAndWithdraw { amount, .. } => {
                let failed = engine
                    .claim_and_withdraw(&account, TokenAmount::new(amount))
                    .is_err();
                if !failed {
                    queued[index] += amount;
                }
                (failed, true)
            }
            Op::Withdraw { .. } => (engine.withdraw(&account).is_err(), false),
            Op::Wait { .. } => (false, false),
        };

        if failed {
            assert_eq!(engine.record(&account).cloned(), before);
            assert_eq!(engine.ledger().balance_of(&account), balance_before);
        } else if let (Some(held_before), Some(accrued)) = (held_before, accrued) {
            let gained = if settles { accrued.raw() } else { 0 };
            assert_eq!(held(&engine, &account), held_before.checked_add(gained));
        }
        if let Some(record) = engine.record(&account) {
            assert_eq!(record.rate, rate_for(record.principal));
            assert_eq!(record.withdrawn_total.raw(), queued[index]);
        }
    }
});
