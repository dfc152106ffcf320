//! Kani proofs for the accrual and payout properties

use kani::{any, assume};
use reward_math::accrual::*;

use crate::{adversary::*, generators::*, sanitizer::*};

/// The accumulator never decreases across any sequence of moves
#[kani::proof]
#[kani::unwind(6)]
fn accumulator_is_monotonic() {
    let mut s = any_accrual().sanitize();
    let mut steps: u8 = any();
    steps = (steps % MAX_STEPS) + 1;

    for _ in 0..steps {
        let before = s.reward_per_share_stored;
        s = adversary_step(s, any(), any(), any());
        kani::assert(s.reward_per_share_stored >= before, "accumulator went backwards");
    }
}

/// Nothing accrues while nobody is staked
#[kani::proof]
fn empty_pool_accrues_nothing() {
    let mut s = any_accrual().sanitize();
    s.total_staked = 0;
    let before = s.reward_per_share_stored;
    kani::assert(s.checkpoint(), "checkpoint failed");
    kani::assert(s.reward_per_share_stored == before, "empty pool accrued");
}

/// Penalty never exceeds the withdrawn amount, and is zero once unlocked
#[kani::proof]
fn penalty_bounded_by_amount() {
    let amount = any_amount();
    let bps = any_bps();
    let locked: bool = any();

    let penalty = early_exit_penalty(amount, bps, locked);
    kani::assert(penalty.is_some(), "penalty overflowed");
    let penalty = penalty.unwrap_or(0);
    kani::assert(penalty <= amount, "penalty exceeds amount");
    if !locked {
        kani::assert(penalty == 0, "unlocked withdrawal penalized");
    }
}

/// Lock boundary: free exactly at deposit + lock, locked one second before
#[kani::proof]
fn lock_boundary_exact() {
    let deposit: u32 = any();
    let lock: u32 = any();
    assume(lock > 0);
    let unlock = deposit as u64 + lock as u64;

    kani::assert(!is_locked(unlock, deposit as u64, lock as u64), "locked at unlock time");
    kani::assert(is_locked(unlock - 1, deposit as u64, lock as u64), "unlocked early");
}

/// A payout never exceeds either the owed amount or the pool
#[kani::proof]
fn payout_clamped_to_pool() {
    let owed: u128 = any();
    let pool: u128 = any();
    let paid = clamp_payout(owed, pool);
    kani::assert(paid <= pool, "payout exceeds pool");
    kani::assert(paid <= owed, "payout exceeds owed");
    kani::assert(paid == owed || paid == pool, "payout not the minimum");
}

/// A fresh period emits at most the amount funded
#[kani::proof]
fn fresh_rate_never_overemits() {
    let amount = any_amount();
    let duration: u16 = any();
    assume(duration > 0);
    let now: u8 = any();
    let finish: u8 = any();
    assume(now >= finish);

    let rate = blended_reward_rate(amount, duration as u64, now as u64, finish as u64, any());
    kani::assert(rate.is_some(), "rate overflowed");
    let rate = rate.unwrap_or(0);
    kani::assert(rate * (duration as u128) <= amount, "period emits more than funded");
}

/// Blending never emits more than new funds plus the unspent remainder
#[kani::proof]
fn blended_rate_never_overemits() {
    let amount = any_amount();
    let duration: u8 = any();
    assume(duration > 0);
    let now: u8 = any();
    let finish: u8 = any();
    assume(now < finish);
    let current: u8 = any();

    let rate = blended_reward_rate(amount, duration as u64, now as u64, finish as u64, current as u128);
    let leftover = (finish - now) as u128 * current as u128;
    kani::assert(rate.is_some(), "rate overflowed");
    let rate = rate.unwrap_or(0);
    kani::assert(rate * (duration as u128) <= amount + leftover, "blend over-emits");
}
