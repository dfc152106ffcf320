//! Invariant checking helpers

use crate::state::{PoolLedger, PoolSnapshot};

/// Conservation: total staked equals the sum of all balances
pub fn conservation_ok(pool: &PoolLedger) -> bool {
    let mut sum: u128 = 0;
    for (_, stake) in pool.users() {
        sum = match sum.checked_add(stake.balance) {
            Some(s) => s,
            None => return false,
        };
    }
    sum == pool.total_staked()
}

/// Penalty rate stays within 0..=10_000 bps
pub fn penalty_in_range(pool: &PoolLedger) -> bool {
    pool.penalty_bps <= reward_math::accrual::MAX_PENALTY_BPS
}

/// The accumulator never moves backwards between two states
pub fn accumulator_monotonic(before: &PoolSnapshot, after: &PoolSnapshot) -> bool {
    after.info.reward_per_share_stored >= before.info.reward_per_share_stored
}

/// Reward units that left the pool between two states
///
/// Deposits into the pool (reward added) count as zero.
pub fn rewards_drawn(before: &PoolSnapshot, after: &PoolSnapshot) -> u128 {
    before.info.reward_pool.saturating_sub(after.info.reward_pool)
}

/// Every ledger-level invariant at once
pub fn all_ok(pool: &PoolLedger) -> bool {
    conservation_ok(pool) && penalty_in_range(pool)
}
