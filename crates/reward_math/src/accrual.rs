//! Reward-per-share accrual, rate blending and exit penalties
//!
//! All amounts are integer token units, all times are unix seconds.
//! The accumulator is a fixed-point value scaled by [`PRECISION`] (1e18) and
//! held at 256 bits: with a tiny stake it outgrows u128 long before any real
//! token amount does. Every division floors.

use crate::math::*;
use crate::wide::{to_u128, U256};

/// Fixed-point scale of the reward-per-share accumulator (1e18)
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Basis points scale (10,000 bps = 100%)
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Largest allowed early-exit penalty
pub const MAX_PENALTY_BPS: u16 = 10_000;

/// 365 days
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Rewards stop accruing once the active period has finished
pub fn last_time_reward_applicable(now: u64, period_finish: u64) -> u64 {
    if now < period_finish { now } else { period_finish }
}

/// Current reward-per-share value
///
/// With nothing staked the stored value is returned unchanged: emission
/// seconds that elapse while the pool is empty are never credited to anyone.
pub fn reward_per_share(
    stored: U256,
    last_update_time: u64,
    applicable: u64,
    reward_rate: u128,
    total_staked: u128,
) -> Option<U256> {
    if total_staked == 0 {
        return Some(stored);
    }
    let elapsed = applicable.saturating_sub(last_update_time);
    let accrued = mul3_div_floor_wide(elapsed as u128, reward_rate, PRECISION, total_staked)?;
    stored.checked_add(accrued)
}

/// Reward owed to a staker: accrual since its last checkpoint plus what was
/// already checkpointed
///
/// This is where the accumulator narrows back to a token amount.
pub fn earned(
    balance: u128,
    reward_per_share: U256,
    reward_per_share_paid: U256,
    checkpointed: u128,
) -> Option<u128> {
    let delta = reward_per_share.checked_sub(reward_per_share_paid)?;
    let accrued = U256::from(balance).checked_mul(delta)? / U256::from(PRECISION);
    add_u128(to_u128(accrued)?, checkpointed)
}

/// Emission rate for a reward injection of `amount` spread over `duration`
///
/// While a period is still running its undistributed remainder
/// `(period_finish - now) * current_rate` is folded into the new rate.
pub fn blended_reward_rate(
    amount: u128,
    duration: u64,
    now: u64,
    period_finish: u64,
    current_rate: u128,
) -> Option<u128> {
    if duration == 0 {
        return None;
    }
    if now >= period_finish {
        return Some(amount / duration as u128);
    }
    let leftover = mul_div_floor((period_finish - now) as u128, current_rate, 1)?;
    let total = add_u128(amount, leftover)?;
    Some(total / duration as u128)
}

/// True while `now` is strictly before `deposit_time + lock_duration`
pub fn is_locked(now: u64, deposit_time: u64, lock_duration: u64) -> bool {
    now < deposit_time.saturating_add(lock_duration)
}

/// Penalty forfeited by withdrawing `amount` early (0 once unlocked)
pub fn early_exit_penalty(amount: u128, penalty_bps: u16, locked: bool) -> Option<u128> {
    if !locked || penalty_bps == 0 {
        return Some(0);
    }
    mul_div_floor(amount, penalty_bps as u128, BPS_DENOMINATOR)
}

/// A payout is capped by what is left in the reward pool
pub fn clamp_payout(owed: u128, reward_pool: u128) -> u128 {
    min_u128(owed, reward_pool)
}

/// Annualised reward rate in basis points of the staked total
///
/// Informational only; zero when nothing is staked or the period is over.
pub fn apr_bps(reward_rate: u128, total_staked: u128, now: u64, period_finish: u64) -> Option<u128> {
    if total_staked == 0 || now >= period_finish {
        return Some(0);
    }
    mul3_div_floor(reward_rate, SECONDS_PER_YEAR as u128, BPS_DENOMINATOR, total_staked)
}
