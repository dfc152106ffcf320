//! Owner-only administrative instructions
//!
//! None of these touch per-user reward state, so none of them checkpoint.
//! All of them keep working while the pool is paused.

use reward_math::accrual::MAX_PENALTY_BPS;
use stakepool_common::{is_null, Context, PoolError, Pubkey};

use crate::events::PoolEvent;
use crate::state::PoolLedger;

/// Process set auto compound instruction
///
/// Enabling requires the staking and reward assets to be the same.
pub fn process_set_auto_compound(
    pool: &mut PoolLedger,
    ctx: &Context,
    enabled: bool,
) -> Result<(), PoolError> {
    let _guard = pool.lock.enter()?;
    pool.require_owner(&ctx.caller)?;
    if enabled && pool.staking_asset != pool.reward_asset {
        return Err(PoolError::AssetMismatch);
    }

    pool.auto_compound_enabled = enabled;
    pool.publish(vec![PoolEvent::AutoCompoundSet { enabled }]);
    Ok(())
}

/// Process set lock duration instruction
///
/// Applies to existing deposits too: unlock time is always derived from the
/// current duration.
pub fn process_set_lock_duration(
    pool: &mut PoolLedger,
    ctx: &Context,
    lock_duration: u64,
) -> Result<(), PoolError> {
    let _guard = pool.lock.enter()?;
    pool.require_owner(&ctx.caller)?;

    pool.lock_duration = lock_duration;
    pool.publish(vec![PoolEvent::LockDurationSet { lock_duration }]);
    Ok(())
}

pub fn process_set_penalty_bps(
    pool: &mut PoolLedger,
    ctx: &Context,
    penalty_bps: u16,
) -> Result<(), PoolError> {
    let _guard = pool.lock.enter()?;
    pool.require_owner(&ctx.caller)?;
    if penalty_bps > MAX_PENALTY_BPS {
        return Err(PoolError::PenaltyTooHigh);
    }

    pool.penalty_bps = penalty_bps;
    pool.publish(vec![PoolEvent::PenaltyBpsSet { penalty_bps }]);
    Ok(())
}

pub fn process_set_penalty_collector(
    pool: &mut PoolLedger,
    ctx: &Context,
    collector: Pubkey,
) -> Result<(), PoolError> {
    let _guard = pool.lock.enter()?;
    pool.require_owner(&ctx.caller)?;
    if is_null(&collector) {
        return Err(PoolError::NullPrincipal);
    }

    pool.penalty_collector = collector;
    pool.publish(vec![PoolEvent::PenaltyCollectorSet { collector }]);
    Ok(())
}

/// Process pause instruction
///
/// Blocks stake, withdraw, exit, claim and compound. Admin operations,
/// reward funding and emergency unstake stay available.
pub fn process_pause(pool: &mut PoolLedger, ctx: &Context) -> Result<(), PoolError> {
    let _guard = pool.lock.enter()?;
    pool.require_owner(&ctx.caller)?;
    if pool.paused {
        return Err(PoolError::Paused);
    }

    pool.paused = true;
    pool.publish(vec![PoolEvent::Paused { by: ctx.caller }]);
    Ok(())
}

pub fn process_unpause(pool: &mut PoolLedger, ctx: &Context) -> Result<(), PoolError> {
    let _guard = pool.lock.enter()?;
    pool.require_owner(&ctx.caller)?;
    if !pool.paused {
        return Err(PoolError::NotPaused);
    }

    pool.paused = false;
    pool.publish(vec![PoolEvent::Unpaused { by: ctx.caller }]);
    Ok(())
}

/// Process transfer ownership instruction
pub fn process_transfer_ownership(
    pool: &mut PoolLedger,
    ctx: &Context,
    new_owner: Pubkey,
) -> Result<(), PoolError> {
    let _guard = pool.lock.enter()?;
    pool.require_owner(&ctx.caller)?;
    if is_null(&new_owner) {
        return Err(PoolError::NullPrincipal);
    }

    let previous = pool.owner;
    pool.owner = new_owner;
    pool.publish(vec![PoolEvent::OwnershipTransferred { previous, owner: new_owner }]);
    Ok(())
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;
