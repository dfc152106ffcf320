//! Compound instruction - restake pending rewards in place

use stakepool_common::{Context, PoolError};

use crate::events::PoolEvent;
use crate::state::PoolLedger;

/// Process compound instruction
///
/// Only for pools whose staking and reward assets are the same. Fails with
/// `NoRewards` when nothing is pending; otherwise the pending reward, clamped
/// to the reward pool, moves into the caller's stake without any token
/// transfer, and the lock restarts.
pub fn process_compound(pool: &mut PoolLedger, ctx: &Context) -> Result<(), PoolError> {
    let _guard = pool.lock.enter()?;
    pool.require_active()?;
    if !pool.auto_compound_enabled {
        return Err(PoolError::CompoundDisabled);
    }
    if pool.staking_asset != pool.reward_asset {
        return Err(PoolError::AssetMismatch);
    }

    let (mut reward, mut stake) = pool.checkpointed(&ctx.caller, ctx.now)?;
    if stake.rewards == 0 {
        return Err(PoolError::NoRewards);
    }
    // May be zero when the reward pool is drained; the lock still restarts
    let amount = reward.pay_out(&mut stake);
    reward.add_stake(amount)?;
    stake.balance = stake.balance.checked_add(amount).ok_or(PoolError::MathOverflow)?;
    stake.deposit_time = ctx.now;

    pool.commit(
        reward,
        Some((ctx.caller, stake)),
        vec![PoolEvent::Compounded { user: ctx.caller, amount }],
    );
    Ok(())
}
