//! Add reward instruction - fund a new emission period

use stakepool_common::{Context, PoolError};

use crate::events::PoolEvent;
use crate::state::PoolLedger;
use crate::transfer::{AssetTransfer, TransferBatch};

/// Process add reward instruction (owner only)
///
/// Pulls `amount` of reward asset from the owner and emits it linearly over
/// `duration` seconds starting now. If a period is still running its unspent
/// emission is folded into the new rate. Allowed while paused.
pub fn process_add_reward<T: AssetTransfer + ?Sized>(
    pool: &mut PoolLedger,
    ctx: &Context,
    amount: u128,
    duration: u64,
    transfer: &mut T,
) -> Result<(), PoolError> {
    let _guard = pool.lock.enter()?;
    pool.require_owner(&ctx.caller)?;
    if amount == 0 {
        return Err(PoolError::ZeroAmount);
    }
    if duration == 0 {
        return Err(PoolError::ZeroDuration);
    }

    let mut reward = pool.reward;
    reward.checkpoint(ctx.now)?;
    reward.notify_reward(amount, duration, ctx.now)?;
    if reward.reward_rate == 0 {
        log::warn!("reward {} over {}s rounds to a zero rate", amount, duration);
    }

    TransferBatch::new()
        .pull(pool.reward_asset, ctx.caller, amount)
        .settle(transfer, &pool.key)?;

    pool.commit(reward, None, vec![PoolEvent::RewardAdded { amount, duration }]);
    Ok(())
}
