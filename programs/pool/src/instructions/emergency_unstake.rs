//! Emergency unstake - principal out, no reward accounting

use stakepool_common::{Context, PoolError};

use crate::events::PoolEvent;
use crate::state::PoolLedger;
use crate::transfer::{AssetTransfer, TransferBatch};

/// Process emergency unstake instruction
///
/// Works while paused and skips the checkpoint entirely. The caller gets the
/// whole balance back with no penalty. `rewards` and the paid snapshot are
/// left untouched, so rewards checkpointed before stay claimable after a
/// later re-stake.
pub fn process_emergency_unstake<T: AssetTransfer + ?Sized>(
    pool: &mut PoolLedger,
    ctx: &Context,
    transfer: &mut T,
) -> Result<(), PoolError> {
    let _guard = pool.lock.enter()?;
    pool.require_initialized()?;

    let mut stake = pool.user(&ctx.caller);
    let amount = stake.balance;
    if amount == 0 {
        return Err(PoolError::ZeroAmount);
    }
    let mut reward = pool.reward;
    reward.remove_stake(amount)?;
    stake.balance = 0;

    TransferBatch::new()
        .send(pool.staking_asset, ctx.caller, amount)
        .settle(transfer, &pool.key)?;

    pool.commit(
        reward,
        Some((ctx.caller, stake)),
        vec![PoolEvent::EmergencyUnstaked { user: ctx.caller, amount }],
    );
    Ok(())
}
