//! Stake instruction - deposit staking asset into the pool

use stakepool_common::{Context, PoolError};

use crate::events::PoolEvent;
use crate::state::PoolLedger;
use crate::transfer::{AssetTransfer, TransferBatch};

/// Process stake instruction
///
/// Every stake restarts the caller's lock on the whole balance, not only on
/// the new amount.
pub fn process_stake<T: AssetTransfer + ?Sized>(
    pool: &mut PoolLedger,
    ctx: &Context,
    amount: u128,
    transfer: &mut T,
) -> Result<(), PoolError> {
    let _guard = pool.lock.enter()?;
    pool.require_active()?;
    if amount == 0 {
        return Err(PoolError::ZeroAmount);
    }

    let (mut reward, mut stake) = pool.checkpointed(&ctx.caller, ctx.now)?;
    reward.add_stake(amount)?;
    stake.balance = stake.balance.checked_add(amount).ok_or(PoolError::MathOverflow)?;
    stake.deposit_time = ctx.now;

    TransferBatch::new()
        .pull(pool.staking_asset, ctx.caller, amount)
        .settle(transfer, &pool.key)?;

    pool.commit(
        reward,
        Some((ctx.caller, stake)),
        vec![PoolEvent::Staked { user: ctx.caller, amount }],
    );
    Ok(())
}
