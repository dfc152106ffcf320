//! Claim instruction - pay out pending rewards

use stakepool_common::{Context, PoolError};

use crate::events::PoolEvent;
use crate::state::PoolLedger;
use crate::transfer::{AssetTransfer, TransferBatch};

/// Process claim instruction
///
/// Pays `min(rewards, reward_pool)`. Nothing owed is not an error: the
/// checkpoint still commits and no transfer or event is produced.
pub fn process_claim<T: AssetTransfer + ?Sized>(
    pool: &mut PoolLedger,
    ctx: &Context,
    transfer: &mut T,
) -> Result<(), PoolError> {
    let _guard = pool.lock.enter()?;
    pool.require_active()?;

    let (mut reward, mut stake) = pool.checkpointed(&ctx.caller, ctx.now)?;
    let paid = reward.pay_out(&mut stake);

    TransferBatch::new()
        .send(pool.reward_asset, ctx.caller, paid)
        .settle(transfer, &pool.key)?;

    let events = if paid > 0 {
        vec![PoolEvent::RewardPaid { user: ctx.caller, amount: paid }]
    } else {
        Vec::new()
    };
    pool.commit(reward, Some((ctx.caller, stake)), events);
    Ok(())
}
