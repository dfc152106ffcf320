//! Pool instruction dispatch

use stakepool_common::{Context, KeyDisplay, PoolError};

use crate::instructions::*;
use crate::state::PoolLedger;
use crate::transfer::AssetTransfer;

/// Decode `instruction_data` and run it against `pool` on behalf of `ctx.caller`
pub fn process_instruction<T: AssetTransfer + ?Sized>(
    pool: &mut PoolLedger,
    ctx: &Context,
    instruction_data: &[u8],
    transfer: &mut T,
) -> Result<(), PoolError> {
    let instruction = PoolInstruction::unpack(instruction_data).map_err(|e| {
        log::warn!("pool {}: undecodable instruction", KeyDisplay(&pool.key));
        e
    })?;
    log::debug!("Instruction: {:?}", instruction.tag());

    match instruction {
        PoolInstruction::Initialize(config) => process_initialize(pool, &config, ctx.now),
        PoolInstruction::Stake { amount } => process_stake(pool, ctx, amount, transfer),
        PoolInstruction::Withdraw { amount } => process_withdraw(pool, ctx, amount, transfer),
        PoolInstruction::Claim => process_claim(pool, ctx, transfer),
        PoolInstruction::Exit => process_exit(pool, ctx, transfer),
        PoolInstruction::Compound => process_compound(pool, ctx),
        PoolInstruction::EmergencyUnstake => process_emergency_unstake(pool, ctx, transfer),
        PoolInstruction::AddReward { amount, duration } => {
            process_add_reward(pool, ctx, amount, duration, transfer)
        }
        PoolInstruction::SetAutoCompound { enabled } => {
            process_set_auto_compound(pool, ctx, enabled)
        }
        PoolInstruction::SetLockDuration { lock_duration } => {
            process_set_lock_duration(pool, ctx, lock_duration)
        }
        PoolInstruction::SetPenaltyBps { penalty_bps } => {
            process_set_penalty_bps(pool, ctx, penalty_bps)
        }
        PoolInstruction::SetPenaltyCollector { collector } => {
            process_set_penalty_collector(pool, ctx, collector)
        }
        PoolInstruction::Pause => process_pause(pool, ctx),
        PoolInstruction::Unpause => process_unpause(pool, ctx),
        PoolInstruction::TransferOwnership { new_owner } => {
            process_transfer_ownership(pool, ctx, new_owner)
        }
    }
}
