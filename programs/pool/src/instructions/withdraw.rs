//! Withdraw and exit instructions

use reward_math::accrual::{early_exit_penalty, is_locked};
use stakepool_common::{Context, KeyDisplay, PoolError};

use crate::events::PoolEvent;
use crate::state::PoolLedger;
use crate::transfer::{AssetTransfer, TransferBatch};

/// Process withdraw instruction
///
/// Removes `amount` of principal and settles pending rewards in one batch.
/// Inside the lock window `amount * penalty_bps / 10_000` of the principal
/// goes to the penalty collector; the full `amount` leaves the stake either
/// way. Zero-valued legs are skipped.
pub fn process_withdraw<T: AssetTransfer + ?Sized>(
    pool: &mut PoolLedger,
    ctx: &Context,
    amount: u128,
    transfer: &mut T,
) -> Result<(), PoolError> {
    let _guard = pool.lock.enter()?;
    withdraw(pool, ctx, amount, transfer)
}

/// Process exit instruction: withdraw the caller's whole balance
pub fn process_exit<T: AssetTransfer + ?Sized>(
    pool: &mut PoolLedger,
    ctx: &Context,
    transfer: &mut T,
) -> Result<(), PoolError> {
    let _guard = pool.lock.enter()?;
    let amount = pool.balance_of(&ctx.caller);
    withdraw(pool, ctx, amount, transfer)
}

fn withdraw<T: AssetTransfer + ?Sized>(
    pool: &mut PoolLedger,
    ctx: &Context,
    amount: u128,
    transfer: &mut T,
) -> Result<(), PoolError> {
    pool.require_active()?;
    if amount == 0 {
        return Err(PoolError::ZeroAmount);
    }
    if amount > pool.balance_of(&ctx.caller) {
        log::warn!(
            "pool {}: {} tried to withdraw {} of {}",
            KeyDisplay(&pool.key),
            KeyDisplay(&ctx.caller),
            amount,
            pool.balance_of(&ctx.caller)
        );
        return Err(PoolError::InsufficientBalance);
    }

    let (mut reward, mut stake) = pool.checkpointed(&ctx.caller, ctx.now)?;

    let locked = is_locked(ctx.now, stake.deposit_time, pool.lock_duration);
    let penalty = early_exit_penalty(amount, pool.penalty_bps, locked)
        .ok_or(PoolError::MathOverflow)?;
    let principal = amount - penalty;

    reward.remove_stake(amount)?;
    stake.balance -= amount;
    let paid = reward.pay_out(&mut stake);

    TransferBatch::new()
        .send(pool.reward_asset, ctx.caller, paid)
        .send(pool.staking_asset, pool.penalty_collector, penalty)
        .send(pool.staking_asset, ctx.caller, principal)
        .settle(transfer, &pool.key)?;

    let mut events = Vec::with_capacity(3);
    if paid > 0 {
        events.push(PoolEvent::RewardPaid { user: ctx.caller, amount: paid });
    }
    if penalty > 0 {
        events.push(PoolEvent::PenaltySent { collector: pool.penalty_collector, amount: penalty });
    }
    events.push(PoolEvent::Withdrawn { user: ctx.caller, principal, reward: paid, penalty });

    pool.commit(reward, Some((ctx.caller, stake)), events);
    Ok(())
}

#[cfg(test)]
#[path = "withdraw_test.rs"]
mod withdraw_test;
