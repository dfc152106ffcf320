//! Pool-wide reward accumulator and the checkpoint step

use reward_math::accrual::{
    blended_reward_rate, clamp_payout, last_time_reward_applicable, reward_per_share,
};
use reward_math::U256;
use stakepool_common::{PoolError, UnixTimestamp};

use super::UserStake;

/// Global accrual state of one pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewardState {
    /// Sum of all staked balances
    pub total_staked: u128,
    /// Accumulated reward per staked unit (1e18 fixed-point), never decreases
    pub reward_per_share_stored: U256,
    /// Reward units emitted per second during the active period
    pub reward_rate: u128,
    /// Time up to which `reward_per_share_stored` is current
    pub last_update_time: UnixTimestamp,
    /// End of the active emission period
    pub period_finish: UnixTimestamp,
    /// Reward units held for payout; hard ceiling on every payment
    pub reward_pool: u128,
}

impl RewardState {
    pub fn last_time_reward_applicable(&self, now: UnixTimestamp) -> UnixTimestamp {
        last_time_reward_applicable(now, self.period_finish)
    }

    pub fn reward_per_share(&self, now: UnixTimestamp) -> Result<U256, PoolError> {
        reward_per_share(
            self.reward_per_share_stored,
            self.last_update_time,
            self.last_time_reward_applicable(now),
            self.reward_rate,
            self.total_staked,
        )
        .ok_or(PoolError::MathOverflow)
    }

    /// Fold accrual up to `now` into the stored accumulator
    ///
    /// Must run before `total_staked` changes so the elapsed window is priced
    /// at the stake level that was actually in force.
    pub fn checkpoint(&mut self, now: UnixTimestamp) -> Result<(), PoolError> {
        self.reward_per_share_stored = self.reward_per_share(now)?;
        self.last_update_time = self.last_time_reward_applicable(now);
        Ok(())
    }

    /// Start a new emission period funded with `amount`
    ///
    /// Caller checkpoints first. Leftover emission of a running period is
    /// blended into the new rate.
    pub fn notify_reward(
        &mut self,
        amount: u128,
        duration: u64,
        now: UnixTimestamp,
    ) -> Result<(), PoolError> {
        self.reward_rate =
            blended_reward_rate(amount, duration, now, self.period_finish, self.reward_rate)
                .ok_or(PoolError::MathOverflow)?;
        self.reward_pool = self
            .reward_pool
            .checked_add(amount)
            .ok_or(PoolError::MathOverflow)?;
        self.last_update_time = now;
        self.period_finish = now.checked_add(duration).ok_or(PoolError::MathOverflow)?;
        Ok(())
    }

    /// Pay out a checkpointed user's rewards, capped by the pool
    ///
    /// Returns the amount actually paid; `reward_pool` and the user's
    /// `rewards` both drop by exactly that amount.
    pub fn pay_out(&mut self, stake: &mut UserStake) -> u128 {
        let paid = clamp_payout(stake.rewards, self.reward_pool);
        self.reward_pool -= paid;
        stake.rewards -= paid;
        paid
    }

    pub fn add_stake(&mut self, amount: u128) -> Result<(), PoolError> {
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(PoolError::MathOverflow)?;
        Ok(())
    }

    pub fn remove_stake(&mut self, amount: u128) -> Result<(), PoolError> {
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(PoolError::MathOverflow)?;
        Ok(())
    }
}
