//! Per-staker record

use reward_math::accrual::earned;
use reward_math::U256;
use stakepool_common::{PoolError, UnixTimestamp};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStake {
    /// Staked principal
    pub balance: u128,
    /// Time of the last stake or compound; the lock runs from here
    pub deposit_time: UnixTimestamp,
    /// Accumulator value at the last checkpoint
    pub reward_per_share_paid: U256,
    /// Checkpointed, not yet paid rewards
    pub rewards: u128,
}

impl UserStake {
    /// Rewards owed if the accumulator stood at `reward_per_share`
    pub fn earned(&self, reward_per_share: U256) -> Result<u128, PoolError> {
        earned(self.balance, reward_per_share, self.reward_per_share_paid, self.rewards)
            .ok_or(PoolError::MathOverflow)
    }

    /// Settle accrual into `rewards` against an already-checkpointed accumulator
    pub fn checkpoint(&mut self, reward_per_share_stored: U256) -> Result<(), PoolError> {
        self.rewards = self.earned(reward_per_share_stored)?;
        self.reward_per_share_paid = reward_per_share_stored;
        Ok(())
    }

    pub fn unlock_time(&self, lock_duration: u64) -> UnixTimestamp {
        self.deposit_time.saturating_add(lock_duration)
    }
}
