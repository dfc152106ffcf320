//! Adversarial step function over the accrual state

use reward_math::accrual::{last_time_reward_applicable, reward_per_share};
use reward_math::U256;

/// Global accrual state reduced to what the accumulator depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accrual {
    pub total_staked: u128,
    pub reward_per_share_stored: U256,
    pub reward_rate: u128,
    pub last_update_time: u64,
    pub period_finish: u64,
    pub now: u64,
}

impl Accrual {
    /// Fold accrual up to `now` into the stored accumulator
    pub fn checkpoint(&mut self) -> bool {
        let applicable = last_time_reward_applicable(self.now, self.period_finish);
        match reward_per_share(
            self.reward_per_share_stored,
            self.last_update_time,
            applicable,
            self.reward_rate,
            self.total_staked,
        ) {
            Some(rps) => {
                self.reward_per_share_stored = rps;
                self.last_update_time = applicable;
                true
            }
            None => false,
        }
    }
}

/// One adversary move: advance the clock, then checkpoint and change the
/// staked total (a stake or a withdrawal)
pub fn adversary_step(mut s: Accrual, dt: u8, stake_delta: u8, withdraw: bool) -> Accrual {
    s.now = s.now.saturating_add(dt as u64);
    if !s.checkpoint() {
        return s;
    }
    let delta = stake_delta as u128;
    s.total_staked = if withdraw {
        s.total_staked.saturating_sub(delta)
    } else {
        s.total_staked.saturating_add(delta)
    };
    s
}
