//! State space sanitizer - bounds values for Kani exploration

use crate::adversary::Accrual;

pub const MAX_STEPS: u8 = 4;

/// Bounds for tractable verification
const MAX_STAKE: u128 = 1_000_000;
const MAX_RATE: u128 = 10_000;
const MAX_TIME: u64 = 1_000;

pub trait Sanitize {
    fn sanitize(self) -> Self;
}

impl Sanitize for Accrual {
    fn sanitize(mut self) -> Accrual {
        self.total_staked %= MAX_STAKE;
        self.reward_rate %= MAX_RATE;
        self.now %= MAX_TIME;
        self.last_update_time %= MAX_TIME;
        self.period_finish %= MAX_TIME;

        // Stored time never runs ahead of the clock or the period
        if self.last_update_time > self.now {
            self.last_update_time = self.now;
        }
        if self.last_update_time > self.period_finish {
            self.last_update_time = self.period_finish;
        }
        self
    }
}
