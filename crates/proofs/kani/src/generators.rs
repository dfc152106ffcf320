//! Generators for arbitrary accrual state (for Kani)

#[cfg(kani)]
use kani::any;

#[cfg(kani)]
use reward_math::U256;

#[cfg(kani)]
use crate::adversary::Accrual;

// Small bounds keep the SAT problems fast
#[cfg(kani)]
const MAX_VAL: u128 = 100;

#[cfg(kani)]
pub fn any_accrual() -> Accrual {
    let staked_raw: u8 = any();
    let rate_raw: u8 = any();
    let rps_raw: u8 = any();
    let last_raw: u8 = any();
    let finish_raw: u8 = any();
    let now_raw: u8 = any();

    Accrual {
        total_staked: (staked_raw as u128) % MAX_VAL,
        reward_per_share_stored: U256::from(rps_raw),
        reward_rate: (rate_raw as u128) % MAX_VAL,
        last_update_time: last_raw as u64,
        period_finish: finish_raw as u64,
        now: now_raw as u64,
    }
}

#[cfg(kani)]
pub fn any_amount() -> u128 {
    let raw: u16 = any();
    raw as u128
}

#[cfg(kani)]
pub fn any_bps() -> u16 {
    let raw: u16 = any();
    raw % 10_001
}
