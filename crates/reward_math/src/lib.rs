//! Pure reward-accrual arithmetic for staking pools
//! No ledger state, no unwrap/panic, every function total (overflow yields `None`)

pub mod wide;
pub mod math;
pub mod accrual;

// Re-export commonly used items
pub use math::*;
pub use accrual::*;
pub use wide::U256;
