//! JSON run report

use serde::Serialize;
use stakepool_common::Pubkey;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub registry: String,
    pub pool_count: usize,
    pub pools: Vec<PoolReport>,
    pub supplies: Vec<Supply>,
}

/// Token supply of one asset before and after the run
#[derive(Debug, Clone, Serialize)]
pub struct Supply {
    pub asset: String,
    pub before: u128,
    pub after: u128,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PoolReport {
    pub name: String,
    pub key: String,
    pub applied: usize,
    pub failed: Vec<FailedAction>,
    pub events: Vec<String>,
    pub paused: bool,
    pub total_staked: u128,
    pub reward_pool: u128,
    pub reward_rate: u128,
    /// 1e18 fixed-point, decimal; wider than a JSON number can carry
    pub reward_per_share_stored: String,
    pub period_finish: u64,
    pub rewards_added: u128,
    pub rewards_drawn: u128,
    pub users: Vec<UserReport>,
    pub violations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedAction {
    pub at: u64,
    pub caller: String,
    pub instruction: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserReport {
    pub user: String,
    pub balance: u128,
    pub rewards: u128,
    pub earned: u128,
}

impl Report {
    pub fn invariants_ok(&self) -> bool {
        self.pools.iter().all(|p| p.violations.is_empty())
            && self.supplies.iter().all(|s| s.before == s.after)
    }
}

impl PoolReport {
    pub fn new(name: String, key: &Pubkey) -> Self {
        Self {
            name,
            key: display_key(key),
            ..Self::default()
        }
    }
}

/// Short names (ASCII followed by zero padding) print as the name,
/// everything else as base58
pub fn display_key(key: &Pubkey) -> String {
    let len = key.iter().position(|b| *b == 0).unwrap_or(key.len());
    let (name, padding) = key.split_at(len);
    if len > 0
        && padding.iter().all(|b| *b == 0)
        && name.iter().all(|b| b.is_ascii_graphic())
    {
        String::from_utf8_lossy(name).into_owned()
    } else {
        bs58::encode(key).into_string()
    }
}
