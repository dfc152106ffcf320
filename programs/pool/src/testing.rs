//! Shared fixtures for the unit tests

use stakepool_common::{Context, Pubkey, UnixTimestamp};

use crate::instructions::process_initialize;
use crate::state::{PoolConfig, PoolLedger};
use crate::transfer::InMemoryLedger;

pub const POOL: Pubkey = [9; 32];
pub const STAKE_ASSET: Pubkey = [1; 32];
pub const REWARD_ASSET: Pubkey = [2; 32];
pub const OWNER: Pubkey = [3; 32];
pub const COLLECTOR: Pubkey = [4; 32];
pub const ALICE: Pubkey = [5; 32];
pub const BOB: Pubkey = [6; 32];

pub const FUNDS: u128 = 1_000_000;

pub fn config(penalty_bps: u16, lock_duration: u64, same_asset: bool) -> PoolConfig {
    PoolConfig {
        staking_asset: STAKE_ASSET,
        reward_asset: if same_asset { STAKE_ASSET } else { REWARD_ASSET },
        lock_duration,
        penalty_bps,
        owner: OWNER,
        auto_compound_enabled: same_asset,
        penalty_collector: COLLECTOR,
    }
}

/// Initialized pool at t=0 plus a token ledger where the owner and both
/// users hold `FUNDS` of every asset the pool uses
pub fn setup(penalty_bps: u16, lock_duration: u64, same_asset: bool) -> (PoolLedger, InMemoryLedger) {
    let config = config(penalty_bps, lock_duration, same_asset);
    let mut pool = PoolLedger::new(POOL, crate::ID);
    process_initialize(&mut pool, &config, 0).unwrap();
    pool.take_events();

    let mut tokens = InMemoryLedger::new();
    for holder in [OWNER, ALICE, BOB] {
        tokens.mint(&config.staking_asset, &holder, FUNDS);
        if !same_asset {
            tokens.mint(&config.reward_asset, &holder, FUNDS);
        }
    }
    (pool, tokens)
}

pub fn at(caller: Pubkey, now: UnixTimestamp) -> Context {
    Context::new(caller, now)
}
