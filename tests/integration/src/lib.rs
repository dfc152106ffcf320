//! Stake pool integration tests
//!
//! Drives pools end to end through the public `process_*` operations with an
//! in-memory token ledger. The harness here is shared by the files under
//! `tests/`.

pub use reward_math;
pub use stakepool_common;
pub use stakepool_pool;
pub use stakepool_registry;

use stakepool_common::{Context, PoolError, Pubkey, UnixTimestamp};
use stakepool_pool::*;

pub const POOL: Pubkey = [0xA0; 32];
pub const STAKE: Pubkey = [0x01; 32];
pub const REWARD: Pubkey = [0x02; 32];
pub const OWNER: Pubkey = [0x03; 32];
pub const COLLECTOR: Pubkey = [0x04; 32];
pub const ALICE: Pubkey = [0x05; 32];
pub const BOB: Pubkey = [0x06; 32];
pub const CAROL: Pubkey = [0x07; 32];

pub const FUNDS: u128 = 1_000_000_000;

pub fn config(penalty_bps: u16, lock_duration: u64, same_asset: bool) -> PoolConfig {
    PoolConfig {
        staking_asset: STAKE,
        reward_asset: if same_asset { STAKE } else { REWARD },
        lock_duration,
        penalty_bps,
        owner: OWNER,
        auto_compound_enabled: same_asset,
        penalty_collector: COLLECTOR,
    }
}

/// One initialized pool plus the token ledger it settles against
pub struct TestPool {
    pub pool: PoolLedger,
    pub tokens: InMemoryLedger,
}

impl TestPool {
    /// Pool initialized at t=0; owner and users hold `FUNDS` of both assets
    pub fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let mut pool = PoolLedger::new(POOL, stakepool_pool::ID);
        process_initialize(&mut pool, &config, 0)?;
        let mut tokens = InMemoryLedger::new();
        for holder in [OWNER, ALICE, BOB, CAROL] {
            tokens.mint(&STAKE, &holder, FUNDS);
            tokens.mint(&REWARD, &holder, FUNDS);
        }
        pool.take_events();
        Ok(Self { pool, tokens })
    }

    pub fn stake(&mut self, user: Pubkey, amount: u128, now: UnixTimestamp) -> Result<(), PoolError> {
        process_stake(&mut self.pool, &Context::new(user, now), amount, &mut self.tokens)
    }

    pub fn withdraw(&mut self, user: Pubkey, amount: u128, now: UnixTimestamp) -> Result<(), PoolError> {
        process_withdraw(&mut self.pool, &Context::new(user, now), amount, &mut self.tokens)
    }

    pub fn exit(&mut self, user: Pubkey, now: UnixTimestamp) -> Result<(), PoolError> {
        process_exit(&mut self.pool, &Context::new(user, now), &mut self.tokens)
    }

    pub fn claim(&mut self, user: Pubkey, now: UnixTimestamp) -> Result<(), PoolError> {
        process_claim(&mut self.pool, &Context::new(user, now), &mut self.tokens)
    }

    pub fn compound(&mut self, user: Pubkey, now: UnixTimestamp) -> Result<(), PoolError> {
        process_compound(&mut self.pool, &Context::new(user, now))
    }

    pub fn emergency_unstake(&mut self, user: Pubkey, now: UnixTimestamp) -> Result<(), PoolError> {
        process_emergency_unstake(&mut self.pool, &Context::new(user, now), &mut self.tokens)
    }

    pub fn add_reward(&mut self, amount: u128, duration: u64, now: UnixTimestamp) -> Result<(), PoolError> {
        process_add_reward(&mut self.pool, &Context::new(OWNER, now), amount, duration, &mut self.tokens)
    }

    pub fn pause(&mut self, now: UnixTimestamp) -> Result<(), PoolError> {
        process_pause(&mut self.pool, &Context::new(OWNER, now))
    }

    pub fn unpause(&mut self, now: UnixTimestamp) -> Result<(), PoolError> {
        process_unpause(&mut self.pool, &Context::new(OWNER, now))
    }

    /// Reward-asset tokens `user` has received beyond the opening balance
    pub fn reward_received(&self, user: &Pubkey) -> u128 {
        self.tokens.balance_of(&self.pool.reward_asset, user).saturating_sub(FUNDS)
    }

    /// Staking-asset tokens `user` currently has outside the pool
    pub fn stake_held(&self, user: &Pubkey) -> u128 {
        self.tokens.balance_of(&self.pool.staking_asset, user)
    }
}
