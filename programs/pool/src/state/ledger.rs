//! Pool ledger: all staking and reward state of one pool instance

use std::collections::BTreeMap;

use reward_math::accrual::apr_bps;
use reward_math::U256;
use stakepool_common::{KeyDisplay, PoolError, Pubkey, UnixTimestamp, NULL_KEY};

use crate::events::PoolEvent;

use super::{ReentrancyLock, RewardState, UserStake};

/// Parameters a pool is initialized with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pub staking_asset: Pubkey,
    pub reward_asset: Pubkey,
    /// Seconds after a deposit during which withdrawals are penalized
    pub lock_duration: u64,
    /// Early-exit penalty in basis points (0..=10_000)
    pub penalty_bps: u16,
    pub owner: Pubkey,
    pub auto_compound_enabled: bool,
    /// Receives early-exit penalties
    pub penalty_collector: Pubkey,
}

/// One pool instance
///
/// Created uninitialized by the registry's spawn step, initialized exactly
/// once, then mutated only through the `process_*` operations.
#[derive(Debug)]
pub struct PoolLedger {
    /// Instance identifier
    pub key: Pubkey,
    /// Template (program) this instance was spawned from
    pub program_id: Pubkey,
    pub initialized: bool,
    pub staking_asset: Pubkey,
    pub reward_asset: Pubkey,
    pub owner: Pubkey,
    pub penalty_collector: Pubkey,
    pub lock_duration: u64,
    pub penalty_bps: u16,
    pub auto_compound_enabled: bool,
    pub paused: bool,
    pub reward: RewardState,
    pub(crate) users: BTreeMap<Pubkey, UserStake>,
    pub(crate) lock: ReentrancyLock,
    pub(crate) events: Vec<PoolEvent>,
}

/// Read-only view of one staker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserInfo {
    pub balance: u128,
    pub deposit_time: UnixTimestamp,
    /// First second at which a withdrawal is penalty-free
    pub unlock_time: UnixTimestamp,
    /// Rewards owed right now, including un-checkpointed accrual
    pub earned: u128,
    pub reward_per_share_paid: U256,
    /// Checkpointed part of `earned`
    pub rewards: u128,
}

/// Read-only view of pool-wide state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolInfo {
    pub key: Pubkey,
    pub initialized: bool,
    pub staking_asset: Pubkey,
    pub reward_asset: Pubkey,
    pub owner: Pubkey,
    pub penalty_collector: Pubkey,
    pub lock_duration: u64,
    pub penalty_bps: u16,
    pub auto_compound_enabled: bool,
    pub paused: bool,
    pub total_staked: u128,
    pub reward_rate: u128,
    pub reward_per_share_stored: U256,
    pub last_update_time: UnixTimestamp,
    pub period_finish: UnixTimestamp,
    pub reward_pool: u128,
}

/// Full comparable state, used to check that failed calls change nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub info: PoolInfo,
    pub users: BTreeMap<Pubkey, UserStake>,
}

impl PoolLedger {
    /// Fresh, uninitialized instance of the template `program_id`
    pub fn new(key: Pubkey, program_id: Pubkey) -> Self {
        Self {
            key,
            program_id,
            initialized: false,
            staking_asset: NULL_KEY,
            reward_asset: NULL_KEY,
            owner: NULL_KEY,
            penalty_collector: NULL_KEY,
            lock_duration: 0,
            penalty_bps: 0,
            auto_compound_enabled: false,
            paused: false,
            reward: RewardState::default(),
            users: BTreeMap::new(),
            lock: ReentrancyLock::new(),
            events: Vec::new(),
        }
    }

    // ---------------------------------------------------------------------
    // Views
    // ---------------------------------------------------------------------

    pub fn user(&self, user: &Pubkey) -> UserStake {
        self.users.get(user).copied().unwrap_or_default()
    }

    pub fn users(&self) -> impl Iterator<Item = (&Pubkey, &UserStake)> {
        self.users.iter()
    }

    pub fn balance_of(&self, user: &Pubkey) -> u128 {
        self.user(user).balance
    }

    pub fn total_staked(&self) -> u128 {
        self.reward.total_staked
    }

    pub fn last_time_reward_applicable(&self, now: UnixTimestamp) -> UnixTimestamp {
        self.reward.last_time_reward_applicable(now)
    }

    pub fn reward_per_share(&self, now: UnixTimestamp) -> Result<U256, PoolError> {
        self.reward.reward_per_share(now)
    }

    pub fn earned(&self, user: &Pubkey, now: UnixTimestamp) -> Result<u128, PoolError> {
        self.user(user).earned(self.reward_per_share(now)?)
    }

    pub fn user_info(&self, user: &Pubkey, now: UnixTimestamp) -> Result<UserInfo, PoolError> {
        let stake = self.user(user);
        Ok(UserInfo {
            balance: stake.balance,
            deposit_time: stake.deposit_time,
            unlock_time: stake.unlock_time(self.lock_duration),
            earned: stake.earned(self.reward_per_share(now)?)?,
            reward_per_share_paid: stake.reward_per_share_paid,
            rewards: stake.rewards,
        })
    }

    pub fn pool_info(&self) -> PoolInfo {
        PoolInfo {
            key: self.key,
            initialized: self.initialized,
            staking_asset: self.staking_asset,
            reward_asset: self.reward_asset,
            owner: self.owner,
            penalty_collector: self.penalty_collector,
            lock_duration: self.lock_duration,
            penalty_bps: self.penalty_bps,
            auto_compound_enabled: self.auto_compound_enabled,
            paused: self.paused,
            total_staked: self.reward.total_staked,
            reward_rate: self.reward.reward_rate,
            reward_per_share_stored: self.reward.reward_per_share_stored,
            last_update_time: self.reward.last_update_time,
            period_finish: self.reward.period_finish,
            reward_pool: self.reward.reward_pool,
        }
    }

    /// Annualised emission in basis points of the staked total
    pub fn apr_bps(&self, now: UnixTimestamp) -> Result<u128, PoolError> {
        apr_bps(
            self.reward.reward_rate,
            self.reward.total_staked,
            now,
            self.reward.period_finish,
        )
        .ok_or(PoolError::MathOverflow)
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            info: self.pool_info(),
            users: self.users.clone(),
        }
    }

    /// Handle on this instance's reentrancy lock
    pub fn reentrancy_lock(&self) -> ReentrancyLock {
        self.lock.clone()
    }

    pub fn events(&self) -> &[PoolEvent] {
        &self.events
    }

    /// Drain the event log
    pub fn take_events(&mut self) -> Vec<PoolEvent> {
        std::mem::take(&mut self.events)
    }

    // ---------------------------------------------------------------------
    // Preconditions
    // ---------------------------------------------------------------------

    pub(crate) fn require_initialized(&self) -> Result<(), PoolError> {
        if !self.initialized {
            log::warn!("pool {}: not initialized", KeyDisplay(&self.key));
            return Err(PoolError::NotInitialized);
        }
        Ok(())
    }

    pub(crate) fn require_active(&self) -> Result<(), PoolError> {
        self.require_initialized()?;
        if self.paused {
            log::warn!("pool {}: rejected while paused", KeyDisplay(&self.key));
            return Err(PoolError::Paused);
        }
        Ok(())
    }

    pub(crate) fn require_owner(&self, caller: &Pubkey) -> Result<(), PoolError> {
        self.require_initialized()?;
        if *caller != self.owner {
            log::warn!(
                "pool {}: {} is not the owner",
                KeyDisplay(&self.key),
                KeyDisplay(caller)
            );
            return Err(PoolError::Unauthorized);
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Staged updates
    // ---------------------------------------------------------------------

    /// Global accumulator and `user`'s record, both checkpointed to `now`
    ///
    /// Works on copies: nothing is written back until [`Self::commit`], so an
    /// operation that fails later leaves the ledger untouched.
    pub(crate) fn checkpointed(
        &self,
        user: &Pubkey,
        now: UnixTimestamp,
    ) -> Result<(RewardState, UserStake), PoolError> {
        let mut reward = self.reward;
        reward.checkpoint(now)?;
        let mut stake = self.user(user);
        stake.checkpoint(reward.reward_per_share_stored)?;
        log::debug!(
            "pool {}: checkpoint {} rps={} rewards={}",
            KeyDisplay(&self.key),
            KeyDisplay(user),
            reward.reward_per_share_stored,
            stake.rewards
        );
        Ok((reward, stake))
    }

    /// Write staged state back and publish the operation's events
    pub(crate) fn commit(
        &mut self,
        reward: RewardState,
        stake: Option<(Pubkey, UserStake)>,
        events: Vec<PoolEvent>,
    ) {
        debug_assert!(reward.reward_per_share_stored >= self.reward.reward_per_share_stored);
        self.reward = reward;
        if let Some((user, stake)) = stake {
            // A caller with no position leaves no record behind; its paid
            // snapshot is meaningless at zero balance
            let empty = stake.balance == 0 && stake.rewards == 0;
            if !empty || self.users.contains_key(&user) {
                self.users.insert(user, stake);
            }
        }
        self.publish(events);
    }

    /// Log and record events of an operation that only touched config
    pub(crate) fn publish(&mut self, events: Vec<PoolEvent>) {
        for event in events {
            log::info!("pool {}: {}", KeyDisplay(&self.key), event);
            self.events.push(event);
        }
    }
}
