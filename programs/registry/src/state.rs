//! Registry state

use std::sync::{Arc, Mutex};

use stakepool_common::{KeyDisplay, PoolError, Pubkey};
use stakepool_pool::{PoolLedger, ReentrancyLock};

/// Shared handle on one pool instance
///
/// Each pool has its own mutex, so distinct pools can be driven from
/// different threads at the same time.
pub type PoolHandle = Arc<Mutex<PoolLedger>>;

#[derive(Debug, Clone)]
pub struct PoolEntry {
    pub key: Pubkey,
    pub handle: PoolHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryEvent {
    PoolCreated {
        pool: Pubkey,
        index: u64,
        staking_asset: Pubkey,
        reward_asset: Pubkey,
        owner: Pubkey,
    },
}

/// Factory for pool instances
///
/// `pools` is append-only: entries are never removed or reordered.
#[derive(Debug)]
pub struct PoolRegistry {
    pub key: Pubkey,
    pub owner: Pubkey,
    /// Code template every pool is spawned from
    pub template: Pubkey,
    pub(crate) pools: Vec<PoolEntry>,
    pub(crate) events: Vec<RegistryEvent>,
    pub(crate) lock: ReentrancyLock,
}

impl PoolRegistry {
    pub fn new(key: Pubkey, owner: Pubkey) -> Self {
        Self::with_template(key, owner, stakepool_pool::ID)
    }

    pub fn with_template(key: Pubkey, owner: Pubkey, template: Pubkey) -> Self {
        Self {
            key,
            owner,
            template,
            pools: Vec::new(),
            events: Vec::new(),
            lock: ReentrancyLock::new(),
        }
    }

    /// Fresh, uninitialized instance of the template
    pub fn spawn(&self, key: Pubkey) -> PoolLedger {
        PoolLedger::new(key, self.template)
    }

    pub fn all_pools(&self) -> Vec<Pubkey> {
        self.pools.iter().map(|entry| entry.key).collect()
    }

    pub fn all_pools_length(&self) -> usize {
        self.pools.len()
    }

    /// Key of the `index`-th created pool
    pub fn pool_at(&self, index: usize) -> Option<Pubkey> {
        self.pools.get(index).map(|entry| entry.key)
    }

    pub fn pool(&self, key: &Pubkey) -> Result<PoolHandle, PoolError> {
        self.pools
            .iter()
            .find(|entry| entry.key == *key)
            .map(|entry| Arc::clone(&entry.handle))
            .ok_or_else(|| {
                log::warn!("registry {}: unknown pool {}", KeyDisplay(&self.key), KeyDisplay(key));
                PoolError::PoolNotFound
            })
    }

    pub fn entries(&self) -> &[PoolEntry] {
        &self.pools
    }

    pub fn events(&self) -> &[RegistryEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Address of the `index`-th pool of `registry`
///
/// The registry key's first 24 bytes followed by the little-endian index;
/// distinct per (registry, index) pair.
pub fn derive_pool_key(registry: &Pubkey, index: u64) -> Pubkey {
    let mut key = [0u8; 32];
    key[..24].copy_from_slice(&registry[..24]);
    key[24..].copy_from_slice(&index.to_le_bytes());
    key
}
