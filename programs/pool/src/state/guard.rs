//! Per-instance reentrancy lock

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use stakepool_common::PoolError;

/// In-progress flag for one pool instance
///
/// Every mutating operation enters the lock first; a nested attempt on the
/// same instance (for example from inside an asset-transfer callback that
/// holds a clone of the lock) fails with [`PoolError::Reentrancy`].
#[derive(Debug, Clone, Default)]
pub struct ReentrancyLock(Arc<AtomicBool>);

impl ReentrancyLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the lock; it is released when the returned guard drops
    pub fn enter(&self) -> Result<ReentrancyGuard, PoolError> {
        self.0
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| PoolError::Reentrancy)?;
        Ok(ReentrancyGuard(Arc::clone(&self.0)))
    }

    pub fn is_locked(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Releases the lock on drop, including on early `?` returns
#[derive(Debug)]
#[must_use]
pub struct ReentrancyGuard(Arc<AtomicBool>);

impl Drop for ReentrancyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
