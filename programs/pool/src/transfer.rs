//! Asset-transfer capability
//!
//! The ledger never moves tokens itself. Each operation collects its legs
//! into a batch and hands the whole batch to an [`AssetTransfer`]
//! implementation, which must move every leg or none of them.

use std::collections::HashMap;

use stakepool_common::{KeyDisplay, PoolError, Pubkey};
use thiserror::Error;

/// One leg of a settlement, seen from the pool's custody account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    /// `from` pays `amount` of `asset` into pool custody
    In { asset: Pubkey, from: Pubkey, amount: u128 },
    /// Pool custody pays `amount` of `asset` to `to`
    Out { asset: Pubkey, to: Pubkey, amount: u128 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("insufficient funds: needed {needed}, available {available}")]
    InsufficientFunds { needed: u128, available: u128 },
    #[error("balance overflow")]
    Overflow,
    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// External ledger that holds the actual tokens
pub trait AssetTransfer {
    /// Move every leg of `batch` for `pool`'s custody account, or nothing
    fn settle(&mut self, pool: &Pubkey, batch: &[Transfer]) -> Result<(), TransferError>;
}

/// Legs of one operation; zero-amount legs are dropped
#[derive(Debug, Default)]
pub struct TransferBatch {
    legs: Vec<Transfer>,
}

impl TransferBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pull(&mut self, asset: Pubkey, from: Pubkey, amount: u128) -> &mut Self {
        if amount > 0 {
            self.legs.push(Transfer::In { asset, from, amount });
        }
        self
    }

    pub fn send(&mut self, asset: Pubkey, to: Pubkey, amount: u128) -> &mut Self {
        if amount > 0 {
            self.legs.push(Transfer::Out { asset, to, amount });
        }
        self
    }

    pub fn legs(&self) -> &[Transfer] {
        &self.legs
    }

    /// Hand the batch to `transfer`; an empty batch never reaches it
    pub fn settle<T: AssetTransfer + ?Sized>(
        &self,
        transfer: &mut T,
        pool: &Pubkey,
    ) -> Result<(), PoolError> {
        if self.legs.is_empty() {
            return Ok(());
        }
        transfer.settle(pool, &self.legs).map_err(|e| {
            log::warn!("pool {}: transfer failed: {}", KeyDisplay(pool), e);
            PoolError::TransferFailed
        })
    }
}

/// In-process token ledger: balances per (asset, holder)
///
/// Pool custody is the holder entry keyed by the pool's own key.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    balances: HashMap<(Pubkey, Pubkey), u128>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `holder` out of thin air (test and scenario setup)
    pub fn mint(&mut self, asset: &Pubkey, holder: &Pubkey, amount: u128) {
        let balance = self.balances.entry((*asset, *holder)).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    pub fn balance_of(&self, asset: &Pubkey, holder: &Pubkey) -> u128 {
        self.balances.get(&(*asset, *holder)).copied().unwrap_or(0)
    }

    /// Sum of `asset` across all holders
    pub fn supply(&self, asset: &Pubkey) -> u128 {
        self.balances
            .iter()
            .filter(|((a, _), _)| a == asset)
            .fold(0u128, |acc, (_, b)| acc.saturating_add(*b))
    }
}

impl AssetTransfer for InMemoryLedger {
    fn settle(&mut self, pool: &Pubkey, batch: &[Transfer]) -> Result<(), TransferError> {
        // Apply to a staged copy of the touched entries, then publish
        let mut staged: HashMap<(Pubkey, Pubkey), u128> = HashMap::new();
        for leg in batch {
            let (asset, source, dest, amount) = match *leg {
                Transfer::In { asset, from, amount } => (asset, from, *pool, amount),
                Transfer::Out { asset, to, amount } => (asset, *pool, to, amount),
            };

            let available = *staged
                .entry((asset, source))
                .or_insert_with(|| self.balance_of(&asset, &source));
            let debited = available
                .checked_sub(amount)
                .ok_or(TransferError::InsufficientFunds { needed: amount, available })?;
            staged.insert((asset, source), debited);

            let credit = staged
                .entry((asset, dest))
                .or_insert_with(|| self.balance_of(&asset, &dest));
            *credit = credit.checked_add(amount).ok_or(TransferError::Overflow)?;
        }
        self.balances.extend(staged);
        Ok(())
    }
}
