//! Observable pool events
//!
//! Appended to the ledger's event log when an operation commits; a failed
//! operation emits nothing.

use core::fmt;

use stakepool_common::{KeyDisplay, Pubkey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolEvent {
    PoolInitialized {
        staking_asset: Pubkey,
        reward_asset: Pubkey,
        lock_duration: u64,
        penalty_bps: u16,
        owner: Pubkey,
        auto_compound_enabled: bool,
        penalty_collector: Pubkey,
    },
    Staked { user: Pubkey, amount: u128 },
    /// `principal` is what the user received, after the penalty
    Withdrawn { user: Pubkey, principal: u128, reward: u128, penalty: u128 },
    RewardPaid { user: Pubkey, amount: u128 },
    RewardAdded { amount: u128, duration: u64 },
    Compounded { user: Pubkey, amount: u128 },
    AutoCompoundSet { enabled: bool },
    LockDurationSet { lock_duration: u64 },
    PenaltyBpsSet { penalty_bps: u16 },
    PenaltyCollectorSet { collector: Pubkey },
    Paused { by: Pubkey },
    Unpaused { by: Pubkey },
    EmergencyUnstaked { user: Pubkey, amount: u128 },
    PenaltySent { collector: Pubkey, amount: u128 },
    OwnershipTransferred { previous: Pubkey, owner: Pubkey },
}

impl fmt::Display for PoolEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolEvent::PoolInitialized {
                staking_asset,
                reward_asset,
                lock_duration,
                penalty_bps,
                owner,
                auto_compound_enabled,
                penalty_collector,
            } => write!(
                f,
                "initialized stake={} reward={} lock={}s penalty={}bps owner={} compound={} collector={}",
                KeyDisplay(staking_asset),
                KeyDisplay(reward_asset),
                lock_duration,
                penalty_bps,
                KeyDisplay(owner),
                auto_compound_enabled,
                KeyDisplay(penalty_collector)
            ),
            PoolEvent::Staked { user, amount } => {
                write!(f, "staked {} by {}", amount, KeyDisplay(user))
            }
            PoolEvent::Withdrawn { user, principal, reward, penalty } => write!(
                f,
                "withdrawn by {}: principal={} reward={} penalty={}",
                KeyDisplay(user),
                principal,
                reward,
                penalty
            ),
            PoolEvent::RewardPaid { user, amount } => {
                write!(f, "reward {} paid to {}", amount, KeyDisplay(user))
            }
            PoolEvent::RewardAdded { amount, duration } => {
                write!(f, "reward {} added over {}s", amount, duration)
            }
            PoolEvent::Compounded { user, amount } => {
                write!(f, "compounded {} for {}", amount, KeyDisplay(user))
            }
            PoolEvent::AutoCompoundSet { enabled } => write!(f, "auto-compound set to {}", enabled),
            PoolEvent::LockDurationSet { lock_duration } => {
                write!(f, "lock duration set to {}s", lock_duration)
            }
            PoolEvent::PenaltyBpsSet { penalty_bps } => {
                write!(f, "penalty set to {}bps", penalty_bps)
            }
            PoolEvent::PenaltyCollectorSet { collector } => {
                write!(f, "penalty collector set to {}", KeyDisplay(collector))
            }
            PoolEvent::Paused { by } => write!(f, "paused by {}", KeyDisplay(by)),
            PoolEvent::Unpaused { by } => write!(f, "unpaused by {}", KeyDisplay(by)),
            PoolEvent::EmergencyUnstaked { user, amount } => {
                write!(f, "emergency unstake of {} by {}", amount, KeyDisplay(user))
            }
            PoolEvent::PenaltySent { collector, amount } => {
                write!(f, "penalty {} sent to {}", amount, KeyDisplay(collector))
            }
            PoolEvent::OwnershipTransferred { previous, owner } => write!(
                f,
                "ownership transferred from {} to {}",
                KeyDisplay(previous),
                KeyDisplay(owner)
            ),
        }
    }
}
