//! Error codes shared by the pool ledger and the registry

use pinocchio::program_error::ProgramError;
use thiserror::Error;

/// Every way a pool or registry operation can fail
///
/// A failed operation commits nothing: no balance, accumulator or event
/// changes survive an `Err`.
#[repr(u32)]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    #[error("invalid instruction data")]
    InvalidInstruction = 0,
    #[error("pool is already initialized")]
    AlreadyInitialized = 1,
    #[error("pool is not initialized")]
    NotInitialized = 2,
    #[error("caller is not the owner")]
    Unauthorized = 3,
    #[error("pool is paused")]
    Paused = 4,
    #[error("pool is not paused")]
    NotPaused = 5,
    #[error("amount must be greater than zero")]
    ZeroAmount = 6,
    #[error("duration must be greater than zero")]
    ZeroDuration = 7,
    #[error("insufficient staked balance")]
    InsufficientBalance = 8,
    #[error("penalty exceeds 10000 bps")]
    PenaltyTooHigh = 9,
    #[error("asset identifier is null")]
    NullAsset = 10,
    #[error("principal identifier is null")]
    NullPrincipal = 11,
    #[error("auto-compounding is disabled")]
    CompoundDisabled = 12,
    #[error("staking and reward assets differ")]
    AssetMismatch = 13,
    #[error("no rewards to compound")]
    NoRewards = 14,
    #[error("reentrant call rejected")]
    Reentrancy = 15,
    #[error("asset transfer failed")]
    TransferFailed = 16,
    #[error("arithmetic overflow")]
    MathOverflow = 17,
    #[error("pool not found")]
    PoolNotFound = 18,
}

impl From<PoolError> for ProgramError {
    fn from(e: PoolError) -> Self {
        ProgramError::Custom(e as u32)
    }
}
