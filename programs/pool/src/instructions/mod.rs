/// Pool instruction handlers

pub mod initialize;
pub mod stake;
pub mod withdraw;
pub mod claim;
pub mod compound;
pub mod emergency_unstake;
pub mod add_reward;
pub mod admin;

pub use initialize::*;
pub use stake::*;
pub use withdraw::*;
pub use claim::*;
pub use compound::*;
pub use emergency_unstake::*;
pub use add_reward::*;
pub use admin::*;

use stakepool_common::{InstructionReader, InstructionWriter, PoolError, Pubkey};

use crate::state::PoolConfig;

/// Instruction discriminators
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolInstructionTag {
    Initialize = 0,
    Stake = 1,
    Withdraw = 2,
    Claim = 3,
    Exit = 4,
    Compound = 5,
    EmergencyUnstake = 6,
    AddReward = 7,
    SetAutoCompound = 8,
    SetLockDuration = 9,
    SetPenaltyBps = 10,
    SetPenaltyCollector = 11,
    Pause = 12,
    Unpause = 13,
    TransferOwnership = 14,
}

/// Decoded pool instruction
///
/// Wire layout: one discriminator byte followed by the little-endian fields
/// of the variant, nothing trailing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolInstruction {
    /// 139-byte payload: staking_asset, reward_asset, lock_duration u64,
    /// penalty_bps u16, owner, auto_compound u8, penalty_collector
    Initialize(PoolConfig),
    Stake { amount: u128 },
    Withdraw { amount: u128 },
    Claim,
    Exit,
    Compound,
    EmergencyUnstake,
    AddReward { amount: u128, duration: u64 },
    SetAutoCompound { enabled: bool },
    SetLockDuration { lock_duration: u64 },
    SetPenaltyBps { penalty_bps: u16 },
    SetPenaltyCollector { collector: Pubkey },
    Pause,
    Unpause,
    TransferOwnership { new_owner: Pubkey },
}

impl PoolInstruction {
    pub fn tag(&self) -> PoolInstructionTag {
        match self {
            Self::Initialize(_) => PoolInstructionTag::Initialize,
            Self::Stake { .. } => PoolInstructionTag::Stake,
            Self::Withdraw { .. } => PoolInstructionTag::Withdraw,
            Self::Claim => PoolInstructionTag::Claim,
            Self::Exit => PoolInstructionTag::Exit,
            Self::Compound => PoolInstructionTag::Compound,
            Self::EmergencyUnstake => PoolInstructionTag::EmergencyUnstake,
            Self::AddReward { .. } => PoolInstructionTag::AddReward,
            Self::SetAutoCompound { .. } => PoolInstructionTag::SetAutoCompound,
            Self::SetLockDuration { .. } => PoolInstructionTag::SetLockDuration,
            Self::SetPenaltyBps { .. } => PoolInstructionTag::SetPenaltyBps,
            Self::SetPenaltyCollector { .. } => PoolInstructionTag::SetPenaltyCollector,
            Self::Pause => PoolInstructionTag::Pause,
            Self::Unpause => PoolInstructionTag::Unpause,
            Self::TransferOwnership { .. } => PoolInstructionTag::TransferOwnership,
        }
    }

    pub fn pack(&self) -> Vec<u8> {
        let w = InstructionWriter::new(self.tag() as u8);
        let w = match self {
            Self::Initialize(config) => w
                .pubkey(&config.staking_asset)
                .pubkey(&config.reward_asset)
                .u64(config.lock_duration)
                .u16(config.penalty_bps)
                .pubkey(&config.owner)
                .bool(config.auto_compound_enabled)
                .pubkey(&config.penalty_collector),
            Self::Stake { amount } | Self::Withdraw { amount } => w.u128(*amount),
            Self::AddReward { amount, duration } => w.u128(*amount).u64(*duration),
            Self::SetAutoCompound { enabled } => w.bool(*enabled),
            Self::SetLockDuration { lock_duration } => w.u64(*lock_duration),
            Self::SetPenaltyBps { penalty_bps } => w.u16(*penalty_bps),
            Self::SetPenaltyCollector { collector } => w.pubkey(collector),
            Self::TransferOwnership { new_owner } => w.pubkey(new_owner),
            Self::Claim
            | Self::Exit
            | Self::Compound
            | Self::EmergencyUnstake
            | Self::Pause
            | Self::Unpause => w,
        };
        w.into_vec()
    }

    pub fn unpack(input: &[u8]) -> Result<Self, PoolError> {
        let mut r = InstructionReader::new(input);
        let instruction = match r.read_u8()? {
            0 => Self::Initialize(PoolConfig {
                staking_asset: r.read_pubkey()?,
                reward_asset: r.read_pubkey()?,
                lock_duration: r.read_u64()?,
                penalty_bps: r.read_u16()?,
                owner: r.read_pubkey()?,
                auto_compound_enabled: r.read_bool()?,
                penalty_collector: r.read_pubkey()?,
            }),
            1 => Self::Stake { amount: r.read_u128()? },
            2 => Self::Withdraw { amount: r.read_u128()? },
            3 => Self::Claim,
            4 => Self::Exit,
            5 => Self::Compound,
            6 => Self::EmergencyUnstake,
            7 => Self::AddReward {
                amount: r.read_u128()?,
                duration: r.read_u64()?,
            },
            8 => Self::SetAutoCompound { enabled: r.read_bool()? },
            9 => Self::SetLockDuration { lock_duration: r.read_u64()? },
            10 => Self::SetPenaltyBps { penalty_bps: r.read_u16()? },
            11 => Self::SetPenaltyCollector { collector: r.read_pubkey()? },
            12 => Self::Pause,
            13 => Self::Unpause,
            14 => Self::TransferOwnership { new_owner: r.read_pubkey()? },
            _ => return Err(PoolError::InvalidInstruction),
        };
        r.finish()?;
        Ok(instruction)
    }
}
