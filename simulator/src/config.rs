//! Scenario configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use stakepool_common::Pubkey;
use stakepool_pool::{PoolConfig, PoolInstruction};
use thiserror::Error;

pub const SCENARIO_ENV: &str = "STAKEPOOL_SCENARIO";
pub const DEFAULT_PATH: &str = "scenario.toml";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum KeyError {
    #[error("empty key")]
    Empty,
    #[error("name `{0}` is longer than 32 bytes")]
    TooLong(String),
}

/// Resolve a principal or asset name to a key
///
/// A base58 string that decodes to exactly 32 bytes is taken as-is; anything
/// else is a short name, zero-padded to 32 bytes.
pub fn parse_key(s: &str) -> Result<Pubkey, KeyError> {
    if s.is_empty() {
        return Err(KeyError::Empty);
    }
    if let Ok(bytes) = bs58::decode(s).into_vec() {
        if let Ok(key) = <Pubkey>::try_from(bytes.as_slice()) {
            return Ok(key);
        }
    }
    if s.len() > 32 {
        return Err(KeyError::TooLong(s.to_string()));
    }
    let mut key = [0u8; 32];
    key[..s.len()].copy_from_slice(s.as_bytes());
    Ok(key)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Registry key
    pub registry: String,

    /// Registry owner; creates every pool
    pub admin: String,

    pub pools: Vec<PoolSpec>,

    /// Opening token balances
    #[serde(default)]
    pub balances: Vec<Balance>,

    #[serde(default)]
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolSpec {
    /// Name actions refer to the pool by
    pub name: String,
    pub staking_asset: String,
    pub reward_asset: String,
    pub lock_duration: u64,
    pub penalty_bps: u16,
    pub owner: String,
    #[serde(default)]
    pub auto_compound: bool,
    pub penalty_collector: String,
    /// Creation time
    #[serde(default)]
    pub created_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
    pub asset: String,
    pub holder: String,
    pub amount: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub pool: String,
    pub at: u64,
    pub caller: String,
    pub op: Op,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Op {
    Stake { amount: u64 },
    Withdraw { amount: u64 },
    Claim,
    Exit,
    Compound,
    EmergencyUnstake,
    AddReward { amount: u64, duration: u64 },
    SetAutoCompound { enabled: bool },
    SetLockDuration { lock_duration: u64 },
    SetPenaltyBps { penalty_bps: u16 },
    SetPenaltyCollector { collector: String },
    Pause,
    Unpause,
    TransferOwnership { new_owner: String },
}

impl Op {
    pub fn to_instruction(&self) -> Result<PoolInstruction, KeyError> {
        Ok(match self {
            Op::Stake { amount } => PoolInstruction::Stake { amount: *amount as u128 },
            Op::Withdraw { amount } => PoolInstruction::Withdraw { amount: *amount as u128 },
            Op::Claim => PoolInstruction::Claim,
            Op::Exit => PoolInstruction::Exit,
            Op::Compound => PoolInstruction::Compound,
            Op::EmergencyUnstake => PoolInstruction::EmergencyUnstake,
            Op::AddReward { amount, duration } => PoolInstruction::AddReward {
                amount: *amount as u128,
                duration: *duration,
            },
            Op::SetAutoCompound { enabled } => PoolInstruction::SetAutoCompound { enabled: *enabled },
            Op::SetLockDuration { lock_duration } => PoolInstruction::SetLockDuration {
                lock_duration: *lock_duration,
            },
            Op::SetPenaltyBps { penalty_bps } => PoolInstruction::SetPenaltyBps {
                penalty_bps: *penalty_bps,
            },
            Op::SetPenaltyCollector { collector } => PoolInstruction::SetPenaltyCollector {
                collector: parse_key(collector)?,
            },
            Op::Pause => PoolInstruction::Pause,
            Op::Unpause => PoolInstruction::Unpause,
            Op::TransferOwnership { new_owner } => PoolInstruction::TransferOwnership {
                new_owner: parse_key(new_owner)?,
            },
        })
    }
}

impl PoolSpec {
    pub fn to_config(&self) -> Result<PoolConfig, KeyError> {
        Ok(PoolConfig {
            staking_asset: parse_key(&self.staking_asset)?,
            reward_asset: parse_key(&self.reward_asset)?,
            lock_duration: self.lock_duration,
            penalty_bps: self.penalty_bps,
            owner: parse_key(&self.owner)?,
            auto_compound_enabled: self.auto_compound,
            penalty_collector: parse_key(&self.penalty_collector)?,
        })
    }
}

impl Scenario {
    /// Load the scenario named by `STAKEPOOL_SCENARIO` (default `scenario.toml`)
    pub fn load() -> Result<Self> {
        let path = std::env::var(SCENARIO_ENV).unwrap_or_else(|_| DEFAULT_PATH.to_string());
        Self::load_from(&path)
    }

    pub fn load_from(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let scenario_str = std::fs::read_to_string(expanded.as_ref())
            .context(format!("Failed to read scenario file: {}", path))?;

        toml::from_str(&scenario_str).context("Failed to parse scenario TOML")
    }

    /// Two pools: a split-asset pool with an early-exit penalty and a
    /// self-compounding pool
    pub fn default_scenario() -> Self {
        let action = |pool: &str, at: u64, caller: &str, op: Op| Action {
            pool: pool.to_string(),
            at,
            caller: caller.to_string(),
            op,
        };
        let balance = |asset: &str, holder: &str, amount: u64| Balance {
            asset: asset.to_string(),
            holder: holder.to_string(),
            amount,
        };

        Self {
            registry: "registry".to_string(),
            admin: "admin".to_string(),
            pools: vec![
                PoolSpec {
                    name: "usdc-gov".to_string(),
                    staking_asset: "usdc".to_string(),
                    reward_asset: "gov".to_string(),
                    lock_duration: 100,
                    penalty_bps: 1_000,
                    owner: "admin".to_string(),
                    auto_compound: false,
                    penalty_collector: "treasury".to_string(),
                    created_at: 0,
                },
                PoolSpec {
                    name: "gov-compound".to_string(),
                    staking_asset: "gov".to_string(),
                    reward_asset: "gov".to_string(),
                    lock_duration: 50,
                    penalty_bps: 500,
                    owner: "admin".to_string(),
                    auto_compound: true,
                    penalty_collector: "treasury".to_string(),
                    created_at: 0,
                },
            ],
            balances: vec![
                balance("usdc", "alice", 10_000),
                balance("usdc", "bob", 10_000),
                balance("gov", "alice", 10_000),
                balance("gov", "bob", 10_000),
                balance("gov", "admin", 100_000),
            ],
            actions: vec![
                action("usdc-gov", 0, "alice", Op::Stake { amount: 1_000 }),
                action("usdc-gov", 0, "admin", Op::AddReward { amount: 1_000, duration: 100 }),
                action("usdc-gov", 50, "alice", Op::Withdraw { amount: 1_000 }),
                action("usdc-gov", 60, "bob", Op::Stake { amount: 500 }),
                action("usdc-gov", 80, "admin", Op::AddReward { amount: 800, duration: 100 }),
                action("usdc-gov", 200, "bob", Op::Exit),
                action("gov-compound", 0, "bob", Op::Stake { amount: 2_000 }),
                action("gov-compound", 0, "admin", Op::AddReward { amount: 2_000, duration: 200 }),
                action("gov-compound", 100, "bob", Op::Compound),
                action("gov-compound", 120, "alice", Op::Stake { amount: 1_000 }),
                action("gov-compound", 130, "admin", Op::Pause),
                action("gov-compound", 140, "alice", Op::Claim),
                action("gov-compound", 150, "alice", Op::EmergencyUnstake),
                action("gov-compound", 160, "admin", Op::Unpause),
                action("gov-compound", 300, "bob", Op::Exit),
            ],
        }
    }

    /// Write the default scenario to `path`
    pub fn write_default(path: &str) -> Result<()> {
        let scenario = Self::default_scenario();
        let toml_str = toml::to_string_pretty(&scenario).context("Failed to serialize scenario")?;

        std::fs::write(path, toml_str).context(format!("Failed to write scenario to {}", path))?;

        log::info!("Created default scenario at {}", path);
        Ok(())
    }
}
