//! Initialize instruction - one-time pool configuration

use reward_math::accrual::MAX_PENALTY_BPS;
use stakepool_common::{is_null, KeyDisplay, PoolError, UnixTimestamp};

use crate::events::PoolEvent;
use crate::state::{PoolConfig, PoolLedger, RewardState};

/// Process initialize instruction
///
/// Moves a freshly spawned ledger from uninitialized to active. Called once
/// by the registry right after spawning; a second call fails and leaves the
/// first configuration in place.
pub fn process_initialize(
    pool: &mut PoolLedger,
    config: &PoolConfig,
    now: UnixTimestamp,
) -> Result<(), PoolError> {
    let _guard = pool.lock.enter()?;

    if pool.initialized {
        log::warn!("pool {}: already initialized", KeyDisplay(&pool.key));
        return Err(PoolError::AlreadyInitialized);
    }
    validate_config(config)?;

    pool.staking_asset = config.staking_asset;
    pool.reward_asset = config.reward_asset;
    pool.lock_duration = config.lock_duration;
    pool.penalty_bps = config.penalty_bps;
    pool.owner = config.owner;
    pool.auto_compound_enabled = config.auto_compound_enabled;
    pool.penalty_collector = config.penalty_collector;
    pool.paused = false;
    pool.initialized = true;

    let reward = RewardState {
        last_update_time: now,
        ..RewardState::default()
    };
    pool.commit(
        reward,
        None,
        vec![PoolEvent::PoolInitialized {
            staking_asset: config.staking_asset,
            reward_asset: config.reward_asset,
            lock_duration: config.lock_duration,
            penalty_bps: config.penalty_bps,
            owner: config.owner,
            auto_compound_enabled: config.auto_compound_enabled,
            penalty_collector: config.penalty_collector,
        }],
    );
    Ok(())
}

fn validate_config(config: &PoolConfig) -> Result<(), PoolError> {
    if is_null(&config.staking_asset) || is_null(&config.reward_asset) {
        return Err(PoolError::NullAsset);
    }
    if is_null(&config.owner) || is_null(&config.penalty_collector) {
        return Err(PoolError::NullPrincipal);
    }
    if config.penalty_bps > MAX_PENALTY_BPS {
        return Err(PoolError::PenaltyTooHigh);
    }
    Ok(())
}
