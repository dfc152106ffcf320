//! Registry instructions

use std::sync::{Arc, Mutex};

use stakepool_common::{Context, KeyDisplay, PoolError, Pubkey};
use stakepool_pool::{process_initialize, PoolConfig};

use crate::state::{derive_pool_key, PoolEntry, PoolRegistry, RegistryEvent};

/// Process create pool instruction (registry owner only)
///
/// Spawns a new instance, initializes it with `config` and appends it to the
/// list. If initialization fails nothing is appended.
pub fn process_create_pool(
    registry: &mut PoolRegistry,
    ctx: &Context,
    config: &PoolConfig,
) -> Result<Pubkey, PoolError> {
    let _guard = registry.lock.enter()?;
    if ctx.caller != registry.owner {
        log::warn!(
            "registry {}: {} is not the owner",
            KeyDisplay(&registry.key),
            KeyDisplay(&ctx.caller)
        );
        return Err(PoolError::Unauthorized);
    }

    let index = registry.pools.len() as u64;
    let key = derive_pool_key(&registry.key, index);
    let mut pool = registry.spawn(key);
    process_initialize(&mut pool, config, ctx.now)?;

    let event = RegistryEvent::PoolCreated {
        pool: key,
        index,
        staking_asset: config.staking_asset,
        reward_asset: config.reward_asset,
        owner: config.owner,
    };
    log::info!(
        "registry {}: pool {} created (#{})",
        KeyDisplay(&registry.key),
        KeyDisplay(&key),
        index
    );
    registry.pools.push(PoolEntry { key, handle: Arc::new(Mutex::new(pool)) });
    registry.events.push(event);
    Ok(key)
}
