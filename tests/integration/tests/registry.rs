//! Registry: pool creation and independence of instances

use std::sync::{Arc, Mutex};

use stakepool_integration_tests::stakepool_common::{Context, PoolError, Pubkey};
use stakepool_integration_tests::stakepool_pool::*;
use stakepool_integration_tests::stakepool_registry::*;
use stakepool_integration_tests::*;

const REGISTRY: Pubkey = [0xF0; 32];
const ADMIN: Pubkey = [0xF1; 32];

fn registry_with(count: usize) -> (PoolRegistry, Vec<Pubkey>) {
    let mut registry = PoolRegistry::new(REGISTRY, ADMIN);
    let keys = (0..count)
        .map(|i| {
            let cfg = config((i as u16) * 100, 10 * i as u64, false);
            process_create_pool(&mut registry, &Context::new(ADMIN, 0), &cfg).unwrap()
        })
        .collect();
    (registry, keys)
}

#[test]
fn test_all_pools_in_creation_order() {
    let (registry, keys) = registry_with(3);
    assert_eq!(registry.all_pools_length(), 3);
    assert_eq!(registry.all_pools(), keys);
    for (i, key) in keys.iter().enumerate() {
        assert_eq!(registry.pool_at(i), Some(*key));
        let handle = registry.pool(key).unwrap();
        let pool = handle.lock().unwrap();
        assert_eq!(pool.penalty_bps, (i as u16) * 100);
        assert_eq!(pool.program_id, registry.template);
    }
    assert_eq!(registry.events().len(), 3);
}

#[test]
fn test_only_admin_creates() {
    let mut registry = PoolRegistry::new(REGISTRY, ADMIN);
    assert_eq!(
        process_create_pool(&mut registry, &Context::new(OWNER, 0), &config(0, 0, false)),
        Err(PoolError::Unauthorized)
    );
    assert_eq!(registry.all_pools_length(), 0);
}

#[test]
fn test_invalid_config_is_not_listed() {
    let mut registry = PoolRegistry::new(REGISTRY, ADMIN);
    let bad = config(10_001, 0, false);
    assert_eq!(
        process_create_pool(&mut registry, &Context::new(ADMIN, 0), &bad),
        Err(PoolError::PenaltyTooHigh)
    );
    assert!(registry.all_pools().is_empty());
}

#[test]
fn test_pools_do_not_share_state() {
    let (registry, keys) = registry_with(2);
    let mut tokens = InMemoryLedger::new();
    tokens.mint(&STAKE, &ALICE, FUNDS);

    let first = registry.pool(&keys[0]).unwrap();
    let second = registry.pool(&keys[1]).unwrap();

    process_stake(&mut first.lock().unwrap(), &Context::new(ALICE, 5), 700, &mut tokens).unwrap();
    process_pause(&mut first.lock().unwrap(), &Context::new(OWNER, 6)).unwrap();

    let other = second.lock().unwrap();
    assert_eq!(other.total_staked(), 0);
    assert!(!other.paused);
    // Custody is per pool key
    assert_eq!(tokens.balance_of(&STAKE, &keys[0]), 700);
    assert_eq!(tokens.balance_of(&STAKE, &keys[1]), 0);
}

#[tokio::test]
async fn test_pools_run_concurrently() {
    let (registry, keys) = registry_with(4);
    let tokens = Arc::new(Mutex::new(InMemoryLedger::new()));
    {
        let mut ledger = tokens.lock().unwrap();
        ledger.mint(&STAKE, &ALICE, FUNDS);
        ledger.mint(&REWARD, &OWNER, FUNDS);
    }

    let mut tasks = Vec::new();
    for key in &keys {
        let handle = registry.pool(key).unwrap();
        let tokens = Arc::clone(&tokens);
        tasks.push(tokio::task::spawn_blocking(move || {
            for step in 0..10u64 {
                let mut pool = handle.lock().unwrap();
                let mut ledger = tokens.lock().unwrap();
                if step == 0 {
                    process_add_reward(&mut pool, &Context::new(OWNER, 0), 1_000, 100, &mut *ledger)
                        .unwrap();
                }
                process_stake(&mut pool, &Context::new(ALICE, step * 10), 100, &mut *ledger)
                    .unwrap();
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    for key in &keys {
        let handle = registry.pool(key).unwrap();
        let pool = handle.lock().unwrap();
        assert_eq!(pool.total_staked(), 1_000);
        assert!(invariants::all_ok(&pool));
    }
    let ledger = tokens.lock().unwrap();
    assert_eq!(ledger.balance_of(&STAKE, &ALICE), FUNDS - 4_000);
}
