//! End-to-end pool scenarios

use stakepool_integration_tests::reward_math::accrual::PRECISION;
use stakepool_integration_tests::reward_math::U256;
use stakepool_integration_tests::stakepool_common::PoolError;
use stakepool_integration_tests::stakepool_pool::{process_initialize, PoolEvent};
use stakepool_integration_tests::*;

#[test]
fn test_early_exit_penalty_scenario() {
    let mut t = TestPool::new(config(1_000, 100, false)).unwrap();
    t.stake(ALICE, 1_000, 0).unwrap();
    t.withdraw(ALICE, 1_000, 50).unwrap();

    assert_eq!(t.tokens.balance_of(&STAKE, &COLLECTOR), 100);
    assert_eq!(t.stake_held(&ALICE), FUNDS - 100);
    assert_eq!(t.pool.total_staked(), 0);
    assert!(t.pool.events().contains(&PoolEvent::Withdrawn {
        user: ALICE,
        principal: 900,
        reward: 0,
        penalty: 100,
    }));
}

#[test]
fn test_reward_rate_and_half_period_earnings() {
    let mut t = TestPool::new(config(0, 0, false)).unwrap();
    t.add_reward(1_000, 100, 0).unwrap();
    assert_eq!(t.pool.pool_info().reward_rate, 10);

    t.stake(ALICE, 1_000, 0).unwrap();
    assert_eq!(t.pool.earned(&ALICE, 50).unwrap(), 500);

    t.claim(ALICE, 50).unwrap();
    assert_eq!(t.reward_received(&ALICE), 500);
}

#[test]
fn test_mid_period_top_up_blends_rate() {
    let mut t = TestPool::new(config(0, 0, false)).unwrap();
    t.stake(ALICE, 1_000, 0).unwrap();
    t.add_reward(2_000, 100, 0).unwrap();
    assert_eq!(t.pool.pool_info().reward_rate, 20);

    // 10s left at 20/s = 200 remaining, plus 800 new, over 100s
    t.add_reward(800, 100, 90).unwrap();
    let info = t.pool.pool_info();
    assert_eq!(info.reward_rate, 10);
    assert_eq!(info.period_finish, 190);

    // Alice owns the whole pool: 90s at 20 then 100s at 10
    assert_eq!(t.pool.earned(&ALICE, 190).unwrap(), 1_800 + 1_000);
    t.exit(ALICE, 500).unwrap();
    assert_eq!(t.reward_received(&ALICE), 2_800);
    assert_eq!(t.pool.reward.reward_pool, 0);
}

#[test]
fn test_emergency_unstake_scenario() {
    let mut t = TestPool::new(config(1_000, 100, false)).unwrap();
    t.add_reward(1_000, 100, 0).unwrap();
    t.stake(ALICE, 1_000, 0).unwrap();
    t.stake(ALICE, 1_000, 40).unwrap();
    let rewards = t.pool.user(&ALICE).rewards;
    assert_eq!(rewards, 400);

    t.emergency_unstake(ALICE, 50).unwrap();

    assert_eq!(t.stake_held(&ALICE), FUNDS);
    assert_eq!(t.tokens.balance_of(&STAKE, &COLLECTOR), 0);
    assert_eq!(t.pool.user(&ALICE).rewards, rewards);
    assert_eq!(t.reward_received(&ALICE), 0);
}

#[test]
fn test_lock_boundary() {
    let mut t = TestPool::new(config(2_500, 1_000, false)).unwrap();
    t.stake(ALICE, 4_001, 10).unwrap();
    t.stake(BOB, 4_001, 10).unwrap();

    // One second early: floor(4001 * 2500 / 10000) = 1000
    t.exit(ALICE, 1_009).unwrap();
    assert_eq!(t.tokens.balance_of(&STAKE, &COLLECTOR), 1_000);

    // Exactly at deposit + lock: free
    t.exit(BOB, 1_010).unwrap();
    assert_eq!(t.tokens.balance_of(&STAKE, &COLLECTOR), 1_000);
    assert_eq!(t.stake_held(&BOB), FUNDS);
}

#[test]
fn test_initialize_twice_keeps_first_config() {
    let mut t = TestPool::new(config(1_000, 100, false)).unwrap();
    let before = t.pool.snapshot();

    let err = process_initialize(&mut t.pool, &config(0, 5, true), 77).unwrap_err();
    assert_eq!(err, PoolError::AlreadyInitialized);
    assert_eq!(t.pool.snapshot(), before);
}

#[test]
fn test_zero_staker_gap_is_lost() {
    let mut t = TestPool::new(config(0, 0, false)).unwrap();
    t.add_reward(1_000, 100, 0).unwrap();

    // Nobody staked for the first 30s
    t.stake(ALICE, 500, 30).unwrap();
    assert!(t.pool.reward.reward_per_share_stored.is_zero());

    t.exit(ALICE, 100).unwrap();
    assert_eq!(t.reward_received(&ALICE), 700);
    // The 300 emitted into the empty pool stay stranded
    assert_eq!(t.pool.reward.reward_pool, 300);
    assert_eq!(t.pool.earned(&BOB, 1_000).unwrap(), 0);
}

#[test]
fn test_rewards_split_by_share_and_time() {
    let mut t = TestPool::new(config(0, 0, false)).unwrap();
    t.add_reward(3_000, 100, 0).unwrap();
    t.stake(ALICE, 100, 0).unwrap();
    t.stake(BOB, 200, 50).unwrap();

    // First 50s: Alice alone at 30/s. Last 50s: 1/3 vs 2/3
    assert_eq!(t.pool.earned(&ALICE, 100).unwrap(), 1_500 + 500);
    assert_eq!(t.pool.earned(&BOB, 100).unwrap(), 1_000);
}

#[test]
fn test_failed_operations_leave_no_trace() {
    let mut t = TestPool::new(config(1_000, 100, false)).unwrap();
    t.add_reward(1_000, 100, 0).unwrap();
    t.stake(ALICE, 1_000, 0).unwrap();
    t.pool.take_events();
    let before = t.pool.snapshot();

    assert_eq!(t.withdraw(ALICE, 1_001, 10), Err(PoolError::InsufficientBalance));
    assert_eq!(t.stake(BOB, 0, 10), Err(PoolError::ZeroAmount));
    assert_eq!(t.stake(BOB, FUNDS + 1, 10), Err(PoolError::TransferFailed));
    assert_eq!(t.add_reward(1, 0, 10), Err(PoolError::ZeroDuration));
    assert_eq!(t.compound(ALICE, 10), Err(PoolError::CompoundDisabled));

    assert_eq!(t.pool.snapshot(), before);
    assert!(t.pool.events().is_empty());
}

#[test]
fn test_pause_blocks_users_but_not_emergency_exit() {
    let mut t = TestPool::new(config(1_000, 100, false)).unwrap();
    t.stake(ALICE, 1_000, 0).unwrap();
    t.pause(1).unwrap();

    assert_eq!(t.stake(ALICE, 1, 2), Err(PoolError::Paused));
    assert_eq!(t.withdraw(ALICE, 1, 2), Err(PoolError::Paused));
    assert_eq!(t.exit(ALICE, 2), Err(PoolError::Paused));
    assert_eq!(t.claim(ALICE, 2), Err(PoolError::Paused));
    t.add_reward(100, 10, 2).unwrap();

    t.emergency_unstake(ALICE, 3).unwrap();
    assert_eq!(t.stake_held(&ALICE), FUNDS);

    t.unpause(4).unwrap();
    t.stake(ALICE, 1, 5).unwrap();
}

#[test]
fn test_compound_grows_stake_in_place() {
    let mut t = TestPool::new(config(500, 100, true)).unwrap();
    t.stake(ALICE, 1_000, 0).unwrap();
    t.add_reward(1_000, 100, 0).unwrap();
    let custody = t.tokens.balance_of(&STAKE, &POOL);

    t.compound(ALICE, 100).unwrap();
    assert_eq!(t.pool.balance_of(&ALICE), 2_000);
    assert_eq!(t.pool.reward.reward_pool, 0);
    assert_eq!(t.tokens.balance_of(&STAKE, &POOL), custody);

    // Compounding restarted the lock
    t.exit(ALICE, 150).unwrap();
    assert_eq!(t.tokens.balance_of(&STAKE, &COLLECTOR), 100);
    assert_eq!(t.stake_held(&ALICE), FUNDS - 1_000 + 1_900);
}

#[test]
fn test_accumulator_scaling() {
    let mut t = TestPool::new(config(0, 0, false)).unwrap();
    t.add_reward(1_000, 100, 0).unwrap();
    t.stake(ALICE, 3, 0).unwrap();
    t.claim(ALICE, 1).unwrap();
    // 10 units over 3 staked, floored at 1e18 precision
    assert_eq!(t.pool.reward.reward_per_share_stored, U256::from(10 * PRECISION / 3));
    assert_eq!(t.reward_received(&ALICE), 9);
}

#[test]
fn test_dust_stake_cannot_freeze_pool() {
    let mut t = TestPool::new(config(0, 0, false)).unwrap();
    let funding = 1_000 * PRECISION;
    t.tokens.mint(&REWARD, &OWNER, funding);
    t.add_reward(funding, 86_400, 0).unwrap();

    // A single base unit alone in the pool for half a day
    t.stake(ALICE, 1, 0).unwrap();
    t.claim(ALICE, 43_200).unwrap();
    assert!(t.pool.reward.reward_per_share_stored > U256::from(u128::MAX));
    let rate = t.pool.reward.reward_rate;
    assert_eq!(t.reward_received(&ALICE), rate * 43_200);

    // Every other operation keeps working
    t.stake(BOB, 1_000, 50_000).unwrap();
    t.withdraw(ALICE, 1, 86_400).unwrap();
    t.exit(BOB, 90_000).unwrap();
    t.add_reward(1_000, 100, 90_000).unwrap();
    t.stake(CAROL, 10, 90_010).unwrap();
    t.exit(CAROL, 90_100).unwrap();

    assert_eq!(t.pool.total_staked(), 0);
    let paid = t.reward_received(&ALICE) + t.reward_received(&BOB) + t.reward_received(&CAROL);
    assert!(paid <= funding + 1_000);
    assert_eq!(t.pool.reward.reward_pool, funding + 1_000 - paid);
}
