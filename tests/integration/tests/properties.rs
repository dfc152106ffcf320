//! Property tests over arbitrary operation sequences

use proptest::prelude::*;

use stakepool_integration_tests::stakepool_common::Pubkey;
use stakepool_integration_tests::stakepool_pool::{invariants, PoolEvent};
use stakepool_integration_tests::*;

#[derive(Debug, Clone)]
enum Op {
    Stake(usize, u128),
    Withdraw(usize, u128),
    Exit(usize),
    Claim(usize),
    Compound(usize),
    EmergencyUnstake(usize),
    AddReward(u128, u64),
    Pause,
    Unpause,
}

const USERS: [Pubkey; 3] = [ALICE, BOB, CAROL];

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..3usize, 1..10_000u128).prop_map(|(u, a)| Op::Stake(u, a)),
        2 => (0..3usize, 1..10_000u128).prop_map(|(u, a)| Op::Withdraw(u, a)),
        1 => (0..3usize).prop_map(Op::Exit),
        2 => (0..3usize).prop_map(Op::Claim),
        1 => (0..3usize).prop_map(Op::Compound),
        1 => (0..3usize).prop_map(Op::EmergencyUnstake),
        2 => (1..100_000u128, 1..500u64).prop_map(|(a, d)| Op::AddReward(a, d)),
        1 => Just(Op::Pause),
        1 => Just(Op::Unpause),
    ]
}

/// (time step, operation) pairs
fn sequence() -> impl Strategy<Value = Vec<(u64, Op)>> {
    prop::collection::vec((0..60u64, op_strategy()), 1..40)
}

fn apply(t: &mut TestPool, now: u64, op: &Op) -> bool {
    let result = match *op {
        Op::Stake(u, a) => t.stake(USERS[u], a, now),
        Op::Withdraw(u, a) => t.withdraw(USERS[u], a, now),
        Op::Exit(u) => t.exit(USERS[u], now),
        Op::Claim(u) => t.claim(USERS[u], now),
        Op::Compound(u) => t.compound(USERS[u], now),
        Op::EmergencyUnstake(u) => t.emergency_unstake(USERS[u], now),
        Op::AddReward(a, d) => t.add_reward(a, d, now),
        Op::Pause => t.pause(now),
        Op::Unpause => t.unpause(now),
    };
    result.is_ok()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_ledger_invariants_hold(
        steps in sequence(),
        same_asset in any::<bool>(),
        penalty_bps in 0..=10_000u16,
        lock in 0..200u64,
    ) {
        let mut t = TestPool::new(config(penalty_bps, lock, same_asset)).unwrap();
        let supply_stake = t.tokens.supply(&STAKE);
        let supply_reward = t.tokens.supply(&REWARD);
        let mut now = 0u64;
        let mut added = 0u128;
        let mut drawn = 0u128;

        for (dt, op) in &steps {
            now += dt;
            let before = t.pool.snapshot();
            let ok = apply(&mut t, now, op);
            let after = t.pool.snapshot();

            if !ok {
                prop_assert_eq!(&before, &after, "failed {:?} changed state", op);
            }
            prop_assert!(invariants::all_ok(&t.pool), "conservation broken after {:?}", op);
            prop_assert!(
                invariants::accumulator_monotonic(&before, &after),
                "accumulator decreased after {:?}", op
            );

            drawn += invariants::rewards_drawn(&before, &after);
            for event in t.pool.take_events() {
                if let PoolEvent::RewardAdded { amount, .. } = event {
                    added += amount;
                }
            }
            prop_assert!(drawn <= added, "paid {} of {} added", drawn, added);
        }

        // Tokens only move between holders
        prop_assert_eq!(t.tokens.supply(&STAKE), supply_stake);
        prop_assert_eq!(t.tokens.supply(&REWARD), supply_reward);
        // Custody covers every staked unit
        prop_assert!(t.tokens.balance_of(&STAKE, &POOL) >= t.pool.total_staked());
    }

    #[test]
    fn prop_everyone_can_leave(
        steps in sequence(),
        penalty_bps in 0..=10_000u16,
    ) {
        let mut t = TestPool::new(config(penalty_bps, 50, false)).unwrap();
        let mut now = 0u64;
        for (dt, op) in &steps {
            now += dt;
            apply(&mut t, now, op);
        }
        let _ = t.unpause(now);

        for user in USERS {
            if t.pool.balance_of(&user) > 0 {
                prop_assert!(t.exit(user, now + 1_000).is_ok());
            }
        }
        prop_assert_eq!(t.pool.total_staked(), 0);
        // Whatever the ledger still owes, custody holds enough reward asset
        prop_assert!(t.tokens.balance_of(&REWARD, &POOL) >= t.pool.reward.reward_pool);
    }
}
