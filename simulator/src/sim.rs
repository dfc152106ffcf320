//! Scenario replay: one blocking task per pool

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, bail, Context as _, Result};
use stakepool_common::{Context, Pubkey, UnixTimestamp};
use stakepool_pool::entrypoint::process_instruction;
use stakepool_pool::{invariants, InMemoryLedger, PoolEvent};
use stakepool_registry::{process_create_pool, PoolHandle, PoolRegistry};

use crate::config::{parse_key, Scenario};
use crate::report::{display_key, FailedAction, PoolReport, Report, Supply, UserReport};
use crate::schedule::{self, ActionQueue};

/// Token ledger shared by every pool; always locked after the pool
pub type Tokens = Arc<Mutex<InMemoryLedger>>;

pub async fn run(scenario: Scenario) -> Result<Report> {
    let registry_key = parse_key(&scenario.registry).context("Invalid registry key")?;
    let admin = parse_key(&scenario.admin).context("Invalid admin key")?;
    let mut registry = PoolRegistry::new(registry_key, admin);

    let mut ledger = InMemoryLedger::new();
    let mut assets = BTreeSet::new();
    for balance in &scenario.balances {
        let asset = parse_key(&balance.asset).context("Invalid asset key")?;
        let holder = parse_key(&balance.holder).context("Invalid holder key")?;
        ledger.mint(&asset, &holder, balance.amount as u128);
        assets.insert(asset);
    }
    let opening: Vec<(Pubkey, u128)> = assets.iter().map(|a| (*a, ledger.supply(a))).collect();
    let tokens: Tokens = Arc::new(Mutex::new(ledger));

    let mut created = Vec::with_capacity(scenario.pools.len());
    for pool_spec in &scenario.pools {
        let config = pool_spec
            .to_config()
            .with_context(|| format!("Invalid keys in pool {}", pool_spec.name))?;
        let ctx = Context::new(admin, pool_spec.created_at);
        let key = process_create_pool(&mut registry, &ctx, &config)
            .with_context(|| format!("Failed to create pool {}", pool_spec.name))?;
        created.push((pool_spec.name.clone(), key));
    }
    log::info!("Registry {} holds {} pools", scenario.registry, registry.all_pools_length());

    let mut queues = schedule::by_pool(&scenario.actions);
    if let Some(unknown) = queues.keys().find(|name| !created.iter().any(|(n, _)| n == *name)) {
        bail!("Action refers to unknown pool {}", unknown);
    }

    let mut tasks = Vec::with_capacity(created.len());
    for (name, key) in created {
        let handle = registry.pool(&key)?;
        let queue = queues.remove(&name).unwrap_or_default();
        let tokens = Arc::clone(&tokens);
        tasks.push(tokio::task::spawn_blocking(move || replay(name, key, handle, tokens, queue)));
    }
    let results = futures::future::try_join_all(tasks)
        .await
        .context("Pool task panicked")?;
    let pools = results.into_iter().collect::<Result<Vec<_>>>()?;

    let ledger = tokens.lock().map_err(|_| anyhow!("Token ledger lock poisoned"))?;
    let supplies = opening
        .into_iter()
        .map(|(asset, before)| Supply {
            asset: display_key(&asset),
            before,
            after: ledger.supply(&asset),
        })
        .collect();

    Ok(Report {
        registry: display_key(&registry_key),
        pool_count: registry.all_pools_length(),
        pools,
        supplies,
    })
}

/// Apply one pool's actions in time order, checking invariants after each
fn replay(
    name: String,
    key: Pubkey,
    handle: PoolHandle,
    tokens: Tokens,
    mut queue: ActionQueue,
) -> Result<PoolReport> {
    let mut report = PoolReport::new(name, &key);
    let mut clock: UnixTimestamp = 0;
    if let Some(first) = queue.peek() {
        log::debug!("{}: replaying {} actions from t={}", report.name, queue.len(), first.at);
    }

    while let Some(action) = queue.pop() {
        let caller = parse_key(&action.caller).context("Invalid caller key")?;
        let instruction = action.op.to_instruction().context("Invalid key in action")?;
        clock = clock.max(action.at);

        let mut pool = handle
            .lock()
            .map_err(|_| anyhow!("Pool {} lock poisoned", report.name))?;
        let mut ledger = tokens.lock().map_err(|_| anyhow!("Token ledger lock poisoned"))?;

        let before = pool.snapshot();
        let ctx = Context::new(caller, action.at);
        match process_instruction(&mut *pool, &ctx, &instruction.pack(), &mut *ledger) {
            Ok(()) => report.applied += 1,
            Err(e) => {
                log::warn!(
                    "{}: {:?} by {} at t={} failed: {}",
                    report.name,
                    instruction.tag(),
                    action.caller,
                    action.at,
                    e
                );
                report.failed.push(FailedAction {
                    at: action.at,
                    caller: action.caller.clone(),
                    instruction: format!("{:?}", instruction.tag()),
                    error: e.to_string(),
                });
            }
        }
        drop(ledger);
        let after = pool.snapshot();

        report.rewards_drawn += invariants::rewards_drawn(&before, &after);
        for event in pool.take_events() {
            if let PoolEvent::RewardAdded { amount, .. } = event {
                report.rewards_added += amount;
            }
            report.events.push(format!("t={} {}", action.at, event));
        }

        if !invariants::all_ok(&pool) {
            report.violations.push(format!("t={}: stake conservation broken", action.at));
        }
        if !invariants::accumulator_monotonic(&before, &after) {
            report.violations.push(format!("t={}: accumulator decreased", action.at));
        }
        if report.rewards_drawn > report.rewards_added {
            report.violations.push(format!("t={}: paid more than was added", action.at));
        }
    }

    let pool = handle
        .lock()
        .map_err(|_| anyhow!("Pool {} lock poisoned", report.name))?;
    let info = pool.pool_info();
    report.paused = info.paused;
    report.total_staked = info.total_staked;
    report.reward_pool = info.reward_pool;
    report.reward_rate = info.reward_rate;
    report.reward_per_share_stored = info.reward_per_share_stored.to_string();
    report.period_finish = info.period_finish;
    for (user, stake) in pool.users() {
        report.users.push(UserReport {
            user: display_key(user),
            balance: stake.balance,
            rewards: stake.rewards,
            earned: pool.earned(user, clock)?,
        });
    }

    log::info!(
        "{}: {} applied, {} failed, {} staked",
        report.name,
        report.applied,
        report.failed.len(),
        report.total_staked
    );
    Ok(report)
}
