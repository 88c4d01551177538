//! Orchestrations of the protocol, one per variant.
//!
//! All three wire the same actors together and differ only in queue topology:
//!
//! - [`run_single_queue`]: one shared queue feeds the provider directly.
//! - [`run_two_tier`]: independent high and low queues, polled by the
//!   provider in precedence order; an aging timer promotes low to high.
//! - [`run_three_tier`]: a dispatcher drains high and low into a single main
//!   queue the provider polls, and a readiness barrier holds back every
//!   requester until the provider is confirmed parked and listening.
//!
//! Each orchestration spawns its background actors behind abort-on-drop
//! guards, spawns the configured requesters, and returns once every requester
//! has observed both of its service signals.

use crate::{
    aging::AgingTimer,
    config::Config,
    dispatch::Dispatcher,
    durations::DurationSource,
    error::{AbandonedError, RunError},
    event::EventSink,
    provider::Provider,
    request::{Priority, Request, RequestId},
    requester::Requester,
    sync::{
        gate::gate,
        handoff::{handoff, Caller},
        queue::BoundedQueue,
    },
    util::TaskGuard,
};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Run the base variant: a single bounded queue, no priorities, no aging, no
/// readiness barrier.
///
/// All configured requesters (high and low counts combined) share one queue
/// of `main_capacity`.
pub async fn run_single_queue(
    config: &Config,
    durations: Box<dyn DurationSource>,
    sink: Arc<dyn EventSink>,
) -> Result<(), RunError> {
    config.validate()?;

    let (caller, bay) = handoff();
    let queue = BoundedQueue::bounded(config.main_capacity);

    let provider = Provider::new(
        vec![queue.clone()],
        bay,
        None,
        durations,
        Arc::clone(&sink),
    );
    let _provider = TaskGuard::spawn(provider.run());

    let mut requesters = JoinSet::new();
    spawn_requesters(&mut requesters, config, &caller, &queue, &queue, &sink);
    join_all(requesters).await
}

/// Run the two-tier variant: high and low priority queues polled in
/// precedence order by the provider, with aging promotion.
///
/// This variant has a known startup race: requesters that arrive between the
/// provider's first poll miss and its first park can sit queued until the
/// provider's next wake. [`run_three_tier`] closes it with the readiness
/// barrier.
pub async fn run_two_tier(
    config: &Config,
    durations: Box<dyn DurationSource>,
    sink: Arc<dyn EventSink>,
) -> Result<(), RunError> {
    config.validate()?;

    let (caller, bay) = handoff();
    let high = BoundedQueue::bounded(config.high_capacity);
    let low = BoundedQueue::bounded(config.low_capacity);

    let provider = Provider::new(
        vec![high.clone(), low.clone()],
        bay,
        None,
        durations,
        Arc::clone(&sink),
    );
    let _provider = TaskGuard::spawn(provider.run());
    let aging = AgingTimer::new(
        low.clone(),
        high.clone(),
        config.aging_period,
        Arc::clone(&sink),
    );
    let _aging = TaskGuard::spawn(aging.run());

    let mut requesters = JoinSet::new();
    spawn_requesters(&mut requesters, config, &caller, &high, &low, &sink);
    join_all(requesters).await
}

/// Run the richest variant: dispatcher-fed main queue, aging promotion, and
/// the startup readiness barrier.
///
/// No requester's protocol begins before the provider has parked on the
/// rendezvous bay for the first time.
pub async fn run_three_tier(
    config: &Config,
    durations: Box<dyn DurationSource>,
    sink: Arc<dyn EventSink>,
) -> Result<(), RunError> {
    config.validate()?;

    let (caller, bay) = handoff();
    let high = BoundedQueue::bounded(config.high_capacity);
    let low = BoundedQueue::bounded(config.low_capacity);
    let main = BoundedQueue::bounded(config.main_capacity);
    let (ready_signal, ready_wait) = gate();

    let provider = Provider::new(
        vec![main.clone()],
        bay,
        Some(ready_signal),
        durations,
        Arc::clone(&sink),
    );
    let _provider = TaskGuard::spawn(provider.run());
    let dispatcher = Dispatcher::new(
        high.clone(),
        low.clone(),
        main.clone(),
        Arc::clone(&sink),
    );
    let _dispatcher = TaskGuard::spawn(dispatcher.run());
    let aging = AgingTimer::new(
        low.clone(),
        high.clone(),
        config.aging_period,
        Arc::clone(&sink),
    );
    let _aging = TaskGuard::spawn(aging.run());

    // the barrier: no requester is spawned until the provider confirms it is
    // parked and listening
    ready_wait.wait().await;

    let mut requesters = JoinSet::new();
    spawn_requesters(&mut requesters, config, &caller, &high, &low, &sink);
    join_all(requesters).await
}

// spawn the configured requesters: low ids come first numerically, but the
// high-priority requesters are spawned first, matching the simulation's
// historical arrival pattern.
fn spawn_requesters(
    requesters: &mut JoinSet<Result<(), AbandonedError>>,
    config: &Config,
    caller: &Caller<Request>,
    high: &BoundedQueue<Request>,
    low: &BoundedQueue<Request>,
    sink: &Arc<dyn EventSink>,
) {
    for i in 0..config.high_requesters {
        let id = (config.low_requesters + i) as RequestId;
        let requester = Requester::new(
            id,
            Priority::High,
            caller.clone(),
            high.clone(),
            Arc::clone(sink),
        );
        requesters.spawn(requester.run());
    }
    for id in 0..config.low_requesters {
        let requester = Requester::new(
            id as RequestId,
            Priority::Low,
            caller.clone(),
            low.clone(),
            Arc::clone(sink),
        );
        requesters.spawn(requester.run());
    }
}

// wait for every requester to observe [started, finished].
async fn join_all(mut requesters: JoinSet<Result<(), AbandonedError>>) -> Result<(), RunError> {
    while let Some(joined) = requesters.join_next().await {
        joined??;
    }
    Ok(())
}
