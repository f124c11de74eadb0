//! Bounded disjunctive waiting.
//!
//! A login submission resolves through racing signals: the page navigates
//! away, or an error renders in place. `first_of` waits on an ordered set of
//! async conditions under one shared deadline, resolving on whichever yields
//! a value first. Fixed sleeps are never used; worst-case latency is the
//! deadline itself.

use std::time::Duration;

use futures::future::BoxFuture;
use tokio::time::{sleep, Instant};

use crate::error::Result;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Deadline and poll cadence for one bounded wait.
#[derive(Debug, Clone, Copy)]
pub struct WaitPolicy {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// One pollable condition: yields `Some` once it holds.
pub type Condition<'a, T> = Box<dyn Fn() -> BoxFuture<'a, Result<Option<T>>> + Send + 'a>;

/// Poll `conditions` in order until one yields a value, the deadline passes
/// (`Ok(None)`), or a condition fails. Every condition is evaluated at least
/// once; order within a round decides ties.
pub async fn first_of<'a, T>(
    conditions: &[Condition<'a, T>],
    policy: &WaitPolicy,
) -> Result<Option<T>> {
    let deadline = Instant::now() + policy.timeout;
    loop {
        for condition in conditions {
            if let Some(value) = condition().await? {
                return Ok(Some(value));
            }
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(None);
        }
        // Never sleep past the deadline.
        sleep(policy.poll_interval.min(deadline - now)).await;
    }
}
