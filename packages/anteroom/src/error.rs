// crate error types.

use std::fmt;
use thiserror::Error;

/// Error for a non-blocking push onto a bounded queue that is at capacity.
///
/// Carries the rejected element back out so the caller can hold it and retry;
/// nothing is ever silently dropped.
#[derive(Debug)]
pub struct QueueFullError<T> {
    /// The element that could not be enqueued.
    pub rejected: T,
}

impl<T> fmt::Display for QueueFullError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "bounded queue is at capacity")
    }
}

impl<T: fmt::Debug> std::error::Error for QueueFullError<T> {}

/// Error for waiting on a request whose provider-side handle was dropped
/// before the corresponding signal was sent.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Error)]
#[error("request was abandoned before service completed")]
pub struct AbandonedError;

/// Error for a malformed startup configuration.
///
/// Reported before any task is spawned.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConfigError {
    /// A queue was configured with capacity zero.
    #[error("{0} queue capacity must be at least 1")]
    ZeroCapacity(&'static str),
    /// The aging period was configured as zero.
    #[error("aging period must be greater than zero")]
    ZeroAgingPeriod,
}

/// Error for running one of the orchestrated variants to completion.
#[derive(Debug, Error)]
pub enum RunError {
    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// A requester never observed both of its service signals.
    #[error("a requester was abandoned before completing service: {0}")]
    Abandoned(#[from] AbandonedError),
    /// A requester task panicked or was cancelled.
    #[error("requester task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
