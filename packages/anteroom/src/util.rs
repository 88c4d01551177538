//! Tokio task utilities.

use std::future::Future;
use tokio::task::{spawn, AbortHandle};

/// Handle to a spawned background task that aborts the task when dropped.
///
/// The forever-looping actors (provider, dispatcher, aging timer) have no
/// in-band shutdown: the orchestrator holds one of these per actor and lets
/// them fall out of scope once every requester has completed.
pub struct TaskGuard(AbortHandle);

impl TaskGuard {
    /// Spawn a tokio task whose lifetime is tied to the returned guard.
    pub fn spawn<F>(f: F) -> Self
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        TaskGuard(spawn(f).abort_handle())
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}
