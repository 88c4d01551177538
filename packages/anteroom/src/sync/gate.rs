// one-shot readiness barrier.

use tokio::sync::oneshot;

/// Create a connected readiness gate pair.
///
/// The [`GateSignal`] half goes to the task whose readiness is being awaited;
/// the [`GateWait`] half goes to the single task gated on it.
pub fn gate() -> (GateSignal, GateWait) {
    let (tx, rx) = oneshot::channel();
    (GateSignal(Some(tx)), GateWait(rx))
}

/// Signalling half of a readiness gate.
///
/// Fires at most once; calls after the first are no-ops, so the holder can
/// call [`open`](GateSignal::open) unconditionally on every pass through its
/// loop.
pub struct GateSignal(Option<oneshot::Sender<()>>);

impl GateSignal {
    /// Open the gate, releasing the waiter.
    pub fn open(&mut self) {
        if let Some(tx) = self.0.take() {
            // the waiter may already have given up and dropped its half
            let _ = tx.send(());
        }
    }
}

/// Waiting half of a readiness gate.
pub struct GateWait(oneshot::Receiver<()>);

impl GateWait {
    /// Suspend until the gate is opened.
    ///
    /// Also resolves if the signal half is dropped unfired, so an aborted
    /// prerequisite task cannot leave the waiter suspended forever.
    pub async fn wait(self) {
        let _ = self.0.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::task::yield_now;

    #[tokio::test]
    async fn wait_resolves_once_opened() {
        let (mut signal, wait) = gate();
        let waiting = tokio::spawn(wait.wait());
        yield_now().await;
        assert!(!waiting.is_finished());
        signal.open();
        waiting.await.unwrap();
    }

    #[tokio::test]
    async fn open_is_idempotent() {
        let (mut signal, wait) = gate();
        signal.open();
        signal.open();
        wait.wait().await;
    }

    #[tokio::test]
    async fn dropped_signal_releases_the_waiter() {
        let (signal, wait) = gate();
        drop(signal);
        wait.wait().await;
    }
}
