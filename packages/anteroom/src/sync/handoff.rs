// zero-buffer rendezvous handoff.
//
// the receiving side parks itself by leaving a one-shot sender in a shared
// slot. a passing attempt succeeds only by taking that sender out of the slot
// and completing it, so the attempt can only succeed while the receiver is
// already parked. there is no buffer anywhere: both sides must be present.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{sync::oneshot, time::sleep};

/// Create a connected rendezvous pair.
///
/// The [`Caller`] half is cloneable and shared by every requester; the
/// [`Bay`] half is owned by the single provider.
pub fn handoff<T>() -> (Caller<T>, Bay<T>) {
    let slot = Arc::new(Mutex::new(None));
    (Caller { slot: Arc::clone(&slot) }, Bay { slot })
}

// the parked receiver, if any.
type Slot<T> = Arc<Mutex<Option<oneshot::Sender<T>>>>;

/// Sending half of a rendezvous handoff.
pub struct Caller<T> {
    slot: Slot<T>,
}

impl<T> Clone for Caller<T> {
    fn clone(&self) -> Self {
        Caller { slot: Arc::clone(&self.slot) }
    }
}

impl<T> Caller<T> {
    /// Attempt a direct handoff without blocking.
    ///
    /// Succeeds if and only if an [`Bay::accept`] call is currently parked on
    /// the other side. On failure the value is handed back.
    pub fn try_pass(&self, value: T) -> Result<(), T> {
        let parked = self.slot.lock().unwrap().take();
        match parked {
            // the parked accept may have been dropped since it parked, in
            // which case send hands the value back
            Some(tx) => tx.send(value),
            None => Err(value),
        }
    }
}

/// Receiving half of a rendezvous handoff.
pub struct Bay<T> {
    slot: Slot<T>,
}

impl<T> Bay<T> {
    /// Park until a caller passes a value directly.
    ///
    /// While this future is suspended, exactly one concurrent [`try_pass`]
    /// attempt can succeed. Cancelling this future is not serialized against
    /// a concurrent pass; to un-park on a deadline without risking the passed
    /// value, use [`accept_within`](Bay::accept_within).
    ///
    /// [`try_pass`]: Caller::try_pass
    pub async fn accept(&self) -> T {
        loop {
            let (tx, rx) = oneshot::channel();
            *self.slot.lock().unwrap() = Some(tx);
            if let Ok(value) = rx.await {
                return value;
            }
            // our parked sender was displaced without a pass; park again
        }
    }

    /// Park like [`accept`](Bay::accept), but give up once `within` elapses,
    /// returning `None`.
    ///
    /// The timeout branch withdraws the parked sender under the slot lock
    /// before abandoning the receiver. If the sender is already gone, a
    /// caller has taken it and committed to the pass, so the handoff is
    /// completed instead of dropped: a [`try_pass`] that returned `Ok` is
    /// always observed here, never lost to the deadline.
    ///
    /// [`try_pass`]: Caller::try_pass
    pub async fn accept_within(&self, within: Duration) -> Option<T> {
        let (tx, mut rx) = oneshot::channel();
        *self.slot.lock().unwrap() = Some(tx);
        tokio::select! {
            result = &mut rx => result.ok(),
            _ = sleep(within) => {
                let withdrawn = self.slot.lock().unwrap().take();
                if withdrawn.is_some() {
                    // our sender was still parked, so no pass can complete
                    // against this park anymore
                    None
                } else {
                    // a caller holds the sender and will send; wait it out
                    rx.await.ok()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::task::yield_now;

    #[tokio::test]
    async fn pass_fails_with_nobody_parked() {
        let (caller, _bay) = handoff::<u32>();
        assert_eq!(caller.try_pass(7), Err(7));
    }

    #[tokio::test]
    async fn pass_succeeds_while_parked() {
        let (caller, bay) = handoff::<u32>();
        let accepting = tokio::spawn(async move { bay.accept().await });
        yield_now().await;
        assert_eq!(caller.try_pass(7), Ok(()));
        assert_eq!(accepting.await.unwrap(), 7);
    }

    #[tokio::test]
    async fn slot_is_consumed_by_a_successful_pass() {
        let (caller, bay) = handoff::<u32>();
        let accepting = tokio::spawn(async move { bay.accept().await });
        yield_now().await;
        assert_eq!(caller.try_pass(1), Ok(()));
        // the bay has not re-parked, so a second pass must fail
        assert_eq!(caller.try_pass(2), Err(2));
        assert_eq!(accepting.await.unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn accept_within_gives_up_at_the_deadline() {
        let (caller, bay) = handoff::<u32>();
        assert_eq!(bay.accept_within(Duration::from_millis(5)).await, None);
        // the expired park withdrew its sender, so a later pass still fails
        assert_eq!(caller.try_pass(3), Err(3));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn deadline_elapsing_never_loses_a_passed_value() {
        // race a very short deadline against a spinning pass: whenever the
        // pass reports success, the acceptor must observe the value
        for _ in 0..500 {
            let (caller, bay) = handoff::<u32>();
            let accepting = tokio::spawn(async move {
                bay.accept_within(Duration::from_micros(10)).await
            });
            let mut passed = false;
            while !passed && !accepting.is_finished() {
                passed = caller.try_pass(7).is_ok();
                yield_now().await;
            }
            let accepted = accepting.await.unwrap();
            if passed {
                assert_eq!(accepted, Some(7), "pass succeeded but the value was lost");
            } else {
                assert_eq!(accepted, None);
            }
        }
    }

    #[tokio::test]
    async fn dropped_accept_does_not_swallow_a_value() {
        let (caller, bay) = handoff::<u32>();
        {
            let accepting = tokio::spawn(async move {
                bay.accept().await;
            });
            yield_now().await;
            accepting.abort();
            let _ = accepting.await;
        }
        assert_eq!(caller.try_pass(9), Err(9));
    }
}
