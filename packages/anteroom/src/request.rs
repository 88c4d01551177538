// the per-request handoff handle.
//
// a request carries exactly two signals over its lifetime, "service started"
// and "service finished", each delivered exactly once and in that order. the
// typestate progression Request -> InService -> gone makes both properties
// structural: begin consumes the request and sends the start signal, finish
// consumes the in-service handle and sends the finish signal, and neither
// handle can be duplicated or rewound.

use crate::error::AbandonedError;
use std::fmt;
use tokio::sync::oneshot;

/// Identity of a request, used only for observability.
pub type RequestId = u64;

/// Priority class of a request.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Priority {
    /// Served ahead of any pending low-priority work.
    High,
    /// Served only when no high-priority work is pending; protected from
    /// starvation by aging promotion.
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// Provider-side handle to a request awaiting service.
#[derive(Debug)]
pub struct Request {
    id: RequestId,
    priority: Priority,
    started: oneshot::Sender<()>,
    finished: oneshot::Sender<()>,
}

/// Provider-side handle to a request currently being served.
#[derive(Debug)]
pub struct InService {
    id: RequestId,
    finished: oneshot::Sender<()>,
}

/// Requester-side handle for observing the two service signals.
#[derive(Debug)]
pub struct Receipt {
    id: RequestId,
    priority: Priority,
    started: oneshot::Receiver<()>,
    finished: oneshot::Receiver<()>,
}

impl Request {
    /// Create a fresh request and the receipt for observing its service.
    pub fn new(id: RequestId, priority: Priority) -> (Request, Receipt) {
        let (started_tx, started_rx) = oneshot::channel();
        let (finished_tx, finished_rx) = oneshot::channel();
        let request = Request {
            id,
            priority,
            started: started_tx,
            finished: finished_tx,
        };
        let receipt = Receipt {
            id,
            priority,
            started: started_rx,
            finished: finished_rx,
        };
        (request, receipt)
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Send the "service started" signal and move to the in-service state.
    pub fn begin(self) -> InService {
        // the requester may have been dropped; service proceeds regardless
        let _ = self.started.send(());
        InService { id: self.id, finished: self.finished }
    }
}

impl InService {
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Send the "service finished" signal, consuming the request entirely.
    pub fn finish(self) {
        let _ = self.finished.send(());
    }
}

impl Receipt {
    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Suspend until the "service started" signal arrives.
    ///
    /// There is no timeout: a receipt whose request is never served waits
    /// forever. Errs only if the provider-side handle was dropped unserved.
    pub async fn started(&mut self) -> Result<(), AbandonedError> {
        (&mut self.started).await.map_err(|_| AbandonedError)
    }

    /// Suspend until the "service finished" signal arrives.
    ///
    /// Must be awaited after [`started`](Receipt::started) has resolved.
    pub async fn finished(&mut self) -> Result<(), AbandonedError> {
        (&mut self.finished).await.map_err(|_| AbandonedError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn signals_arrive_in_order() {
        let (request, mut receipt) = Request::new(1, Priority::High);
        let in_service = request.begin();
        receipt.started().await.unwrap();
        in_service.finish();
        receipt.finished().await.unwrap();
    }

    #[tokio::test]
    async fn dropping_an_unserved_request_is_observable() {
        let (request, mut receipt) = Request::new(2, Priority::Low);
        drop(request);
        assert_eq!(receipt.started().await, Err(AbandonedError));
    }

    #[tokio::test]
    async fn dropping_mid_service_is_observable() {
        let (request, mut receipt) = Request::new(3, Priority::Low);
        let in_service = request.begin();
        receipt.started().await.unwrap();
        drop(in_service);
        assert_eq!(receipt.finished().await, Err(AbandonedError));
    }
}
