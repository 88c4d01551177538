// the client protocol, executed once per arriving request.

use crate::{
    error::{AbandonedError, QueueFullError},
    event::{Event, EventSink},
    request::{Priority, Request, RequestId},
    sync::{handoff::Caller, queue::BoundedQueue},
};
use std::{sync::Arc, time::Duration};
use tokio::time::sleep;

// how long a requester backs off after finding its queue full.
const RETRY_BACKOFF: Duration = Duration::from_millis(50);

/// One arriving request: attempts a direct handoff to a parked provider, else
/// enqueues into its priority queue, then waits out both service signals.
pub struct Requester {
    id: RequestId,
    priority: Priority,
    caller: Caller<Request>,
    queue: BoundedQueue<Request>,
    sink: Arc<dyn EventSink>,
}

impl Requester {
    pub fn new(
        id: RequestId,
        priority: Priority,
        caller: Caller<Request>,
        queue: BoundedQueue<Request>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Requester { id, priority, caller, queue, sink }
    }

    /// Execute the protocol to completion.
    ///
    /// There is no timeout on the waits: a request that is never served keeps
    /// its requester suspended forever. Errs only if the provider-side handle
    /// is dropped unserved.
    pub async fn run(self) -> Result<(), AbandonedError> {
        self.sink.emit(Event::requester(self.id, "wants service"));
        let (request, mut receipt) = Request::new(self.id, self.priority);

        let mut pending = request;
        loop {
            // the handoff only succeeds if the provider is parked right now
            pending = match self.caller.try_pass(pending) {
                Ok(()) => break,
                Err(back) => back,
            };
            match self.queue.try_push(pending) {
                Ok(()) => {
                    self.sink.emit(Event::requester(self.id, "is waiting"));
                    break;
                }
                Err(QueueFullError { rejected }) => {
                    // full queue: hold the request, back off, then retry the
                    // whole arrival attempt starting from the handoff
                    pending = rejected;
                    self.sink.emit(Event::requester(self.id, "finds the queue full, backing off"));
                    sleep(RETRY_BACKOFF).await;
                }
            }
        }

        receipt.started().await?;
        self.sink.emit(Event::requester(self.id, "is being served"));
        receipt.finished().await?;
        self.sink.emit(Event::requester(self.id, "has been served"));
        Ok(())
    }
}
