// anti-starvation aging.
//
// a self-rescheduling one-shot timer: sleep one period, promote at most one
// waiting low-priority request to the tail of the high-priority queue, sleep
// again. fires approximately every period, never more than once per period,
// and never permanently stops. this bounds how long a low-priority request
// can wait before it starts moving up, even under a steady stream of
// high-priority arrivals.

use crate::{
    dispatch::POLL_INTERVAL,
    error::QueueFullError,
    event::{Actor, Event, EventSink},
    request::Request,
    sync::queue::BoundedQueue,
};
use std::{sync::Arc, time::Duration};
use tokio::time::sleep;

/// Periodically promotes the head of the low-priority queue to the tail of
/// the high-priority queue.
pub struct AgingTimer {
    low: BoundedQueue<Request>,
    high: BoundedQueue<Request>,
    period: Duration,
    sink: Arc<dyn EventSink>,
}

impl AgingTimer {
    pub fn new(
        low: BoundedQueue<Request>,
        high: BoundedQueue<Request>,
        period: Duration,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        AgingTimer { low, high, period, sink }
    }

    /// Run the promotion loop forever.
    pub async fn run(self) {
        loop {
            sleep(self.period).await;
            // at most one promotion per firing; nothing to do when low is
            // empty
            if let Some(request) = self.low.try_pop() {
                let id = request.id();
                self.promote(request).await;
                self.sink.emit(Event::new(
                    Actor::AgingTimer,
                    Some(id),
                    "promoted a request from low to high priority",
                ));
            }
        }
    }

    // promoted requests join the back of the high-priority line. held and
    // retried if high is momentarily full, never dropped.
    async fn promote(&self, mut request: Request) {
        loop {
            match self.high.try_push(request) {
                Ok(()) => return,
                Err(QueueFullError { rejected }) => {
                    request = rejected;
                    sleep(POLL_INTERVAL).await;
                }
            }
        }
    }
}
