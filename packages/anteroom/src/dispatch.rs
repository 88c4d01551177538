// the dispatcher: drains the two priority queues into the main queue.
//
// decouples "which priority wins" from "is the provider awake": aging
// promotion can still move a request from low to high while the provider is
// busy or asleep, because nothing enters the main queue except through here.

use crate::{
    error::QueueFullError,
    event::{Actor, Event, EventSink},
    request::Request,
    sync::queue::BoundedQueue,
};
use std::{sync::Arc, time::Duration};
use tokio::time::sleep;

// shared poll deadline for the actors that must never block indefinitely.
pub(crate) const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Continuously moves work from the high and low priority queues into the
/// single main queue the provider polls, always preferring high.
pub struct Dispatcher {
    high: BoundedQueue<Request>,
    low: BoundedQueue<Request>,
    main: BoundedQueue<Request>,
    sink: Arc<dyn EventSink>,
}

impl Dispatcher {
    pub fn new(
        high: BoundedQueue<Request>,
        low: BoundedQueue<Request>,
        main: BoundedQueue<Request>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Dispatcher { high, low, main, sink }
    }

    /// Run the dispatch loop forever.
    pub async fn run(self) {
        loop {
            // low is only looked at when high is empty
            let request = match self.high.try_pop() {
                Some(request) => request,
                None => match self.low.try_pop() {
                    Some(request) => {
                        self.sink.emit(Event::new(
                            Actor::Dispatcher,
                            Some(request.id()),
                            "forwarding a low priority request",
                        ));
                        request
                    }
                    None => {
                        sleep(POLL_INTERVAL).await;
                        continue;
                    }
                },
            };
            self.forward(request).await;
        }
    }

    // a popped request is committed: held and retried while the main queue is
    // full, never dropped and never returned to a priority queue.
    async fn forward(&self, mut request: Request) {
        loop {
            match self.main.try_push(request) {
                Ok(()) => return,
                Err(QueueFullError { rejected }) => {
                    request = rejected;
                    sleep(POLL_INTERVAL).await;
                }
            }
        }
    }
}
