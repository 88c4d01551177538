// the single-server state machine.
//
// the provider cycles through three states:
//
// - idle-polling: non-blocking pop attempts against its poll sources, in
//   precedence order. a hit moves to busy; a total miss moves to
//   idle-sleeping.
// - idle-sleeping: emit the idle event, open the readiness gate (first time
//   only), then park on the rendezvous bay. the park is bounded by a short
//   deadline after which the poll sources are re-checked, so work forwarded
//   into a queue while the provider sleeps is not stranded until the next
//   direct handoff arrives.
// - busy: send "started", hold for the service duration, send "finished".
//
// the loop never terminates on its own; the orchestrator aborts it once the
// simulation is over.

use crate::{
    dispatch::POLL_INTERVAL,
    durations::DurationSource,
    event::{Actor, Event, EventSink},
    request::Request,
    sync::{gate::GateSignal, handoff::Bay, queue::BoundedQueue},
};
use std::sync::Arc;
use tokio::time::sleep;

/// The single server: alternates between serving queued requests and parking
/// on the rendezvous bay when everything is empty.
pub struct Provider {
    // poll sources in precedence order; a later queue is only checked when
    // every earlier one is empty
    sources: Vec<BoundedQueue<Request>>,
    bay: Bay<Request>,
    ready: Option<GateSignal>,
    durations: Box<dyn DurationSource>,
    sink: Arc<dyn EventSink>,
}

impl Provider {
    pub fn new(
        sources: Vec<BoundedQueue<Request>>,
        bay: Bay<Request>,
        ready: Option<GateSignal>,
        durations: Box<dyn DurationSource>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Provider { sources, bay, ready, durations, sink }
    }

    /// Run the serving loop forever.
    pub async fn run(mut self) {
        loop {
            match self.poll_sources() {
                Some(request) => self.serve(request).await,
                None => {
                    self.sink.emit(Event::provider("is sleeping"));
                    if let Some(mut signal) = self.ready.take() {
                        // first time asleep: confirmed parked and listening,
                        // requester generation may begin
                        signal.open();
                    }
                    let (request, direct) = self.await_arrival().await;
                    if direct {
                        self.sink.emit(Event::provider("woken up by a requester"));
                    }
                    self.serve(request).await;
                }
            }
        }
    }

    // idle-polling: first hit in precedence order wins.
    fn poll_sources(&self) -> Option<Request> {
        self.sources.iter().find_map(|queue| queue.try_pop())
    }

    // idle-sleeping: park on the bay, re-checking the poll sources on a short
    // deadline. the deadline-aware park withdraws its own parked sender, so a
    // handoff that a requester saw succeed can never be lost to the timeout.
    // returns the next request and whether it arrived by direct handoff.
    async fn await_arrival(&mut self) -> (Request, bool) {
        loop {
            match self.bay.accept_within(POLL_INTERVAL).await {
                Some(request) => return (request, true),
                None => {
                    if let Some(request) = self.poll_sources() {
                        return (request, false);
                    }
                }
            }
        }
    }

    // busy: exactly one "started" and one "finished" per request, in order.
    async fn serve(&mut self, request: Request) {
        let id = request.id();
        let duration = self.durations.next_duration();
        self.sink.emit(Event::new(Actor::Provider, Some(id), "started serving"));
        let in_service = request.begin();
        sleep(duration).await;
        in_service.finish();
        self.sink.emit(Event::new(Actor::Provider, Some(id), "finished serving"));
    }
}
