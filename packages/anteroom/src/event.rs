// observability events.
//
// the protocol treats logging as an external collaborator: actors hand
// discrete state-transition events to a sink and never wait on it. ordering
// within one actor matches emission order; ordering across actors is whatever
// the sink observes.

use crate::request::RequestId;
use std::{
    borrow::Cow,
    fmt,
    sync::Mutex,
};

/// The actor a state-transition event originates from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Actor {
    Provider,
    Requester,
    Dispatcher,
    AgingTimer,
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Actor::Provider => write!(f, "provider"),
            Actor::Requester => write!(f, "requester"),
            Actor::Dispatcher => write!(f, "dispatcher"),
            Actor::AgingTimer => write!(f, "aging timer"),
        }
    }
}

/// A discrete state-transition event.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Event {
    /// The actor the event originates from.
    pub actor: Actor,
    /// The request the event is about, if any.
    pub subject: Option<RequestId>,
    /// Human-readable description of the transition.
    pub message: Cow<'static, str>,
}

impl Event {
    pub fn new(
        actor: Actor,
        subject: Option<RequestId>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Event { actor, subject, message: message.into() }
    }

    /// Provider event with no subject.
    pub fn provider(message: impl Into<Cow<'static, str>>) -> Self {
        Event::new(Actor::Provider, None, message)
    }

    /// Requester event about the requester's own request.
    pub fn requester(id: RequestId, message: impl Into<Cow<'static, str>>) -> Self {
        Event::new(Actor::Requester, Some(id), message)
    }
}

/// Sink for state-transition events.
///
/// Fire and forget: emission never blocks the protocol and is never
/// acknowledged.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: Event);
}

/// Production sink that forwards every event to `tracing` at info level.
#[derive(Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: Event) {
        match event.subject {
            Some(id) => info!(actor = %event.actor, subject = id, "{}", event.message),
            None => info!(actor = %event.actor, "{}", event.message),
        }
    }
}

/// Test sink that records every event in emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Event>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone out everything recorded so far.
    pub fn snapshot(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}
