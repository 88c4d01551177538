//! # Anteroom: a single-provider request scheduling simulation.
//!
//! A lone provider serves requests that arrive independently and concurrently,
//! sleeping when idle and waking on the next arrival (the classic "sleeping
//! barber" coordination problem), extended with two priority classes, an
//! anti-starvation aging mechanism, and a startup readiness barrier.
//!
//! All coordination happens through three primitives in [`sync`]:
//!
//! - a zero-buffer rendezvous handoff, on which an idle provider parks and
//!   which an arriving requester can complete only if the provider is already
//!   parked,
//! - bounded FIFO queues with non-blocking push/pop attempts, written by many
//!   tasks and drained by one,
//! - a one-shot readiness gate that holds back request generation until the
//!   provider is confirmed to be listening.
//!
//! There is no shared mutable state between the actors beyond those
//! primitives, and no locks held across suspension points.
//!
//! Three orchestrations of the same protocol live in [`system`], from a single
//! shared queue up to a dispatcher-fed main queue with aging promotion and the
//! readiness barrier:
//!
//! ```no_run
//! use anteroom::{config::Config, durations::SeededDurations, event::TracingSink, system};
//! use std::sync::Arc;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), anteroom::error::RunError> {
//!     let config = Config::default();
//!     let durations = Box::new(SeededDurations::tiered());
//!     let sink: Arc<dyn anteroom::event::EventSink> = Arc::new(TracingSink);
//!     system::run_three_tier(&config, durations, sink).await
//! }
//! ```

#[macro_use]
extern crate tracing;

pub mod aging;
pub mod config;
pub mod dispatch;
pub mod durations;
pub mod error;
pub mod event;
pub mod provider;
pub mod request;
pub mod requester;
pub mod sync;
pub mod system;
pub mod util;

pub use crate::{
    config::Config,
    request::{Priority, Receipt, Request},
};
