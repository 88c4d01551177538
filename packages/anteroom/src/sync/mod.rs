//! Synchronization primitives the protocol is built from.
//!
//! Each primitive here is a thin, purpose-built handle pair or shared handle:
//! a zero-buffer rendezvous ([`handoff`]), a bounded multi-writer FIFO
//! ([`queue`]), and a one-shot readiness barrier ([`gate`]). All operations
//! writers perform are non-blocking attempts; the only indefinite suspension
//! point in the whole crate is the provider parking on its handoff bay.

pub mod gate;
pub mod handoff;
pub mod queue;
