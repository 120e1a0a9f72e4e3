//! # Conduit Events
//!
//! This crate defines the lifecycle event language of the swap pipeline.
//!
//! The executor does not invoke opaque side-effecting callbacks; it produces a
//! sequence of `SwapEvent`s over a channel that the caller consumes. The
//! `StatusFlags` fold reconstructs the classic `loading` /
//! `pending_transaction` UI flags from that sequence, so the state machine's
//! transitions stay independently testable.
//!
//! As a low-layer crate, it knows nothing about transports or RPC; it sits
//! between the executor that produces events and the caller that consumes them.

// Declare the modules that make up this crate.
pub mod error;
pub mod messages;
pub mod sink;

// Re-export the core types to provide a clean public API.
pub use error::EventsError;
pub use messages::{StatusFlags, SwapEvent};
pub use sink::EventSink;
