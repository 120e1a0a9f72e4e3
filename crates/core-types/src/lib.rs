//! # Conduit Core Types
//!
//! This crate defines the foundational data structures for the swap execution
//! pipeline: transaction descriptors, the swap bundle produced by the upstream
//! quote/build step, the normalized broadcaster request, and the confirmation
//! receipt returned by the watcher.
//!
//! As a Layer 0 crate it depends on nothing else in the workspace and provides
//! the shared vocabulary for every other crate.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::Leg;
pub use error::CoreError;
pub use structs::{
    ConfirmationReceipt, Fee, Quote, SubmitRequest, SwapBundle, TokenInfo, TransactionDescriptor,
    TxHash, WatchRequest,
};
