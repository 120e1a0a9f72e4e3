//! # Conduit Executor Crate
//!
//! This crate provides the swap execution pipeline: the component that takes a
//! prepared `SwapBundle`, conditionally submits its approval transaction,
//! submits the swap transaction, waits for each to confirm, and reports
//! lifecycle progress over an event channel.
//!
//! ## Architectural Principles
//!
//! - **Plan vs. Interpretation:** the conditional approve-then-swap versus
//!   swap-only branch is computed once as a tagged `ExecutionPlan`, then
//!   interpreted by a single generic submit-then-confirm routine applied to
//!   each leg in order. The branching logic never duplicates the leg logic.
//! - **Collaborator Abstraction:** the pipeline is agnostic about who signs,
//!   submits and watches transactions. It drives the `Broadcaster` and
//!   `ConfirmationWatcher` traits, so a live JSON-RPC node and a test mock are
//!   interchangeable.
//! - **Stateless Runs:** the executor holds no state across invocations. Each
//!   `execute` call is a fresh run over one borrowed bundle; every externally
//!   visible effect flows through the event sink. A run that confirmed its
//!   approval but failed before swap confirmation is safe to retry with a
//!   fresh call: an on-chain allowance grant is idempotent.
//!
//! ## Public API
//!
//! - `SwapExecutor`: the pipeline itself.
//! - `ExecutionPlan`: the tagged two-leg / one-leg execution plan.
//! - `ExecutorError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod pipeline;
pub mod plan;

// Re-export the key components to provide a clean, public-facing API.
pub use error::ExecutorError;
pub use pipeline::SwapExecutor;
pub use plan::ExecutionPlan;
