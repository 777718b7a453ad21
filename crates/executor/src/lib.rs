//! # Order Executor Crate
//!
//! This crate turns a validated order into exactly one exchange call and a
//! normalized `OrderOutcome`. It defines no exchange of its own: the
//! `ApiClient` it talks to and the `OrderJournal` it records into are handed
//! in by the caller.
//!
//! ## Architectural Principles
//!
//! - **Fail fast:** `OrderExecutor::submit` validates before anything leaves
//!   the process. Invalid input never reaches the network.
//! - **One call, one outcome:** no retries, no backoff, no hidden state. Every
//!   failure is classified (`ValidationEcho`, `Api`, `Network`) and returned,
//!   never swallowed.
//!
//! ## Public API
//!
//! - `OrderExecutor`: validation + placement + journaling for a single order.
//! - `OrderOutcome`, `PlacedOrder`, `OrderFailure`, `FailureKind`: the results.

// Declare the modules that constitute this crate.
pub mod exchange;
pub mod outcome;

// Re-export the key components to provide a clean, public-facing API.
pub use exchange::OrderExecutor;
pub use outcome::{FailureKind, OrderFailure, OrderOutcome, PlacedOrder};
