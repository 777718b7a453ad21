//! # Order Events
//!
//! This crate defines the structured order-lifecycle events written to the log
//! and the `OrderJournal` capability through which the executor records them.
//!
//! As a Layer 0 crate, it depends only on `core-types`.

// Declare the modules that make up this crate.
pub mod journal;
pub mod messages;

// Re-export the core types to provide a clean public API.
pub use journal::{MemoryJournal, OrderJournal, TracingJournal};
pub use messages::{InterfaceSource, LogLevel, OrderEvent, OrderEventKind};
