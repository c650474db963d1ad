//! Task manager service: the rule engine over all four collections.
//!
//! # Responsibility
//! - Own the in-memory collections and enforce cross-entity invariants.
//! - Keep callers decoupled from storage; I/O happens only in `open`/`save`.

pub mod categories;
pub mod clock;
pub mod error;
pub mod priorities;
pub mod queries;
pub mod reminders;
pub mod task_manager;
pub mod tasks;
