//! Entity model for categories, priorities, tasks, and reminders.
//!
//! # Responsibility
//! - Define the four record types persisted by the repository layer.
//! - Own the per-entity rules that need no cross-collection context
//!   (delayed check, reminder offset arithmetic, status transitions).
//!
//! # Invariants
//! - Every entity is identified by a stable string id that is never reused.
//! - Entities reference each other by id only; nothing is embedded.

pub mod category;
pub mod priority;
pub mod reminder;
pub mod task;

use uuid::Uuid;

/// Allocates a fresh globally unique entity id (UUID v4, hyphenated).
pub fn new_entity_id() -> String {
    Uuid::new_v4().to_string()
}
