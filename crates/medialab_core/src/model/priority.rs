//! Priority record and the reserved Default priority name.

use super::new_entity_id;
use serde::{Deserialize, Serialize};

/// Stable identifier of a priority.
pub type PriorityId = String;

/// Name of the priority every task falls back to.
pub const DEFAULT_PRIORITY_NAME: &str = "Default";

/// Priority level such as "High" or "Low".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Priority {
    pub id: PriorityId,
    pub name: String,
}

impl Priority {
    /// Creates a priority with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(new_entity_id(), name)
    }

    /// Creates a priority with a caller-provided id.
    pub fn with_id(id: impl Into<PriorityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Creates a fresh Default priority.
    pub fn default_priority() -> Self {
        Self::new(DEFAULT_PRIORITY_NAME)
    }

    /// Returns whether the name matches "Default", ignoring case.
    pub fn has_default_name(&self) -> bool {
        self.name.eq_ignore_ascii_case(DEFAULT_PRIORITY_NAME)
    }
}
