//! Category record.

use super::new_entity_id;
use serde::{Deserialize, Serialize};

/// Stable identifier of a category.
pub type CategoryId = String;

/// User-defined task grouping such as "Work" or "Personal".
///
/// Names are not unique; identity is the id alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    /// Creates a category with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(new_entity_id(), name)
    }

    /// Creates a category with a caller-provided id (import and test paths).
    pub fn with_id(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
