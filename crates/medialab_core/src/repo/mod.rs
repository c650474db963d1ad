//! Repository layer: snapshot persistence for the four collections.
//!
//! # Responsibility
//! - Define the whole-snapshot load/save contract.
//! - Keep file layout and JSON details out of the service layer.
//!
//! # Invariants
//! - Repositories never enforce business rules.

pub mod data_repo;
pub mod json_repo;
pub mod memory_repo;
