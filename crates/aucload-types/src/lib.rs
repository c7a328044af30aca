//! Shared types for the aucload workspace.
//!
//! [`model`] mirrors the shape of the JSON listing archives as they come off
//! disk; every field there is optional and loosely typed, because the archive
//! is. [`relation`] holds the four flat relations a run produces and their
//! fully validated row types.

pub mod model;
pub mod relation;

pub use model::{BidEnvelope, BidRecord, ItemRecord, UserRecord};
pub use relation::{BidRow, CategoryRow, ItemRow, Relation, UserRow};
