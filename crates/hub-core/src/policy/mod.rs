//! Access policy evaluator
//!
//! Pure functions deciding what a viewer may see or change. Soft deletion
//! is checked by the lifecycle services before these are consulted.

mod access;

pub use access::{AccessPolicy, OwnerScope, Viewer};
