//! FormSync State Engine - Schema-sync decisions
//!
//! This crate implements the pure part of the engine:
//! - Field-path flattening of touched / dirty marker trees
//! - Revalidation-set selection
//! - The sync-mode policy table
//!
//! Nothing here performs I/O or holds state between calls.

pub mod flatten;
pub mod select;
pub mod policy;

pub use flatten::*;
pub use select::*;
pub use policy::*;
