//! FormSync Core - Fundamental types and primitives
//!
//! This crate defines the core types used throughout FormSync:
//! - Field paths and ordered path sets
//! - Interaction marker trees (touched / dirty snapshots)
//! - Sync modes, field events and sync decisions
//! - Field constraints and sync configuration

pub mod path;
pub mod marker;
pub mod mode;
pub mod constraints;
pub mod config;
pub mod error;

pub use path::*;
pub use marker::*;
pub use mode::*;
pub use constraints::*;
pub use config::*;
pub use error::*;
