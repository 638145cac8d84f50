//! FormSync Test Harness - In-memory collaborators and form scenarios
//!
//! This crate provides:
//! - An in-memory field store tracking touched / dirty markers
//! - Rule-driven constraint resolution with cross-field dependencies
//! - A recording validator checking values against the rules
//! - Form scenarios driving field coordinators end to end

pub mod store;
pub mod rules;
pub mod validator;
pub mod scenario;

pub use store::*;
pub use rules::*;
pub use validator::*;
pub use scenario::*;
