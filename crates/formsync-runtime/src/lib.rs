//! FormSync Runtime - Field sync coordination
//!
//! This crate wires the decision engine to the outside world:
//! 1. Read the field's pre-event touched status
//! 2. Apply the native change / blur handling in the field store
//! 3. Evaluate the sync policy
//! 4. Refresh the field's constraints
//! 5. Select the revalidation set from fresh snapshots
//! 6. Dispatch the validator without waiting for it

pub mod collab;
pub mod dispatch;
pub mod field;
pub mod form;
pub mod telemetry;

#[cfg(test)]
mod fakes;

pub use collab::*;
pub use dispatch::*;
pub use field::*;
pub use form::*;
pub use telemetry::*;
