//! `tallysheet-core` — building blocks shared by the invoice worksheet crates.
//!
//! Pure domain primitives only: identifiers, the error model and the
//! command/event traits. No IO, no formatting, no presentation.

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;

pub use aggregate::Aggregate;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::SeqId;
