//! Pure domain logic for the bookline availability engine.
//!
//! This crate has zero internal dependencies so the persistence layer, the
//! engine, and operational tooling can all share the same types, constants,
//! and slot arithmetic.

pub mod cutoff;
pub mod error;
pub mod slots;
pub mod types;
