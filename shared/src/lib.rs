//! Shared types and models for the SCA Cupping Journal
//!
//! This crate contains the score model (both rubric schemas), the scoring
//! engine, the legacy-to-current migration, and the clamping helpers used
//! by every mutator. It has no I/O; persistence and export live in the
//! application crate.

pub mod migrate;
pub mod models;
pub mod score;
pub mod validation;

pub use migrate::*;
pub use models::*;
pub use score::*;
pub use validation::*;
