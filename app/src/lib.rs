//! SCA Cupping Journal - application crate
//!
//! Persistence, session management and file export around the `shared`
//! domain crate. The CLI binary in `main.rs` is the only user surface;
//! everything here is synchronous and single-user by design.

pub mod config;
pub mod error;
pub mod export;
pub mod storage;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult};
