//! Domain models for the SCA Cupping Journal

mod cup;
mod session;

pub use cup::*;
pub use session::*;
