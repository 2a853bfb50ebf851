//! tcc-core: stable foundation for the protection engine.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + float helpers + log spacing)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{TccError, TccResult};
pub use numeric::*;
pub use units::*;
