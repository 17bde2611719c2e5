//! Domain layer for the persistence cache.

pub mod errors;
pub mod keys;

pub use errors::*;
pub use keys::*;
