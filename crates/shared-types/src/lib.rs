//! # Shared Types Crate
//!
//! Domain entities shared by every subsystem of the session engine: the user
//! ledger, commerce records, provider sessions, catalog data and the
//! super-user policy.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Serde everywhere**: Every entity round-trips through the local cache as
//!   JSON, so every field added later needs a `#[serde(default)]`.

pub mod catalog;
pub mod entities;
pub mod errors;
pub mod privilege;

pub use catalog::*;
pub use entities::*;
pub use errors::*;
pub use privilege::SuperUserPolicy;
