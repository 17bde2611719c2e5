//! Ports layer for the persistence cache.
//!
//! Only an outbound (driven) port exists: the raw key-value store. The typed
//! API consumers use is `PersistenceCache` itself.

pub mod outbound;

pub use outbound::*;
