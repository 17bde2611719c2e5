//! Ports layer for the session hydrator.
//!
//! The hydrator drives the same outbound ports as the identity reconciler
//! (`hp_04_identity_reconciler::ports`), so only the inbound API lives here.

pub mod inbound;

pub use inbound::SessionHydratorApi;
