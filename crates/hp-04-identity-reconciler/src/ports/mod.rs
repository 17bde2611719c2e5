//! Ports layer for the identity reconciler.
//!
//! - Inbound (Driving) ports: the reconciler API driven by the listener and UI
//! - Outbound (Driven) ports: identity provider, backend, address bar

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
