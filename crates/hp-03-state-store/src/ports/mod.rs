//! Ports layer for the state store.
//!
//! - Inbound (Driving) ports: API the hydrator and reconciler drive

pub mod inbound;

pub use inbound::*;
