//! # Portal Runtime Library
//!
//! Exposes the runtime's modules for testing. The entry point is the
//! `main.rs` binary.
//!
//! - `container/` - configuration and component wiring
//! - `runtime` - startup, listener lifetime, graceful shutdown

pub mod container;
pub mod runtime;

pub use container::{load_config, ConfigError, PortalContainer, RuntimeConfig};
pub use runtime::PortalRuntime;
