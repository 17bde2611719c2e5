//! # Session Hydrator (hp-05)
//!
//! Restores the user session once at boot, before the realtime listener has
//! had a chance to say anything.
//!
//! ## Fallback chain
//!
//! | Step | First choice | Then | Then | Last |
//! |------|--------------|------|------|------|
//! | Session | provider (8 s deadline) | none | | |
//! | User id | session | backend marker | cache last-active | second session check |
//! | Profile | backend | cache snapshot | skeleton | anonymous |
//! | Catalogs | non-empty cache slot | bundled defaults | | |
//!
//! Every step degrades instead of failing. The only error `run` returns is
//! `HydrationError::AlreadyRan`.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use config::{HydrationConfig, DEFAULT_SESSION_TIMEOUT};
pub use domain::{HydrationReport, IdSource, ProfileSource};
pub use error::{HydrationError, HydrationResult};
pub use ports::SessionHydratorApi;
pub use service::SessionHydrator;
