//! # Heritage Portal Test Suite
//!
//! Unified test crate for scenarios that cross crate boundaries.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs          # Wired engine over in-memory adapters
//!     ├── boot.rs              # Hydration end to end
//!     ├── logout_fence.rs      # Logout vs. stale sign-in races
//!     ├── salvage.rs           # Profile precedence on refresh
//!     ├── cache_corruption.rs  # Corrupt local slots
//!     └── commerce.rs          # Orders and daily chest through the store
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p hp-tests
//! cargo test -p hp-tests integration::logout_fence::
//! ```

#![allow(dead_code)]

pub mod integration;
