//! # State Store Subsystem
//!
//! **Subsystem ID:** hp-03
//!
//! ## Purpose
//!
//! Owns the single application state (current user, cart, orders, ledger,
//! UI flags, catalogs) and applies every change through a pure reducer.
//!
//! ## Invariants
//!
//! | Rule | Enforcement |
//! |------|-------------|
//! | `is_authenticated == user.is_some()` | `domain/reducer.rs` `finalize` |
//! | Super users are admins, forever | `finalize` via `SuperUserPolicy::escalate` |
//! | A load never replaces a user with nothing | `load_initial_data` |
//! | `all_users` mirror equals `user` | `finalize` |
//! | Rewards are idempotent per order id | `place_order` + hp-02 |
//!
//! ## Dispatch
//!
//! ```text
//! dispatch(action) ──lock──→ reduce(prev, action) ──→ next
//!                                                     │
//!                       PersistenceCache::sync ←──────┤
//!                       watch::Sender::send_replace ←─┘
//! ```

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{reduce, Action, AppState, InitialData, LoginPayload, UiFlags, UserPatch, View};
pub use ports::StateStoreApi;
pub use service::StateStore;
