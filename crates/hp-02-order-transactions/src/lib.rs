//! # Order Transaction Subsystem
//!
//! **Subsystem ID:** hp-02
//!
//! ## Purpose
//!
//! Computes gamification rewards for two user actions:
//!
//! | Operation | Currency | Guard |
//! |-----------|----------|-------|
//! | `process_order` | Barkat | order id not yet rewarded, order owned by the user |
//! | `process_daily_chest` | Barkat or Mana | not claimed today |
//!
//! Both return the complete updated ledger. Arithmetic is checked, so an
//! overflow yields an error and never a partial patch.
//!
//! ## Daily Streak
//!
//! See `domain::streak`. The streak grows only when consecutive claims are
//! exactly one calendar day apart.

pub mod domain;
pub mod error;
pub mod processor;

pub use domain::{can_claim_daily_chest, next_streak, DailyReward, TransactionOutcome};
pub use error::{TransactionError, TransactionResult};
pub use processor::{order_reward, process_daily_chest, process_order};
