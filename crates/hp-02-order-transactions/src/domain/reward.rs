//! Reward descriptors and transaction outcomes.

use serde::{Deserialize, Serialize};
use shared_types::{CurrencyKind, Notification, User};

/// What the daily chest pays out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReward {
    pub kind: CurrencyKind,
    pub amount: u64,
    /// Point-history label, e.g. "Daily chest".
    pub label: String,
}

impl DailyReward {
    pub fn barkat(amount: u64) -> Self {
        Self {
            kind: CurrencyKind::Barkat,
            amount,
            label: "Daily chest".to_string(),
        }
    }

    pub fn mana(amount: u64) -> Self {
        Self {
            kind: CurrencyKind::Mana,
            amount,
            label: "Daily chest".to_string(),
        }
    }
}

/// Result of a successful transaction: the full replacement ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOutcome {
    pub updated_user: User,
    pub points_earned: u64,
    pub new_notifications: Vec<Notification>,
}
