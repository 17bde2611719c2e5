//! Error types for the order transaction processor

use chrono::NaiveDate;
use thiserror::Error;

/// Reasons a reward transaction is refused. No partial patch is ever
/// produced alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// The order's reward was granted before
    #[error("Order {order_id} was already rewarded")]
    AlreadyRewarded { order_id: String },

    /// The order belongs to someone else
    #[error("Order {order_id} belongs to {owner}, not {user_id}")]
    ForeignOrder {
        order_id: String,
        owner: String,
        user_id: String,
    },

    /// Cancelled orders earn nothing
    #[error("Order {order_id} is cancelled")]
    OrderCancelled { order_id: String },

    /// Orders without items earn nothing
    #[error("Order {order_id} has no items")]
    EmptyOrder { order_id: String },

    /// The chest was already opened today
    #[error("Daily chest already claimed on {claimed_on}")]
    AlreadyClaimedToday { claimed_on: NaiveDate },

    /// The last claim is dated after today (clock moved backwards)
    #[error("Last claim on {claimed_on} is after today ({today})")]
    ClaimInFuture {
        claimed_on: NaiveDate,
        today: NaiveDate,
    },

    /// A counter would exceed its range
    #[error("Arithmetic overflow computing {field}")]
    Overflow { field: &'static str },
}

/// Result type for reward transactions
pub type TransactionResult<T> = Result<T, TransactionError>;
