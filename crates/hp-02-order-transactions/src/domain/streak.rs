//! # Daily Streak Rule
//!
//! A claim dated exactly one calendar day after the previous claim extends
//! the streak. Any other gap, or no previous claim, starts over at 1.
//!
//! ```text
//! last = today - 1  ──→ streak + 1
//! last < today - 1  ──→ 1
//! none              ──→ 1
//! last >= today     ──→ refused (see `can_claim_daily_chest`)
//! ```

use chrono::NaiveDate;
use shared_types::User;

/// Streak value after a claim on `today`, or `None` on overflow.
pub fn next_streak(last_claim: Option<NaiveDate>, current: u32, today: NaiveDate) -> Option<u32> {
    match last_claim {
        Some(last) if today.pred_opt() == Some(last) => current.checked_add(1),
        _ => Some(1),
    }
}

/// Caller-side guard: whether the chest can be opened on `today`.
pub fn can_claim_daily_chest(user: &User, today: NaiveDate) -> bool {
    user.last_daily_chest_claimed
        .map_or(true, |last| last < today)
}
