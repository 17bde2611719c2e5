//! # Order Transaction Processor
//!
//! Pure functions of `(ledger, order-or-claim, today)`. They never mutate
//! their input; the caller applies `TransactionOutcome::updated_user` as one
//! atomic replacement or applies nothing.

use chrono::NaiveDate;
use tracing::debug;

use shared_types::{CurrencyKind, Notification, NotificationKind, Order, OrderStatus, PointLog, User};

use crate::domain::{next_streak, DailyReward, TransactionOutcome};
use crate::error::{TransactionError, TransactionResult};

/// Barkat earned by an order: `reward_points * quantity + bonus_points` per line.
pub fn order_reward(order: &Order) -> TransactionResult<u64> {
    order.items.iter().try_fold(0u64, |acc, item| {
        let line = item
            .reward_points
            .checked_mul(u64::from(item.quantity))
            .and_then(|p| p.checked_add(item.bonus_points.unwrap_or(0)))
            .ok_or(TransactionError::Overflow {
                field: "order_reward",
            })?;
        acc.checked_add(line).ok_or(TransactionError::Overflow {
            field: "order_reward",
        })
    })
}

/// Grant the commerce reward for `order`.
///
/// Idempotent per order id: an order already listed in
/// `rewarded_order_ids` is refused.
pub fn process_order(
    user: &User,
    order: &Order,
    today: NaiveDate,
) -> TransactionResult<TransactionOutcome> {
    if order.user_id != user.id {
        return Err(TransactionError::ForeignOrder {
            order_id: order.id.clone(),
            owner: order.user_id.clone(),
            user_id: user.id.clone(),
        });
    }
    if user.rewarded_order_ids.contains(&order.id) {
        return Err(TransactionError::AlreadyRewarded {
            order_id: order.id.clone(),
        });
    }
    if order.status == OrderStatus::Cancelled {
        return Err(TransactionError::OrderCancelled {
            order_id: order.id.clone(),
        });
    }
    if order.items.is_empty() {
        return Err(TransactionError::EmptyOrder {
            order_id: order.id.clone(),
        });
    }

    let earned = order_reward(order)?;
    let mut updated = user.clone();
    updated.points = updated
        .points
        .checked_add(earned)
        .ok_or(TransactionError::Overflow { field: "points" })?;
    updated.refresh_level();
    updated.points_history.push(PointLog {
        action: format!("Order {}", order.id),
        points: earned,
        kind: CurrencyKind::Barkat,
        date: today,
    });
    updated.rewarded_order_ids.insert(order.id.clone());

    let new_notifications: Vec<Notification> = order
        .deeds
        .iter()
        .map(|deed| Notification {
            id: format!("deed-{}", deed.id),
            title: "Heritage deed issued".to_string(),
            body: match &deed.name_on_deed {
                Some(name) => format!("Deed {} for a {} palm in the name of {}", deed.id, deed.palm_type_id, name),
                None => format!("Deed {} for a {} palm", deed.id, deed.palm_type_id),
            },
            created_on: today,
            read: false,
            kind: NotificationKind::Deed,
        })
        .collect();

    // Newest first.
    let older = std::mem::take(&mut updated.notifications);
    updated.notifications = new_notifications.iter().cloned().chain(older).collect();

    debug!(
        user_id = %user.id,
        order_id = %order.id,
        earned,
        deeds = order.deeds.len(),
        "Order reward computed"
    );

    Ok(TransactionOutcome {
        updated_user: updated,
        points_earned: earned,
        new_notifications,
    })
}

/// Open the daily chest on `today`.
pub fn process_daily_chest(
    user: &User,
    reward: &DailyReward,
    today: NaiveDate,
) -> TransactionResult<TransactionOutcome> {
    if let Some(last) = user.last_daily_chest_claimed {
        if last == today {
            return Err(TransactionError::AlreadyClaimedToday { claimed_on: last });
        }
        if last > today {
            return Err(TransactionError::ClaimInFuture {
                claimed_on: last,
                today,
            });
        }
    }

    let streak = next_streak(user.last_daily_chest_claimed, user.daily_streak, today)
        .ok_or(TransactionError::Overflow {
            field: "daily_streak",
        })?;

    let mut updated = user.clone();
    match reward.kind {
        CurrencyKind::Barkat => {
            updated.points = updated
                .points
                .checked_add(reward.amount)
                .ok_or(TransactionError::Overflow { field: "points" })?;
            updated.refresh_level();
        }
        CurrencyKind::Mana => {
            updated.mana_points = updated
                .mana_points
                .checked_add(reward.amount)
                .ok_or(TransactionError::Overflow {
                    field: "mana_points",
                })?;
        }
    }
    updated.points_history.push(PointLog {
        action: reward.label.clone(),
        points: reward.amount,
        kind: reward.kind,
        date: today,
    });
    updated.daily_streak = streak;
    updated.last_daily_chest_claimed = Some(today);

    debug!(user_id = %user.id, streak, amount = reward.amount, kind = ?reward.kind, "Daily chest opened");

    Ok(TransactionOutcome {
        updated_user: updated,
        points_earned: reward.amount,
        new_notifications: Vec::new(),
    })
}
