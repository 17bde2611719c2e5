//! # Core Domain Entities
//!
//! Defines the portal entities shared by every subsystem.
//!
//! ## Clusters
//!
//! - **Identity**: `User`, `Session`, `SessionClaims`
//! - **Ledger**: `PointLog`, `CurrencyKind`, `Notification`
//! - **Commerce**: `CartItem`, `Order`, `Deed`
//! - **Profile**: `Address`, `Conversation`

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Opaque user identifier, stable across provider, backend and cache.
pub type UserId = String;

/// Placeholder display name given to profiles that were never completed.
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// Points required per level step.
pub const POINTS_PER_LEVEL: u64 = 1_000;

/// Level derived from the barkat balance. Monotonic in `points`.
#[must_use]
pub fn level_for_points(points: u64) -> u32 {
    u32::try_from(points / POINTS_PER_LEVEL)
        .unwrap_or(u32::MAX - 1)
        .saturating_add(1)
}

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Claims the identity provider exposes alongside a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// An authenticated session as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: UserId,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub claims: SessionClaims,
}

impl Session {
    /// Create a session carrying only an id and an email.
    pub fn with_email(id: impl Into<UserId>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: Some(email.into()),
            phone: None,
            claims: SessionClaims::default(),
        }
    }

    /// Create a session carrying only an id and a phone number.
    pub fn with_phone(id: impl Into<UserId>, phone: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
            phone: Some(phone.into()),
            claims: SessionClaims::default(),
        }
    }
}

/// A user record: identity plus gamification ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub points: u64,
    #[serde(default)]
    pub mana_points: u64,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub daily_streak: u32,
    #[serde(default)]
    pub last_daily_chest_claimed: Option<NaiveDate>,
    #[serde(default)]
    pub points_history: Vec<PointLog>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub conversations: Vec<Conversation>,
    /// Orders whose commerce reward has already been granted.
    #[serde(default)]
    pub rewarded_order_ids: BTreeSet<String>,
    /// Built from provider claims rather than loaded from a profile store.
    /// Not persisted; cleared once the user edits or earns anything.
    #[serde(skip)]
    pub provisional: bool,
}

fn default_level() -> u32 {
    1
}

impl User {
    /// Create an empty ledger for `id`.
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            phone: None,
            email: None,
            full_name: String::new(),
            avatar_url: None,
            points: 0,
            mana_points: 0,
            level: 1,
            is_admin: false,
            daily_streak: 0,
            last_daily_chest_claimed: None,
            points_history: Vec::new(),
            addresses: Vec::new(),
            notifications: Vec::new(),
            conversations: Vec::new(),
            rewarded_order_ids: BTreeSet::new(),
            provisional: false,
        }
    }

    /// Synthesize a skeleton profile from provider claims alone.
    pub fn skeleton_from_session(session: &Session) -> Self {
        let mut user = Self::new(session.id.clone());
        user.email = session.email.clone();
        user.phone = session.phone.clone();
        user.full_name = session
            .claims
            .display_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());
        user.avatar_url = session.claims.avatar_url.clone();
        user.provisional = true;
        user
    }

    /// Builder-style display name setter.
    #[must_use]
    pub fn named(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }

    /// A rich profile looks like a previously completed one: a real display
    /// name, or an admin flag. A provisional user is never rich, whatever
    /// name the provider claims carried.
    pub fn is_rich(&self) -> bool {
        if self.provisional {
            return false;
        }
        let name = self.full_name.trim();
        self.is_admin || (!name.is_empty() && name != DEFAULT_DISPLAY_NAME)
    }

    /// Re-derive `level` from `points`.
    pub fn refresh_level(&mut self) {
        self.level = level_for_points(self.points);
    }

    /// Primary contact used for allow-list matching.
    pub fn contacts(&self) -> impl Iterator<Item = &str> {
        self.email.as_deref().into_iter().chain(self.phone.as_deref())
    }
}

// =============================================================================
// CLUSTER B: LEDGER
// =============================================================================

/// The two in-app currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyKind {
    /// Primary "barkat" points.
    Barkat,
    /// Secondary mana points.
    Mana,
}

/// One append-only entry in a user's point history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointLog {
    pub action: String,
    pub points: u64,
    pub kind: CurrencyKind,
    pub date: NaiveDate,
}

/// Notification category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Order,
    Deed,
    Reward,
    System,
}

/// An in-app notification attached to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub body: String,
    pub created_on: NaiveDate,
    #[serde(default)]
    pub read: bool,
    pub kind: NotificationKind,
}

// =============================================================================
// CLUSTER C: COMMERCE
// =============================================================================

/// What a cart line represents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    /// Regular shop product.
    Product,
    /// A heritage palm planting; each unit yields one deed.
    HeritagePalm {
        palm_type_id: String,
        #[serde(default)]
        intention: Option<String>,
        #[serde(default)]
        name_on_deed: Option<String>,
    },
}

/// A line in the shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub unit_price: u64,
    pub quantity: u32,
    /// Barkat points granted per unit.
    #[serde(default)]
    pub reward_points: u64,
    /// Flat bonus attached to special items.
    #[serde(default)]
    pub bonus_points: Option<u64>,
    pub kind: ItemKind,
}

impl CartItem {
    /// Line total, saturating.
    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Paid,
    Fulfilled,
    Cancelled,
}

/// A heritage-planting record created by an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deed {
    pub id: String,
    pub order_id: String,
    pub palm_type_id: String,
    pub intention: Option<String>,
    pub name_on_deed: Option<String>,
    pub issued_on: NaiveDate,
}

/// A placed order with a snapshot of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: UserId,
    pub items: Vec<CartItem>,
    pub total_amount: u64,
    pub placed_on: NaiveDate,
    pub status: OrderStatus,
    #[serde(default)]
    pub deeds: Vec<Deed>,
}

impl Order {
    /// Snapshot `items` into a new order and derive one deed per heritage unit.
    pub fn from_cart(
        id: impl Into<String>,
        user_id: impl Into<UserId>,
        items: &[CartItem],
        placed_on: NaiveDate,
    ) -> Self {
        let id = id.into();
        let total_amount = items
            .iter()
            .fold(0u64, |acc, item| acc.saturating_add(item.line_total()));

        let mut deeds = Vec::new();
        for item in items {
            let ItemKind::HeritagePalm {
                palm_type_id,
                intention,
                name_on_deed,
            } = &item.kind
            else {
                continue;
            };
            for unit in 0..item.quantity {
                deeds.push(Deed {
                    id: format!("{}-{}-{}", id, item.id, unit + 1),
                    order_id: id.clone(),
                    palm_type_id: palm_type_id.clone(),
                    intention: intention.clone(),
                    name_on_deed: name_on_deed.clone(),
                    issued_on: placed_on,
                });
            }
        }

        Self {
            id,
            user_id: user_id.into(),
            items: items.to_vec(),
            total_amount,
            placed_on,
            status: OrderStatus::Paid,
            deeds,
        }
    }
}

// =============================================================================
// CLUSTER D: PROFILE
// =============================================================================

/// A saved shipping address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: String,
    pub title: String,
    pub recipient: String,
    pub line: String,
    pub city: String,
    pub postal_code: Option<String>,
}

/// A community conversation thread reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub unread: u32,
}
