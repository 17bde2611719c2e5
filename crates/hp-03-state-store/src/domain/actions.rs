//! # Actions
//!
//! The closed set of state transitions. Payloads are explicit types so the
//! reducer never has to guess at shapes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use hp_02_order_transactions::DailyReward;
use shared_types::{
    Address, AppSettings, CartItem, Conversation, Notification, Order, PalmType, PointLog, Product,
    User,
};

use super::state::View;

/// Payload of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPayload {
    pub user: User,
    /// Order history, when the lookup succeeded.
    pub orders: Option<Vec<Order>>,
    /// Leave the login UI open (e.g. to continue a multi-step form).
    pub keep_open: bool,
}

impl LoginPayload {
    pub fn new(user: User) -> Self {
        Self {
            user,
            orders: None,
            keep_open: false,
        }
    }

    #[must_use]
    pub fn with_orders(mut self, orders: Vec<Order>) -> Self {
        self.orders = Some(orders);
        self
    }
}

/// Bulk hydration payload. Every field is optional; `None` leaves the
/// corresponding slice untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitialData {
    pub user: Option<User>,
    pub orders: Option<Vec<Order>>,
    pub settings: Option<AppSettings>,
    pub products: Option<Vec<Product>>,
    pub palm_types: Option<Vec<PalmType>>,
    pub all_users: Option<Vec<User>>,
}

/// Shallow patch over the current user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub points: Option<u64>,
    pub mana_points: Option<u64>,
    pub is_admin: Option<bool>,
    pub daily_streak: Option<u32>,
    pub last_daily_chest_claimed: Option<NaiveDate>,
    pub points_history: Option<Vec<PointLog>>,
    pub addresses: Option<Vec<Address>>,
    pub notifications: Option<Vec<Notification>>,
    pub conversations: Option<Vec<Conversation>>,
}

impl UserPatch {
    pub fn full_name(name: impl Into<String>) -> Self {
        Self {
            full_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Apply every present field to `user`.
    pub fn apply_to(self, user: &mut User) {
        if let Some(v) = self.full_name {
            user.full_name = v;
        }
        if let Some(v) = self.avatar_url {
            user.avatar_url = Some(v);
        }
        if let Some(v) = self.phone {
            user.phone = Some(v);
        }
        if let Some(v) = self.email {
            user.email = Some(v);
        }
        if let Some(v) = self.points {
            user.points = v;
            user.refresh_level();
        }
        if let Some(v) = self.mana_points {
            user.mana_points = v;
        }
        if let Some(v) = self.is_admin {
            user.is_admin = v;
        }
        if let Some(v) = self.daily_streak {
            user.daily_streak = v;
        }
        if let Some(v) = self.last_daily_chest_claimed {
            user.last_daily_chest_claimed = Some(v);
        }
        if let Some(v) = self.points_history {
            user.points_history = v;
        }
        if let Some(v) = self.addresses {
            user.addresses = v;
        }
        if let Some(v) = self.notifications {
            user.notifications = v;
        }
        if let Some(v) = self.conversations {
            user.conversations = v;
        }
    }
}

/// Every state transition the store understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetUser(Option<User>),
    LoginSuccess(LoginPayload),
    LoadInitialData(InitialData),
    UpdateUser(UserPatch),
    PlaceOrder(Order),
    ClaimDailyChest { reward: DailyReward, today: NaiveDate },
    Logout,
    AddToCart(CartItem),
    RemoveFromCart { item_id: String },
    UpdateCartQuantity { item_id: String, quantity: u32 },
    ClearCart,
    SetLoginOpen(bool),
    SetView(View),
    UpdateSettings(AppSettings),
    SetProducts(Vec<Product>),
    SetPalmTypes(Vec<PalmType>),
    SetAllUsers(Vec<User>),
    MarkNotificationRead { notification_id: String },
}

impl Action {
    /// Stable name used for logs and metric labels.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetUser(_) => "SET_USER",
            Self::LoginSuccess(_) => "LOGIN_SUCCESS",
            Self::LoadInitialData(_) => "LOAD_INITIAL_DATA",
            Self::UpdateUser(_) => "UPDATE_USER",
            Self::PlaceOrder(_) => "PLACE_ORDER",
            Self::ClaimDailyChest { .. } => "CLAIM_DAILY_CHEST",
            Self::Logout => "LOGOUT",
            Self::AddToCart(_) => "ADD_TO_CART",
            Self::RemoveFromCart { .. } => "REMOVE_FROM_CART",
            Self::UpdateCartQuantity { .. } => "UPDATE_CART_QUANTITY",
            Self::ClearCart => "CLEAR_CART",
            Self::SetLoginOpen(_) => "SET_LOGIN_OPEN",
            Self::SetView(_) => "SET_VIEW",
            Self::UpdateSettings(_) => "UPDATE_SETTINGS",
            Self::SetProducts(_) => "SET_PRODUCTS",
            Self::SetPalmTypes(_) => "SET_PALM_TYPES",
            Self::SetAllUsers(_) => "SET_ALL_USERS",
            Self::MarkNotificationRead { .. } => "MARK_NOTIFICATION_READ",
        }
    }
}
