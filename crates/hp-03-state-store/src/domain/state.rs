//! Application state shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared_types::{AppSettings, CartItem, Order, PalmType, Product, SuperUserPolicy, User, UserId};

/// Top-level views the UI can be deep-linked to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Home,
    Shop,
    Heritage,
    Community,
    Learning,
    Profile,
    /// Shown after an OAuth-style redirect so new users finish their profile.
    ProfileCompletion,
    Admin,
}

/// Transient UI flags owned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiFlags {
    pub login_open: bool,
    pub view: View,
}

/// The single mutable application state.
///
/// `is_authenticated` is derived: it equals `user.is_some()` after every
/// transition the reducer produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    /// Directory of known users (admin views). Holds a mirror of `user`.
    pub all_users: BTreeMap<UserId, User>,
    pub cart: Vec<CartItem>,
    pub orders: Vec<Order>,
    pub ui: UiFlags,
    pub settings: AppSettings,
    pub products: Vec<Product>,
    pub palm_types: Vec<PalmType>,
    pub super_users: SuperUserPolicy,
}

impl AppState {
    /// Logged-out state with the given allow-list.
    pub fn new(super_users: SuperUserPolicy) -> Self {
        Self {
            user: None,
            is_authenticated: false,
            all_users: BTreeMap::new(),
            cart: Vec::new(),
            orders: Vec::new(),
            ui: UiFlags::default(),
            settings: AppSettings::default(),
            products: Vec::new(),
            palm_types: Vec::new(),
            super_users,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    pub fn cart_total(&self) -> u64 {
        self.cart
            .iter()
            .fold(0u64, |acc, item| acc.saturating_add(item.line_total()))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SuperUserPolicy::default())
    }
}
