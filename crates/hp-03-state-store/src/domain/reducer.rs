//! # Reducer
//!
//! `reduce(state, action) -> state'` is pure and total. Every branch is a
//! plain function; `finalize` then re-establishes the cross-cutting rules:
//!
//! - `is_authenticated == user.is_some()`
//! - super users carry `is_admin = true`, and nothing clears it
//! - the `all_users` mirror of the current user equals `user`

use chrono::NaiveDate;
use tracing::debug;

use hp_02_order_transactions::{can_claim_daily_chest, process_daily_chest, process_order, DailyReward};
use shared_types::{AppSettings, CartItem, Order, PalmType, Product, User};

use super::actions::{Action, InitialData, LoginPayload, UserPatch};
use super::state::{AppState, View};

/// Apply one action.
pub fn reduce(state: AppState, action: Action) -> AppState {
    let next = match action {
        Action::SetUser(user) => set_user(state, user),
        Action::LoginSuccess(payload) => login_success(state, payload),
        Action::LoadInitialData(data) => load_initial_data(state, data),
        Action::UpdateUser(patch) => update_user(state, patch),
        Action::PlaceOrder(order) => place_order(state, order),
        Action::ClaimDailyChest { reward, today } => claim_daily_chest(state, &reward, today),
        Action::Logout => logout(state),
        Action::AddToCart(item) => add_to_cart(state, item),
        Action::RemoveFromCart { item_id } => remove_from_cart(state, &item_id),
        Action::UpdateCartQuantity { item_id, quantity } => {
            update_cart_quantity(state, &item_id, quantity)
        }
        Action::ClearCart => AppState {
            cart: Vec::new(),
            ..state
        },
        Action::SetLoginOpen(open) => {
            let mut state = state;
            state.ui.login_open = open;
            state
        }
        Action::SetView(view) => {
            let mut state = state;
            state.ui.view = view;
            state
        }
        Action::UpdateSettings(settings) => update_settings(state, settings),
        Action::SetProducts(products) => set_products(state, products),
        Action::SetPalmTypes(palm_types) => set_palm_types(state, palm_types),
        Action::SetAllUsers(users) => set_all_users(state, users),
        Action::MarkNotificationRead { notification_id } => {
            mark_notification_read(state, &notification_id)
        }
    };
    finalize(next)
}

/// Cross-cutting rules applied after every branch.
fn finalize(mut state: AppState) -> AppState {
    if let Some(user) = state.user.as_mut() {
        state.super_users.escalate(user);
        if let Some(mirror) = state.all_users.get_mut(&user.id) {
            if mirror != user {
                *mirror = user.clone();
            }
        }
    }
    state.is_authenticated = state.user.is_some();
    state
}

// =============================================================================
// SESSION BRANCHES
// =============================================================================

fn set_user(mut state: AppState, user: Option<User>) -> AppState {
    state.user = user;
    state
}

fn login_success(mut state: AppState, payload: LoginPayload) -> AppState {
    let switching = state.user_id() != Some(payload.user.id.as_str());
    state.user = Some(payload.user);
    match payload.orders {
        Some(orders) => state.orders = orders,
        None if switching => state.orders.clear(),
        None => {}
    }
    if !payload.keep_open {
        state.ui.login_open = false;
    }
    state
}

fn load_initial_data(mut state: AppState, data: InitialData) -> AppState {
    // A load never replaces a present session with nothing.
    if let Some(user) = data.user {
        state.user = Some(user);
    }
    if let Some(orders) = data.orders {
        state.orders = orders;
    }
    if let Some(settings) = data.settings {
        state.settings = settings;
    }
    if let Some(products) = data.products {
        state.products = products;
    }
    if let Some(palm_types) = data.palm_types {
        state.palm_types = palm_types;
    }
    if let Some(users) = data.all_users {
        state = set_all_users(state, users);
    }
    state
}

fn update_user(mut state: AppState, patch: UserPatch) -> AppState {
    if let Some(user) = state.user.as_mut() {
        patch.apply_to(user);
        user.provisional = false;
    }
    state
}

fn logout(mut state: AppState) -> AppState {
    state.user = None;
    state.orders.clear();
    state.cart.clear();
    state.ui.login_open = false;
    if matches!(state.ui.view, View::Profile | View::ProfileCompletion | View::Admin) {
        state.ui.view = View::Home;
    }
    state
}

// =============================================================================
// LEDGER BRANCHES
// =============================================================================

fn place_order(mut state: AppState, order: Order) -> AppState {
    let Some(user) = state.user.as_ref() else {
        debug!(order_id = %order.id, "Order ignored: no user");
        return state;
    };
    if state.orders.iter().any(|o| o.id == order.id) {
        debug!(order_id = %order.id, "Order ignored: already recorded");
        return state;
    }

    match process_order(user, &order, order.placed_on) {
        Ok(outcome) => {
            let mut user = outcome.updated_user;
            user.provisional = false;
            state.user = Some(user);
            state.orders.push(order);
            state
        }
        Err(e) => {
            debug!(order_id = %order.id, error = %e, "Order reward refused");
            state
        }
    }
}

fn claim_daily_chest(mut state: AppState, reward: &DailyReward, today: NaiveDate) -> AppState {
    let Some(user) = state.user.as_ref() else {
        return state;
    };
    if !can_claim_daily_chest(user, today) {
        return state;
    }

    match process_daily_chest(user, reward, today) {
        Ok(outcome) => {
            let mut user = outcome.updated_user;
            user.provisional = false;
            state.user = Some(user);
            state
        }
        Err(e) => {
            debug!(error = %e, "Daily chest refused");
            state
        }
    }
}

fn mark_notification_read(mut state: AppState, notification_id: &str) -> AppState {
    if let Some(user) = state.user.as_mut() {
        if let Some(n) = user
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id)
        {
            n.read = true;
        }
    }
    state
}

// =============================================================================
// CART BRANCHES
// =============================================================================

fn add_to_cart(mut state: AppState, item: CartItem) -> AppState {
    if item.quantity == 0 {
        return state;
    }
    match state.cart.iter_mut().find(|line| line.id == item.id) {
        Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
        None => state.cart.push(item),
    }
    state
}

fn remove_from_cart(mut state: AppState, item_id: &str) -> AppState {
    state.cart.retain(|line| line.id != item_id);
    state
}

fn update_cart_quantity(mut state: AppState, item_id: &str, quantity: u32) -> AppState {
    if quantity == 0 {
        return remove_from_cart(state, item_id);
    }
    if let Some(line) = state.cart.iter_mut().find(|line| line.id == item_id) {
        line.quantity = quantity;
    }
    state
}

// =============================================================================
// CATALOG BRANCHES
// =============================================================================

fn update_settings(mut state: AppState, settings: AppSettings) -> AppState {
    state.settings = settings;
    state
}

fn set_products(mut state: AppState, products: Vec<Product>) -> AppState {
    state.products = products;
    state
}

fn set_palm_types(mut state: AppState, palm_types: Vec<PalmType>) -> AppState {
    state.palm_types = palm_types;
    state
}

fn set_all_users(mut state: AppState, users: Vec<User>) -> AppState {
    state.all_users = users
        .into_iter()
        .map(|mut u| {
            state.super_users.escalate(&mut u);
            (u.id.clone(), u)
        })
        .collect();
    state
}
