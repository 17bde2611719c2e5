//! # Commerce and Store Invariant Scenarios
//!
//! Orders and daily chests dispatched through a store with write-through
//! caching.

#[cfg(test)]
mod tests {
    use hp_02_order_transactions::DailyReward;
    use hp_03_state_store::{Action, InitialData, LoginPayload, StateStoreApi, UserPatch};
    use shared_types::{CartItem, ItemKind, Order, User};

    use crate::integration::fixtures::{current, day, sara, store_with_cache};

    fn palm_line(quantity: u32) -> CartItem {
        CartItem {
            id: "line-medjool".into(),
            product_id: "medjool".into(),
            name: "Medjool palm".into(),
            unit_price: 120,
            quantity,
            reward_points: 50,
            bonus_points: None,
            kind: ItemKind::HeritagePalm {
                palm_type_id: "medjool".into(),
                intention: Some("For my grandmother".into()),
                name_on_deed: Some("Amina".into()),
            },
        }
    }

    #[test]
    fn test_order_rewards_once_and_persists() {
        let (store, cache) = store_with_cache();
        store.dispatch(Action::LoginSuccess(LoginPayload::new(sara())));
        store.dispatch(Action::AddToCart(palm_line(2)));

        let cart = store.snapshot().cart;
        let order = Order::from_cart("o1", "u1", &cart, day(5));
        assert_eq!(order.deeds.len(), 2);

        assert!(store.dispatch(Action::PlaceOrder(order.clone())));
        assert!(!store.dispatch(Action::PlaceOrder(order)));

        let user = current(&store);
        assert_eq!(user.points, 350);
        assert_eq!(user.points_history.len(), 1);
        assert_eq!(user.notifications.len(), 2);
        assert_eq!(store.snapshot().orders.len(), 1);
        assert_eq!(cache.load_user("u1").unwrap().points, 350);
    }

    #[test]
    fn test_foreign_order_changes_nothing() {
        let (store, _cache) = store_with_cache();
        store.dispatch(Action::LoginSuccess(LoginPayload::new(sara())));
        let before = store.snapshot();

        let order = Order::from_cart("o9", "u2", &[palm_line(1)], day(5));
        assert!(!store.dispatch(Action::PlaceOrder(order)));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_daily_chest_streak() {
        let (store, _cache) = store_with_cache();
        store.dispatch(Action::LoginSuccess(LoginPayload::new(sara())));
        let chest = |today| Action::ClaimDailyChest {
            reward: DailyReward::barkat(10),
            today,
        };

        assert!(store.dispatch(chest(day(1))));
        assert_eq!(current(&store).daily_streak, 1);

        // Second claim on the same day is refused without touching history.
        let history = current(&store).points_history.len();
        assert!(!store.dispatch(chest(day(1))));
        assert_eq!(current(&store).points_history.len(), history);

        store.dispatch(chest(day(2)));
        assert_eq!(current(&store).daily_streak, 2);

        store.dispatch(chest(day(4)));
        let user = current(&store);
        assert_eq!(user.daily_streak, 1);
        assert_eq!(user.points, 280);
        assert_eq!(user.last_daily_chest_claimed, Some(day(4)));
    }

    #[test]
    fn test_admin_is_never_revoked() {
        let (store, _cache) = store_with_cache();
        let mut admin = User::new("a1").named("Portal Admin");
        admin.email = Some("admin@barkat.app".into());
        store.dispatch(Action::LoginSuccess(LoginPayload::new(admin)));
        assert!(current(&store).is_admin);

        store.dispatch(Action::UpdateUser(UserPatch {
            is_admin: Some(false),
            ..UserPatch::default()
        }));
        assert!(current(&store).is_admin);
    }

    #[test]
    fn test_mirror_follows_current_user() {
        let (store, _cache) = store_with_cache();
        store.dispatch(Action::SetAllUsers(vec![sara(), User::new("u2").named("Omar B.")]));
        store.dispatch(Action::LoginSuccess(LoginPayload::new(sara())));

        store.dispatch(Action::UpdateUser(UserPatch::full_name("Sara Amini")));

        let state = store.snapshot();
        assert_eq!(state.all_users.get("u1"), state.user.as_ref());
        assert_eq!(state.all_users["u2"].full_name, "Omar B.");
    }

    #[test]
    fn test_null_load_keeps_session() {
        let (store, _cache) = store_with_cache();
        store.dispatch(Action::LoginSuccess(LoginPayload::new(sara())));

        store.dispatch(Action::LoadInitialData(InitialData::default()));

        let state = store.snapshot();
        assert!(state.is_authenticated);
        assert_eq!(state.user_id(), Some("u1"));
    }

    #[test]
    fn test_logout_clears_commerce_state() {
        let (store, cache) = store_with_cache();
        store.dispatch(Action::LoginSuccess(LoginPayload::new(sara())));
        store.dispatch(Action::AddToCart(palm_line(1)));

        store.dispatch(Action::Logout);

        let state = store.snapshot();
        assert!(!state.is_authenticated);
        assert!(state.cart.is_empty());
        assert!(state.orders.is_empty());
        assert!(cache.load_user("u1").is_some());
    }
}
