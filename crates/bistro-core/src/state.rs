//! # Session State
//!
//! The single state value behind a menu session, plus the effects its
//! mutations ask the host to perform.
//!
//! ## Mutation Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   UI action ──► SessionState::mutation(&mut self, ..) ──► Effects       │
//! │                        │                                    │           │
//! │                        ▼                                    ▼           │
//! │                 new in-memory state          host performs, in order:   │
//! │                 (derived views are           • Persist(Snapshot)        │
//! │                  recomputed on read)         • Notify(Notice)           │
//! │                                              • Track(AnalyticsEvent)    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in here performs I/O. A failing effect never rolls the state
//! back: the in-memory mutation always stands.
//!
//! ## Loading Lifecycle
//! ```text
//!   begin_init ─► finish_init(restaurant, items)      loading: true ─► false
//!             └─► fail_init()  error = "Failed to load restaurant data"
//!
//!   begin_refresh ─► None (no restaurant): nothing happens
//!                 └► Some(id) ─► finish_refresh(items)
//!                             └► fail_refresh()  error + error notice,
//!                                                prior items kept
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ar::{self, ArModel, ArSession, ArSessionDraft, ArSessionLog};
use crate::cart::{Cart, CartItem, CartTotals, QuantityUpdate};
use crate::catalog::{self, DietaryFilter, MenuFilter};
use crate::error::{CoreError, CoreResult};
use crate::keys;
use crate::money::Money;
use crate::preferences::{Favorites, RecentlyViewed};
use crate::types::{CustomizationChoice, MenuItem, NutritionalInfo, Restaurant};

pub const INIT_FAILED: &str = "Failed to load restaurant data";
pub const FETCH_FAILED: &str = "Failed to load menu items";
pub const REFRESH_FAILED_NOTICE: &str = "Failed to refresh menu";

// =============================================================================
// Effects
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient user-facing message (a toast).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// A copy of one persisted slice, taken right after the mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    Theme(String),
    Favorites(Vec<String>),
    RecentlyViewed(Vec<String>),
    Cart(Vec<CartItem>),
    ArSessions(Vec<ArSession>),
}

impl Snapshot {
    /// Storage key the slice lives under.
    pub const fn key(&self) -> &'static str {
        match self {
            Snapshot::Theme(_) => keys::THEME,
            Snapshot::Favorites(_) => keys::FAVORITES,
            Snapshot::RecentlyViewed(_) => keys::RECENTLY_VIEWED,
            Snapshot::Cart(_) => keys::CART,
            Snapshot::ArSessions(_) => keys::AR_SESSIONS,
        }
    }

    /// Serializes the slice to the JSON stored under [`Snapshot::key`].
    pub fn to_json(&self) -> serde_json::Result<String> {
        match self {
            Snapshot::Theme(theme) => serde_json::to_string(theme),
            Snapshot::Favorites(ids) | Snapshot::RecentlyViewed(ids) => serde_json::to_string(ids),
            Snapshot::Cart(lines) => serde_json::to_string(lines),
            Snapshot::ArSessions(sessions) => serde_json::to_string(sessions),
        }
    }
}

/// Usage events reported to the analytics log.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsEvent {
    ItemView {
        item_id: String,
        name: String,
        category: String,
        price: Money,
    },
    AddToCart {
        item_id: String,
        name: String,
        price: Money,
        cart_total: Money,
    },
    ArSession(ArSession),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Persist(Snapshot),
    Notify(Notice),
    Track(AnalyticsEvent),
}

/// Ordered effects of one mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effects(Vec<Effect>);

impl Effects {
    pub fn none() -> Self {
        Effects::default()
    }

    pub fn push(&mut self, effect: Effect) {
        self.0.push(effect);
    }

    fn persist(mut self, snapshot: Snapshot) -> Self {
        self.0.push(Effect::Persist(snapshot));
        self
    }

    fn notify(mut self, notice: Notice) -> Self {
        self.0.push(Effect::Notify(notice));
        self
    }

    fn track(mut self, event: AnalyticsEvent) -> Self {
        self.0.push(Effect::Track(event));
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Effect> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Notices in emission order.
    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.0.iter().filter_map(|e| match e {
            Effect::Notify(n) => Some(n),
            _ => None,
        })
    }

    /// Storage keys written, in emission order.
    pub fn persisted_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().filter_map(|e| match e {
            Effect::Persist(s) => Some(s.key()),
            _ => None,
        })
    }
}

impl IntoIterator for Effects {
    type Item = Effect;
    type IntoIter = std::vec::IntoIter<Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// =============================================================================
// Rehydration
// =============================================================================

/// Slices read back from storage at startup. Absent slices stay empty.
#[derive(Debug, Clone, Default)]
pub struct Restored {
    pub theme: Option<String>,
    pub favorites: Vec<String>,
    pub recently_viewed: Vec<String>,
    pub cart: Vec<CartItem>,
    pub ar_sessions: Vec<ArSession>,
}

// =============================================================================
// Session State
// =============================================================================

/// Everything one menu session knows.
#[derive(Debug, Clone)]
pub struct SessionState {
    restaurant: Option<Restaurant>,
    menu_items: Vec<MenuItem>,
    loading: bool,
    error: Option<String>,
    theme: String,
    filter: MenuFilter,
    cart: Cart,
    favorites: Favorites,
    recently_viewed: RecentlyViewed,
    ar_sessions: ArSessionLog,
}

impl SessionState {
    pub fn new(default_theme: impl Into<String>) -> Self {
        SessionState {
            restaurant: None,
            menu_items: Vec::new(),
            loading: false,
            error: None,
            theme: default_theme.into(),
            filter: MenuFilter::default(),
            cart: Cart::new(),
            favorites: Favorites::new(),
            recently_viewed: RecentlyViewed::new(),
            ar_sessions: ArSessionLog::default(),
        }
    }

    /// Installs persisted slices. Produces no effects.
    pub fn restore(&mut self, restored: Restored) {
        if let Some(theme) = restored.theme {
            self.theme = theme;
        }
        self.favorites = Favorites::from_ids(restored.favorites);
        self.recently_viewed = RecentlyViewed::from_ids(restored.recently_viewed);
        self.cart = Cart::from_lines(restored.cart);
        self.ar_sessions = ArSessionLog::from_sessions(restored.ar_sessions);
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    pub fn begin_init(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish_init(&mut self, restaurant: Restaurant, items: Vec<MenuItem>) {
        self.restaurant = Some(restaurant);
        self.menu_items = items;
        self.loading = false;
    }

    pub fn fail_init(&mut self) {
        self.error = Some(INIT_FAILED.to_string());
        self.loading = false;
    }

    /// Starts a refresh of the loaded establishment's menu.
    ///
    /// ## Returns
    /// The establishment id to fetch, or `None` (state untouched) when no
    /// establishment is loaded yet.
    pub fn begin_refresh(&mut self) -> Option<String> {
        let id = self.restaurant.as_ref()?.id.clone();
        self.loading = true;
        self.error = None;
        Some(id)
    }

    pub fn finish_refresh(&mut self, items: Vec<MenuItem>) {
        self.menu_items = items;
        self.loading = false;
    }

    /// Records a failed refresh. The previous menu stays in place.
    pub fn fail_refresh(&mut self) -> Effects {
        self.error = Some(FETCH_FAILED.to_string());
        self.loading = false;
        Effects::none().notify(Notice::error(REFRESH_FAILED_NOTICE))
    }

    // -------------------------------------------------------------------------
    // Plain reads
    // -------------------------------------------------------------------------

    pub fn restaurant(&self) -> Option<&Restaurant> {
        self.restaurant.as_ref()
    }

    pub fn menu_items(&self) -> &[MenuItem] {
        &self.menu_items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn filter(&self) -> &MenuFilter {
        &self.filter
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn recently_viewed(&self) -> &RecentlyViewed {
        &self.recently_viewed
    }

    pub fn ar_sessions(&self) -> &ArSessionLog {
        &self.ar_sessions
    }

    // -------------------------------------------------------------------------
    // Derived views (recomputed on every call)
    // -------------------------------------------------------------------------

    pub fn filtered_items(&self) -> Vec<&MenuItem> {
        catalog::filter_items(&self.menu_items, &self.filter)
    }

    pub fn categories(&self) -> Vec<String> {
        catalog::categories(&self.menu_items)
    }

    pub fn items_by_category(&self, category: &str) -> Vec<&MenuItem> {
        catalog::items_by_category(&self.menu_items, category)
    }

    pub fn featured_items(&self) -> Vec<&MenuItem> {
        catalog::featured_items(&self.menu_items)
    }

    pub fn popular_items(&self) -> Vec<&MenuItem> {
        catalog::popular_items(&self.menu_items)
    }

    pub fn recommendations(&self, item_id: Option<&str>) -> Vec<&MenuItem> {
        catalog::recommendations(&self.menu_items, item_id)
    }

    pub fn item_by_id(&self, item_id: &str) -> Option<&MenuItem> {
        catalog::find_item(&self.menu_items, item_id)
    }

    pub fn nutritional_info(&self, item_id: &str) -> Option<NutritionalInfo> {
        catalog::nutritional_info(&self.menu_items, item_id)
    }

    pub fn is_available(&self, item_id: &str) -> bool {
        catalog::is_available(&self.menu_items, item_id)
    }

    pub fn cart_total(&self) -> Money {
        self.cart.total()
    }

    pub fn cart_item_count(&self) -> i64 {
        self.cart.item_count()
    }

    pub fn cart_totals(&self) -> CartTotals {
        CartTotals::from(&self.cart)
    }

    pub fn is_favorite(&self, item_id: &str) -> bool {
        self.favorites.contains(item_id)
    }

    pub fn ar_model(&self, item_id: &str, now: DateTime<Utc>) -> Option<ArModel> {
        self.item_by_id(item_id).and_then(|i| ar::model_for(i, now))
    }

    pub fn is_ar_available(&self, item_id: &str) -> bool {
        self.item_by_id(item_id).is_some_and(ar::supports_ar)
    }

    // -------------------------------------------------------------------------
    // Filter inputs (not persisted)
    // -------------------------------------------------------------------------

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    /// `"all"` clears the category filter.
    pub fn set_active_category(&mut self, category: impl Into<String>) {
        let category = category.into();
        self.filter.category = (category != catalog::ALL_CATEGORIES).then_some(category);
    }

    pub fn set_dietary_filter(&mut self, dietary: DietaryFilter) {
        self.filter.dietary = dietary;
    }

    // -------------------------------------------------------------------------
    // Theme
    // -------------------------------------------------------------------------

    pub fn set_theme(&mut self, theme: impl Into<String>) -> Effects {
        self.theme = theme.into();
        Effects::none().persist(Snapshot::Theme(self.theme.clone()))
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    /// Adds one unit of `item` and announces it.
    ///
    /// Fails without effects when the resulting amounts would overflow.
    pub fn add_to_cart(
        &mut self,
        item: &MenuItem,
        customizations: Vec<CustomizationChoice>,
        special_instructions: Option<String>,
    ) -> CoreResult<Effects> {
        self.cart.add(item, customizations, special_instructions)?;

        Ok(Effects::none()
            .persist(self.cart_snapshot())
            .track(AnalyticsEvent::AddToCart {
                item_id: item.id.clone(),
                name: item.name.clone(),
                price: item.price,
                cart_total: self.cart.total(),
            })
            .notify(Notice::success(format!("{} added to cart!", item.name))))
    }

    pub fn remove_from_cart(&mut self, line_id: &str) -> CoreResult<Effects> {
        self.cart.remove(line_id)?;
        Ok(self.removed_line_effects())
    }

    /// Sets a line quantity; zero or less removes the line.
    pub fn update_cart_item_quantity(&mut self, line_id: &str, quantity: i64) -> CoreResult<Effects> {
        match self.cart.set_quantity(line_id, quantity)? {
            QuantityUpdate::Removed => Ok(self.removed_line_effects()),
            QuantityUpdate::Updated => Ok(Effects::none().persist(self.cart_snapshot())),
        }
    }

    pub fn clear_cart(&mut self) -> Effects {
        self.cart.clear();
        Effects::none()
            .persist(self.cart_snapshot())
            .notify(Notice::success("Cart cleared"))
    }

    fn removed_line_effects(&self) -> Effects {
        Effects::none()
            .persist(self.cart_snapshot())
            .notify(Notice::success("Item removed from cart"))
    }

    fn cart_snapshot(&self) -> Snapshot {
        Snapshot::Cart(self.cart.lines().to_vec())
    }

    // -------------------------------------------------------------------------
    // Favorites & recently viewed
    // -------------------------------------------------------------------------

    pub fn toggle_favorite(&mut self, item_id: &str) -> Effects {
        let added = self.favorites.toggle(item_id);
        let message = if added {
            "Item added to favorites!"
        } else {
            "Item removed from favorites!"
        };

        Effects::none()
            .persist(Snapshot::Favorites(self.favorites.ids().to_vec()))
            .notify(Notice::success(message))
    }

    pub fn add_to_recently_viewed(&mut self, item_id: &str) -> Effects {
        self.recently_viewed.push(item_id);
        Effects::none().persist(Snapshot::RecentlyViewed(self.recently_viewed.ids().to_vec()))
    }

    /// Records a detail-page view of a menu item.
    ///
    /// Unknown ids are rejected and leave the recently-viewed list alone.
    pub fn track_item_view(&mut self, item_id: &str) -> CoreResult<Effects> {
        let item = self
            .item_by_id(item_id)
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;
        let event = AnalyticsEvent::ItemView {
            item_id: item.id.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            price: item.price,
        };

        let mut effects = Effects::none().track(event);
        for effect in self.add_to_recently_viewed(item_id) {
            effects.push(effect);
        }
        Ok(effects)
    }

    // -------------------------------------------------------------------------
    // AR sessions
    // -------------------------------------------------------------------------

    /// Completes `draft`, appends it to the bounded log and reports it.
    pub fn track_ar_usage(&mut self, draft: ArSessionDraft, now: DateTime<Utc>) -> Effects {
        let session = ArSession::complete(draft, now);
        self.ar_sessions.push(session.clone());

        Effects::none()
            .track(AnalyticsEvent::ArSession(session))
            .persist(Snapshot::ArSessions(self.ar_sessions.sessions().to_vec()))
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::new(crate::DEFAULT_THEME)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use crate::AR_SESSION_LOG_LIMIT;

    fn loaded() -> SessionState {
        let mut state = SessionState::default();
        state.begin_init();
        state.finish_init(sample::restaurant(), sample::menu_items());
        state
    }

    fn first_item(state: &SessionState) -> MenuItem {
        state.menu_items()[0].clone()
    }

    fn messages(effects: &Effects) -> Vec<String> {
        effects.notices().map(|n| n.message.clone()).collect()
    }

    #[test]
    fn test_init_lifecycle() {
        let mut state = SessionState::default();
        state.begin_init();
        assert!(state.is_loading());

        state.finish_init(sample::restaurant(), sample::menu_items());
        assert!(!state.is_loading());
        assert!(state.error().is_none());
        assert_eq!(state.menu_items().len(), 6);
    }

    #[test]
    fn test_init_failure_keeps_empty_data() {
        let mut state = SessionState::default();
        state.begin_init();
        state.fail_init();

        assert!(!state.is_loading());
        assert_eq!(state.error(), Some(INIT_FAILED));
        assert!(state.restaurant().is_none());
        assert!(state.menu_items().is_empty());
    }

    #[test]
    fn test_refresh_without_restaurant_is_noop() {
        let mut state = SessionState::default();
        assert!(state.begin_refresh().is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_refresh_failure_keeps_prior_items() {
        let mut state = loaded();
        assert_eq!(state.begin_refresh().as_deref(), Some("default-restaurant"));
        assert!(state.is_loading());

        let effects = state.fail_refresh();

        assert!(!state.is_loading());
        assert_eq!(state.error(), Some(FETCH_FAILED));
        assert_eq!(state.menu_items().len(), 6);
        let notices: Vec<&Notice> = effects.notices().collect();
        assert_eq!(notices, vec![&Notice::error(REFRESH_FAILED_NOTICE)]);
    }

    #[test]
    fn test_refresh_success_replaces_items_and_clears_error() {
        let mut state = loaded();
        state.begin_refresh();
        state.fail_refresh();

        state.begin_refresh();
        assert!(state.error().is_none());
        state.finish_refresh(sample::menu_items().into_iter().take(2).collect());
        assert_eq!(state.menu_items().len(), 2);
    }

    #[test]
    fn test_add_to_cart_effects() {
        let mut state = loaded();
        let item = first_item(&state);

        let effects = state.add_to_cart(&item, vec![], None).unwrap();

        assert_eq!(effects.persisted_keys().collect::<Vec<_>>(), vec![keys::CART]);
        assert_eq!(messages(&effects), vec![format!("{} added to cart!", item.name)]);
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::Track(AnalyticsEvent::AddToCart { cart_total, .. }) if *cart_total == item.price
        )));
        assert_eq!(state.cart_item_count(), 1);
    }

    #[test]
    fn test_cart_snapshot_matches_state() {
        let mut state = loaded();
        let item = first_item(&state);
        let effects = state.add_to_cart(&item, vec![], None).unwrap();

        let snapshot = effects.iter().find_map(|e| match e {
            Effect::Persist(Snapshot::Cart(lines)) => Some(lines.clone()),
            _ => None,
        });
        assert_eq!(snapshot.as_deref(), Some(state.cart().lines()));
    }

    #[test]
    fn test_quantity_zero_announces_removal() {
        let mut state = loaded();
        let item = first_item(&state);
        state.add_to_cart(&item, vec![], None).unwrap();
        let line_id = state.cart().lines()[0].id.clone();

        let effects = state.update_cart_item_quantity(&line_id, 0).unwrap();

        assert!(state.cart().is_empty());
        assert_eq!(messages(&effects), vec!["Item removed from cart"]);
    }

    #[test]
    fn test_quantity_update_is_silent() {
        let mut state = loaded();
        let item = first_item(&state);
        state.add_to_cart(&item, vec![], None).unwrap();
        let line_id = state.cart().lines()[0].id.clone();

        let effects = state.update_cart_item_quantity(&line_id, 3).unwrap();

        assert_eq!(messages(&effects), Vec::<String>::new());
        assert_eq!(state.cart_total(), item.price * 3);
    }

    #[test]
    fn test_oversized_quantity_leaves_cart_untouched() {
        let mut state = loaded();
        let item = first_item(&state);
        state.add_to_cart(&item, vec![], None).unwrap();
        let line_id = state.cart().lines()[0].id.clone();

        let result = state.update_cart_item_quantity(&line_id, i64::MAX);

        assert!(matches!(result, Err(CoreError::Validation(_))));
        assert_eq!(state.cart_item_count(), 1);
        assert_eq!(state.cart_total(), item.price);
    }

    #[test]
    fn test_unknown_line_produces_no_effects() {
        let mut state = loaded();
        assert!(matches!(
            state.remove_from_cart("cart-nope"),
            Err(CoreError::LineNotFound(_))
        ));
        assert!(state.update_cart_item_quantity("cart-nope", 2).is_err());
    }

    #[test]
    fn test_clear_cart() {
        let mut state = loaded();
        let item = first_item(&state);
        state.add_to_cart(&item, vec![], None).unwrap();

        let effects = state.clear_cart();
        assert_eq!(messages(&effects), vec!["Cart cleared"]);
        assert_eq!(state.cart_total(), Money::zero());
    }

    #[test]
    fn test_toggle_favorite_messages() {
        let mut state = loaded();

        let on = state.toggle_favorite("3");
        assert!(state.is_favorite("3"));
        assert_eq!(messages(&on), vec!["Item added to favorites!"]);

        let off = state.toggle_favorite("3");
        assert!(!state.is_favorite("3"));
        assert_eq!(messages(&off), vec!["Item removed from favorites!"]);
        assert_eq!(off.persisted_keys().collect::<Vec<_>>(), vec![keys::FAVORITES]);
    }

    #[test]
    fn test_track_item_view_updates_recent() {
        let mut state = loaded();
        let effects = state.track_item_view("2").unwrap();

        assert_eq!(state.recently_viewed().ids(), ["2"]);
        assert_eq!(
            effects.persisted_keys().collect::<Vec<_>>(),
            vec![keys::RECENTLY_VIEWED]
        );
        assert!(matches!(state.track_item_view("missing"), Err(CoreError::ItemNotFound(_))));
        assert_eq!(state.recently_viewed().len(), 1);
    }

    #[test]
    fn test_filter_inputs_drive_filtered_items() {
        let mut state = loaded();
        state.set_active_category("Main Course");
        state.set_dietary_filter(DietaryFilter::Veg);
        let names: Vec<&str> = state.filtered_items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Truffle Pasta"]);

        state.set_active_category("all");
        state.set_dietary_filter(DietaryFilter::All);
        state.set_search_query("PIZZA");
        let names: Vec<&str> = state.filtered_items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Margherita Pizza"]);
    }

    #[test]
    fn test_theme_persists() {
        let mut state = loaded();
        assert_eq!(state.theme(), crate::DEFAULT_THEME);

        let effects = state.set_theme("dark");
        assert_eq!(state.theme(), "dark");
        let stored = effects.iter().find_map(|e| match e {
            Effect::Persist(s) => s.to_json().ok(),
            _ => None,
        });
        assert_eq!(stored.as_deref(), Some("\"dark\""));
    }

    #[test]
    fn test_ar_usage_is_logged_and_bounded() {
        let mut state = loaded();
        let now = Utc::now();
        for _ in 0..(AR_SESSION_LOG_LIMIT + 1) {
            state.track_ar_usage(ArSessionDraft::for_item("1"), now);
        }
        let effects = state.track_ar_usage(ArSessionDraft::default(), now);

        assert_eq!(state.ar_sessions().len(), AR_SESSION_LOG_LIMIT);
        assert_eq!(
            effects.persisted_keys().collect::<Vec<_>>(),
            vec![keys::AR_SESSIONS]
        );
    }

    #[test]
    fn test_ar_model_lookup() {
        let state = loaded();
        let model = state.ar_model("1", Utc::now()).unwrap();
        assert_eq!(model.id, "ar-1");
        assert!(state.is_ar_available("1"));
        assert!(state.ar_model("missing", Utc::now()).is_none());
        assert!(!state.is_ar_available("missing"));
    }

    #[test]
    fn test_restore_sanitizes_slices() {
        let mut state = SessionState::default();
        let recent: Vec<String> = (0..12).map(|n| n.to_string()).collect();
        state.restore(Restored {
            theme: Some("classic".to_string()),
            favorites: vec!["1".to_string(), "1".to_string()],
            recently_viewed: recent,
            ..Restored::default()
        });

        assert_eq!(state.theme(), "classic");
        assert_eq!(state.favorites().ids(), ["1"]);
        assert_eq!(state.recently_viewed().len(), crate::RECENTLY_VIEWED_LIMIT);
    }
}
