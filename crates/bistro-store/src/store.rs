//! # Restaurant Store
//!
//! The session container UI layers talk to. Owns one [`SessionState`] and
//! performs the effects its mutations return.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  init() ─────► rehydrate slices from KeyValueStore                      │
//! │           └──► MenuSource::load_restaurant + fetch_available_items      │
//! │                                                                         │
//! │  mutation ──► lock ──► SessionState::mutation ──► Effects               │
//! │                              │                       │                  │
//! │                              │       ┌───────────────┼──────────────┐   │
//! │                              │       ▼               ▼              ▼   │
//! │                              │   Persist          Notify         Track  │
//! │                              │   storage.set   broadcast +     analytics│
//! │                              │   (logged on    log line        log line │
//! │                              │    failure)                              │
//! │                              ▼                                          │
//! │                          unlock                                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locking
//! The state mutex is held for the synchronous mutation and its effects, so
//! storage never sees two snapshots of a slice out of order. It is never
//! held across an `.await`: menu fetches run unlocked.

use bistro_core::ar::{ArModel, ArSession, ArSessionDraft};
use bistro_core::cart::{CartItem, CartTotals};
use bistro_core::catalog::{DietaryFilter, MenuFilter};
use bistro_core::state::{AnalyticsEvent, Restored};
use bistro_core::{
    keys, CoreResult, CustomizationChoice, Effect, Effects, MenuItem, Money, Notice, NoticeLevel,
    NutritionalInfo, Restaurant, SessionState, Snapshot, DEFAULT_RESTAURANT_ID,
};
use bistro_db::{Database, DbConfig};
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::config::{MenuSourceKind, StoreConfig};
use crate::error::{StoreError, StoreResult};
use crate::source::{DatabaseMenuSource, MenuSource, SampleMenuSource};
use crate::storage::{load_optional, load_or_default, JsonFileStorage, KeyValueStore};

/// Buffered notices per subscriber before the oldest are dropped.
pub const NOTICE_CHANNEL_CAPACITY: usize = 64;

/// Log target of the analytics stubs.
pub const ANALYTICS_TARGET: &str = "bistro::analytics";

// =============================================================================
// Restaurant Store
// =============================================================================

/// One menu session.
///
/// Cloning is cheap: clones share the state, the source, the storage and
/// the notice channel.
#[derive(Clone)]
pub struct RestaurantStore {
    state: Arc<Mutex<SessionState>>,
    source: Arc<dyn MenuSource>,
    storage: Arc<dyn KeyValueStore>,
    notices: broadcast::Sender<Notice>,
    restaurant_id: String,
}

impl RestaurantStore {
    /// Creates a store for the default establishment with the default theme.
    pub fn new(
        source: impl MenuSource + 'static,
        storage: impl KeyValueStore + 'static,
    ) -> Self {
        let (notices, _) = broadcast::channel(NOTICE_CHANNEL_CAPACITY);
        RestaurantStore {
            state: Arc::new(Mutex::new(SessionState::default())),
            source: Arc::new(source),
            storage: Arc::new(storage),
            notices,
            restaurant_id: DEFAULT_RESTAURANT_ID.to_string(),
        }
    }

    /// Sets the establishment `init()` loads.
    pub fn with_restaurant_id(mut self, restaurant_id: impl Into<String>) -> Self {
        self.restaurant_id = restaurant_id.into();
        self
    }

    /// Sets the theme used when none is stored. Call before `init()`.
    pub fn with_default_theme(self, theme: impl Into<String>) -> Self {
        *self.lock() = SessionState::new(theme);
        self
    }

    /// Builds a store from configuration.
    ///
    /// ## Errors
    /// - `Db` when the sqlite source cannot be opened
    /// - `Storage` when the storage document cannot be read
    pub async fn from_config(config: &StoreConfig) -> StoreResult<Self> {
        let storage_path = config.storage_path();
        let storage = JsonFileStorage::open_or_reset(&storage_path)?;
        debug!(path = %storage_path.display(), "Session storage opened");

        let store = match config.source.kind {
            MenuSourceKind::Sample => RestaurantStore::new(SampleMenuSource::new(), storage),
            MenuSourceKind::Sqlite => {
                let db_path = config.source.db_path.clone().ok_or_else(|| {
                    StoreError::Config("sqlite source requires source.db_path".into())
                })?;
                let db = Database::new(DbConfig::new(db_path)).await?;
                RestaurantStore::new(DatabaseMenuSource::new(db), storage)
            }
        };

        info!(
            restaurant_id = %config.restaurant_id(),
            source = %config.source.kind,
            "Restaurant store configured"
        );

        Ok(store
            .with_restaurant_id(config.restaurant_id())
            .with_default_theme(config.default_theme()))
    }

    /// Receives every notice emitted after the call.
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    pub fn restaurant_id(&self) -> &str {
        &self.restaurant_id
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs a read against the current state.
    pub fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&self.lock())
    }

    /// A copy of the whole state.
    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    fn mutate(&self, f: impl FnOnce(&mut SessionState) -> Effects) {
        let mut state = self.lock();
        let effects = f(&mut state);
        self.perform(effects);
    }

    fn try_mutate(&self, f: impl FnOnce(&mut SessionState) -> CoreResult<Effects>) -> StoreResult<()> {
        let mut state = self.lock();
        let effects = f(&mut state)?;
        self.perform(effects);
        Ok(())
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Rehydrates persisted slices and loads the configured establishment.
    ///
    /// Failures are recorded in [`RestaurantStore::error`]; the session
    /// keeps running with an empty menu.
    pub async fn init(&self) {
        let restored = self.rehydrate();
        {
            let mut state = self.lock();
            state.restore(restored);
            state.begin_init();
        }

        match self.load(&self.restaurant_id).await {
            Ok((restaurant, items)) => {
                info!(
                    restaurant_id = %restaurant.id,
                    items = items.len(),
                    "Restaurant loaded"
                );
                self.lock().finish_init(restaurant, items);
            }
            Err(e) => {
                error!(restaurant_id = %self.restaurant_id, error = %e, "Failed to load restaurant");
                self.lock().fail_init();
            }
        }
    }

    async fn load(&self, restaurant_id: &str) -> StoreResult<(Restaurant, Vec<MenuItem>)> {
        let restaurant = self.source.load_restaurant(restaurant_id).await?;
        let items = self.source.fetch_available_items(&restaurant.id).await?;
        Ok((restaurant, items))
    }

    /// Re-fetches the menu of the loaded establishment.
    ///
    /// Does nothing before a successful `init()`. On failure the previous
    /// menu stays and an error notice is emitted.
    pub async fn refresh(&self) {
        let Some(restaurant_id) = self.lock().begin_refresh() else {
            debug!("No restaurant loaded, skipping refresh");
            return;
        };

        match self.source.fetch_available_items(&restaurant_id).await {
            Ok(items) => {
                debug!(restaurant_id = %restaurant_id, items = items.len(), "Menu refreshed");
                self.lock().finish_refresh(items);
            }
            Err(e) => {
                error!(restaurant_id = %restaurant_id, error = %e, "Failed to refresh menu");
                self.mutate(|state| state.fail_refresh());
            }
        }
    }

    fn rehydrate(&self) -> Restored {
        let storage = self.storage.as_ref();
        let restored = Restored {
            theme: load_optional(storage, keys::THEME),
            favorites: load_or_default(storage, keys::FAVORITES),
            recently_viewed: load_or_default(storage, keys::RECENTLY_VIEWED),
            cart: load_or_default(storage, keys::CART),
            ar_sessions: load_or_default(storage, keys::AR_SESSIONS),
        };

        debug!(
            favorites = restored.favorites.len(),
            recently_viewed = restored.recently_viewed.len(),
            cart_lines = restored.cart.len(),
            ar_sessions = restored.ar_sessions.len(),
            "Session slices rehydrated"
        );
        restored
    }

    // =========================================================================
    // Effects
    // =========================================================================

    fn perform(&self, effects: Effects) {
        for effect in effects {
            match effect {
                Effect::Persist(snapshot) => self.persist(&snapshot),
                Effect::Notify(notice) => self.notify(notice),
                Effect::Track(event) => track(&event),
            }
        }
    }

    /// Writes one slice. Failures are logged; the in-memory change stands.
    fn persist(&self, snapshot: &Snapshot) {
        let key = snapshot.key();
        let json = match snapshot.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to serialize session slice");
                return;
            }
        };

        if let Err(e) = self.storage.set(key, &json) {
            warn!(key = %key, error = %e, "Failed to persist session slice");
        }
    }

    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => info!(message = %notice.message, "Notice"),
            NoticeLevel::Error => warn!(message = %notice.message, "Notice"),
        }
        // No subscribers is fine.
        let _ = self.notices.send(notice);
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn restaurant(&self) -> Option<Restaurant> {
        self.read(|s| s.restaurant().cloned())
    }

    pub fn menu_items(&self) -> Vec<MenuItem> {
        self.read(|s| s.menu_items().to_vec())
    }

    pub fn is_loading(&self) -> bool {
        self.read(|s| s.is_loading())
    }

    pub fn error(&self) -> Option<String> {
        self.read(|s| s.error().map(str::to_string))
    }

    pub fn theme(&self) -> String {
        self.read(|s| s.theme().to_string())
    }

    pub fn filter(&self) -> MenuFilter {
        self.read(|s| s.filter().clone())
    }

    pub fn cart_items(&self) -> Vec<CartItem> {
        self.read(|s| s.cart().lines().to_vec())
    }

    pub fn favorites(&self) -> Vec<String> {
        self.read(|s| s.favorites().ids().to_vec())
    }

    pub fn recently_viewed(&self) -> Vec<String> {
        self.read(|s| s.recently_viewed().ids().to_vec())
    }

    pub fn ar_sessions(&self) -> Vec<ArSession> {
        self.read(|s| s.ar_sessions().sessions().to_vec())
    }

    pub fn filtered_items(&self) -> Vec<MenuItem> {
        self.read(|s| s.filtered_items().into_iter().cloned().collect())
    }

    pub fn categories(&self) -> Vec<String> {
        self.read(|s| s.categories())
    }

    pub fn items_by_category(&self, category: &str) -> Vec<MenuItem> {
        self.read(|s| s.items_by_category(category).into_iter().cloned().collect())
    }

    pub fn featured_items(&self) -> Vec<MenuItem> {
        self.read(|s| s.featured_items().into_iter().cloned().collect())
    }

    pub fn popular_items(&self) -> Vec<MenuItem> {
        self.read(|s| s.popular_items().into_iter().cloned().collect())
    }

    pub fn recommendations(&self, item_id: Option<&str>) -> Vec<MenuItem> {
        self.read(|s| s.recommendations(item_id).into_iter().cloned().collect())
    }

    pub fn item_by_id(&self, item_id: &str) -> Option<MenuItem> {
        self.read(|s| s.item_by_id(item_id).cloned())
    }

    pub fn nutritional_info(&self, item_id: &str) -> Option<NutritionalInfo> {
        self.read(|s| s.nutritional_info(item_id))
    }

    pub fn is_available(&self, item_id: &str) -> bool {
        self.read(|s| s.is_available(item_id))
    }

    pub fn cart_total(&self) -> Money {
        self.read(|s| s.cart_total())
    }

    pub fn cart_item_count(&self) -> i64 {
        self.read(|s| s.cart_item_count())
    }

    pub fn cart_totals(&self) -> CartTotals {
        self.read(|s| s.cart_totals())
    }

    pub fn is_favorite(&self, item_id: &str) -> bool {
        self.read(|s| s.is_favorite(item_id))
    }

    /// Model descriptor of an AR-capable item, stamped with the current time.
    pub fn ar_model(&self, item_id: &str) -> Option<ArModel> {
        let now = Utc::now();
        self.read(|s| s.ar_model(item_id, now))
    }

    pub fn is_ar_available(&self, item_id: &str) -> bool {
        self.read(|s| s.is_ar_available(item_id))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn set_search_query(&self, query: impl Into<String>) {
        self.lock().set_search_query(query);
    }

    /// `"all"` clears the category filter.
    pub fn set_active_category(&self, category: impl Into<String>) {
        self.lock().set_active_category(category);
    }

    pub fn set_dietary_filter(&self, dietary: DietaryFilter) {
        self.lock().set_dietary_filter(dietary);
    }

    pub fn set_theme(&self, theme: impl Into<String>) {
        self.mutate(|s| s.set_theme(theme));
    }

    pub fn add_to_cart(
        &self,
        item: &MenuItem,
        customizations: Vec<CustomizationChoice>,
        special_instructions: Option<String>,
    ) -> StoreResult<()> {
        self.try_mutate(|s| s.add_to_cart(item, customizations, special_instructions))
    }

    /// ## Errors
    /// `Core(LineNotFound)` for an unknown line; nothing is persisted.
    pub fn remove_from_cart(&self, line_id: &str) -> StoreResult<()> {
        self.try_mutate(|s| s.remove_from_cart(line_id))
    }

    /// Sets a line quantity; zero or less removes the line.
    pub fn update_cart_item_quantity(&self, line_id: &str, quantity: i64) -> StoreResult<()> {
        self.try_mutate(|s| s.update_cart_item_quantity(line_id, quantity))
    }

    pub fn clear_cart(&self) {
        self.mutate(|s| s.clear_cart());
    }

    pub fn toggle_favorite(&self, item_id: &str) {
        self.mutate(|s| s.toggle_favorite(item_id));
    }

    pub fn add_to_recently_viewed(&self, item_id: &str) {
        self.mutate(|s| s.add_to_recently_viewed(item_id));
    }

    /// Records a detail-page view.
    ///
    /// ## Errors
    /// `Core(ItemNotFound)` when the item is not on the loaded menu.
    pub fn track_item_view(&self, item_id: &str) -> StoreResult<()> {
        self.try_mutate(|s| s.track_item_view(item_id))
    }

    pub fn track_ar_usage(&self, draft: ArSessionDraft) {
        let now = Utc::now();
        self.mutate(|s| s.track_ar_usage(draft, now));
    }
}

impl std::fmt::Debug for RestaurantStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestaurantStore")
            .field("restaurant_id", &self.restaurant_id)
            .field("subscribers", &self.notices.receiver_count())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Analytics
// =============================================================================

/// Reports a usage event. Analytics is a log stream for now.
fn track(event: &AnalyticsEvent) {
    match event {
        AnalyticsEvent::ItemView {
            item_id,
            name,
            category,
            price,
        } => info!(
            target: ANALYTICS_TARGET,
            event = "item_view",
            item_id = %item_id,
            name = %name,
            category = %category,
            price = %price,
            "Item viewed"
        ),
        AnalyticsEvent::AddToCart {
            item_id,
            name,
            price,
            cart_total,
        } => info!(
            target: ANALYTICS_TARGET,
            event = "add_to_cart",
            item_id = %item_id,
            name = %name,
            price = %price,
            cart_total = %cart_total,
            "Item added to cart"
        ),
        AnalyticsEvent::ArSession(session) => info!(
            target: ANALYTICS_TARGET,
            event = "ar_session",
            session_id = %session.id,
            item_id = %session.item_id,
            device_type = %session.device_type,
            ar_mode = %session.ar_mode,
            success = session.success,
            interactions = session.interaction_count,
            duration_ms = ?session.duration_ms,
            "AR session recorded"
        ),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
