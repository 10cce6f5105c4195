//! # Menu Sources
//!
//! Where the session gets its establishment profile and menu from.
//!
//! ## Source Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  MenuSource                                                            │
//! │  ├── load_restaurant(id)              profile of one establishment     │
//! │  └── fetch_available_items(id)        available items, category ASC    │
//! │                                                                         │
//! │  SampleMenuSource     fixed demo catalog, serves default-restaurant    │
//! │  DatabaseMenuSource   SQLite via bistro-db, rows validated             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use bistro_core::validation::validate_menu_item;
use bistro_core::{sample, MenuItem, Restaurant, DEFAULT_RESTAURANT_ID};
use bistro_db::Database;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

/// Supplies establishment data to a [`RestaurantStore`](crate::RestaurantStore).
#[async_trait]
pub trait MenuSource: Send + Sync {
    /// Loads the profile of establishment `id`.
    async fn load_restaurant(&self, id: &str) -> StoreResult<Restaurant>;

    /// Loads the available items of an establishment, ordered by category.
    async fn fetch_available_items(&self, restaurant_id: &str) -> StoreResult<Vec<MenuItem>>;
}

/// Stable category sort, the order a database query would return.
fn order_by_category(mut items: Vec<MenuItem>) -> Vec<MenuItem> {
    items.sort_by(|a, b| a.category.cmp(&b.category));
    items
}

// =============================================================================
// Sample Source
// =============================================================================

/// The fixed demo catalog.
#[derive(Debug, Clone, Default)]
pub struct SampleMenuSource;

impl SampleMenuSource {
    pub fn new() -> Self {
        SampleMenuSource
    }
}

#[async_trait]
impl MenuSource for SampleMenuSource {
    async fn load_restaurant(&self, id: &str) -> StoreResult<Restaurant> {
        let restaurant = sample::restaurant();
        if restaurant.id != id {
            return Err(StoreError::RestaurantNotFound(id.to_string()));
        }
        Ok(restaurant)
    }

    async fn fetch_available_items(&self, restaurant_id: &str) -> StoreResult<Vec<MenuItem>> {
        let items = sample::menu_items()
            .into_iter()
            .filter(|item| item.restaurant_id == restaurant_id && item.is_available)
            .collect();
        Ok(order_by_category(items))
    }
}

// =============================================================================
// Database Source
// =============================================================================

/// Menu data from a SQLite database.
///
/// ## Establishment Fallback
/// The profile table is optional: a database seeded with menu rows only
/// still serves the default establishment using the demo profile.
#[derive(Debug, Clone)]
pub struct DatabaseMenuSource {
    db: Database,
}

impl DatabaseMenuSource {
    pub fn new(db: Database) -> Self {
        DatabaseMenuSource { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl MenuSource for DatabaseMenuSource {
    async fn load_restaurant(&self, id: &str) -> StoreResult<Restaurant> {
        match self.db.restaurants().get_by_id(id).await? {
            Some(restaurant) => Ok(restaurant),
            None if id == DEFAULT_RESTAURANT_ID => {
                debug!(restaurant_id = %id, "No stored profile, using demo establishment");
                Ok(sample::restaurant())
            }
            None => Err(StoreError::RestaurantNotFound(id.to_string())),
        }
    }

    async fn fetch_available_items(&self, restaurant_id: &str) -> StoreResult<Vec<MenuItem>> {
        let rows = self.db.menu().list_available(restaurant_id).await?;

        let items = rows
            .into_iter()
            .filter(|item| match validate_menu_item(item) {
                Ok(()) => true,
                Err(e) => {
                    warn!(item_id = %item.id, error = %e, "Skipping invalid menu item");
                    false
                }
            })
            .collect();
        Ok(items)
    }
}
