//! # Menu Repository
//!
//! Database operations for menu items.
//!
//! ## Row Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  menu_items row                         MenuItem                        │
//! │  ──────────────                         ────────                        │
//! │  price_cents INTEGER ─────────────────► price: Money                    │
//! │  dietary_type TEXT ('non-veg') ───────► DietaryType::NonVeg             │
//! │  tags / allergens TEXT (JSON array) ──► Vec<String>                     │
//! │  nutritional_info TEXT (JSON object) ─► Option<NutritionalInfo>         │
//! │  spice_level TEXT ('hot') ────────────► Option<SpiceLevel>              │
//! │  is_* INTEGER (0/1) ──────────────────► bool                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A row that cannot be mapped is skipped with a warning instead of failing
//! the whole menu.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use bistro_core::{DietaryType, MenuItem, Money, NutritionalInfo, SpiceLevel};

const MENU_COLUMNS: &str = r#"
    id, restaurant_id, name, description, price_cents, category, dietary_type,
    nutritional_info, image_url, image,
    is_available, is_featured, is_popular, is_new, is_spicy,
    spice_level, prep_time, tags, allergens,
    has_3d_model, ar_enabled, model_path,
    sales_count, average_rating, review_count,
    created_at, updated_at
"#;

/// Raw `menu_items` row.
#[derive(Debug, sqlx::FromRow)]
struct MenuItemRow {
    id: String,
    restaurant_id: String,
    name: String,
    description: String,
    price_cents: i64,
    category: String,
    dietary_type: DietaryType,
    nutritional_info: Option<String>,
    image_url: Option<String>,
    image: Option<String>,
    is_available: bool,
    is_featured: bool,
    is_popular: bool,
    is_new: bool,
    is_spicy: bool,
    spice_level: Option<String>,
    prep_time: Option<i64>,
    tags: String,
    allergens: String,
    has_3d_model: bool,
    ar_enabled: bool,
    model_path: Option<String>,
    sales_count: i64,
    average_rating: f64,
    review_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MenuItemRow> for MenuItem {
    type Error = DbError;

    fn try_from(row: MenuItemRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let invalid = |reason: String| DbError::invalid_row("menu item", id.clone(), reason);

        let tags: Vec<String> = serde_json::from_str(&row.tags)
            .map_err(|e| invalid(format!("tags: {}", e)))?;
        let allergens: Vec<String> = serde_json::from_str(&row.allergens)
            .map_err(|e| invalid(format!("allergens: {}", e)))?;
        let nutritional_info = row
            .nutritional_info
            .as_deref()
            .map(serde_json::from_str::<NutritionalInfo>)
            .transpose()
            .map_err(|e| invalid(format!("nutritional_info: {}", e)))?;
        let spice_level = row
            .spice_level
            .as_deref()
            .map(str::parse::<SpiceLevel>)
            .transpose()
            .map_err(|e| invalid(e.to_string()))?;
        let prep_time = row
            .prep_time
            .map(u32::try_from)
            .transpose()
            .map_err(|_| invalid("prep_time is negative".to_string()))?;
        let sales_count =
            u32::try_from(row.sales_count).map_err(|_| invalid("sales_count out of range".to_string()))?;
        let review_count = u32::try_from(row.review_count)
            .map_err(|_| invalid("review_count out of range".to_string()))?;

        Ok(MenuItem {
            id,
            restaurant_id: row.restaurant_id,
            name: row.name,
            description: row.description,
            price: Money::from_cents(row.price_cents),
            category: row.category,
            dietary_type: row.dietary_type,
            nutritional_info,
            image_url: row.image_url,
            image: row.image,
            is_available: row.is_available,
            is_featured: row.is_featured,
            is_popular: row.is_popular,
            is_new: row.is_new,
            is_spicy: row.is_spicy,
            spice_level,
            prep_time,
            tags,
            allergens,
            has_3d_model: row.has_3d_model,
            ar_enabled: row.ar_enabled,
            model_path: row.model_path,
            sales_count,
            average_rating: row.average_rating,
            review_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for menu item database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = MenuRepository::new(pool);
/// let items = repo.list_available("default-restaurant").await?;
/// ```
#[derive(Debug, Clone)]
pub struct MenuRepository {
    pool: SqlitePool,
}

impl MenuRepository {
    pub fn new(pool: SqlitePool) -> Self {
        MenuRepository { pool }
    }

    /// Lists the available items of an establishment.
    ///
    /// ## Ordering
    /// By category ascending; items of the same category keep insertion
    /// order.
    pub async fn list_available(&self, restaurant_id: &str) -> DbResult<Vec<MenuItem>> {
        debug!(restaurant_id = %restaurant_id, "Listing available menu items");

        let sql = format!(
            "SELECT {} FROM menu_items \
             WHERE restaurant_id = ?1 AND is_available = 1 \
             ORDER BY category ASC, rowid ASC",
            MENU_COLUMNS
        );
        let rows = sqlx::query_as::<_, MenuItemRow>(&sql)
            .bind(restaurant_id)
            .fetch_all(&self.pool)
            .await?;

        let items: Vec<MenuItem> = rows
            .into_iter()
            .filter_map(|row| match MenuItem::try_from(row) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable menu row");
                    None
                }
            })
            .collect();

        debug!(count = items.len(), "Menu items loaded");
        Ok(items)
    }

    /// Gets an item by id, available or not.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<MenuItem>> {
        let sql = format!("SELECT {} FROM menu_items WHERE id = ?1", MENU_COLUMNS);
        let row = sqlx::query_as::<_, MenuItemRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(MenuItem::try_from).transpose()
    }

    /// Inserts a new menu item.
    ///
    /// ## Errors
    /// - `UniqueViolation` when the id exists
    /// - `ForeignKeyViolation` when the establishment does not exist
    pub async fn insert(&self, item: &MenuItem) -> DbResult<()> {
        debug!(id = %item.id, name = %item.name, "Inserting menu item");

        let nutritional_info = item
            .nutritional_info
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let tags = serde_json::to_string(&item.tags)?;
        let allergens = serde_json::to_string(&item.allergens)?;

        sqlx::query(
            r#"
            INSERT INTO menu_items (
                id, restaurant_id, name, description, price_cents, category, dietary_type,
                nutritional_info, image_url, image,
                is_available, is_featured, is_popular, is_new, is_spicy,
                spice_level, prep_time, tags, allergens,
                has_3d_model, ar_enabled, model_path,
                sales_count, average_rating, review_count,
                created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7,
                ?8, ?9, ?10,
                ?11, ?12, ?13, ?14, ?15,
                ?16, ?17, ?18, ?19,
                ?20, ?21, ?22,
                ?23, ?24, ?25,
                ?26, ?27
            )
            "#,
        )
        .bind(&item.id)
        .bind(&item.restaurant_id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price.cents())
        .bind(item.dietary_type)
        .bind(nutritional_info)
        .bind(&item.image_url)
        .bind(&item.image)
        .bind(item.is_available)
        .bind(item.is_featured)
        .bind(item.is_popular)
        .bind(item.is_new)
        .bind(item.is_spicy)
        .bind(item.spice_level.map(|s| s.as_str()))
        .bind(item.prep_time)
        .bind(tags)
        .bind(allergens)
        .bind(item.has_3d_model)
        .bind(item.ar_enabled)
        .bind(&item.model_path)
        .bind(item.sales_count)
        .bind(item.average_rating)
        .bind(item.review_count)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::UniqueViolation {
                field,
                value: item.id.clone(),
            },
            other => other,
        })?;

        Ok(())
    }

    /// Total number of stored items, available or not.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use bistro_core::{sample, DietaryType, MenuItem, Money, SpiceLevel};

    async fn seeded() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.restaurants().upsert(&sample::restaurant()).await.unwrap();
        for item in sample::menu_items() {
            db.menu().insert(&item).await.unwrap();
        }
        db
    }

    #[tokio::test]
    async fn test_list_available_orders_by_category() {
        let db = seeded().await;

        let items = db.menu().list_available("default-restaurant").await.unwrap();
        let categories: Vec<&str> = items.iter().map(|i| i.category.as_str()).collect();

        assert_eq!(items.len(), 6);
        assert_eq!(
            categories,
            vec!["Burgers", "Dessert", "Main Course", "Main Course", "Main Course", "Pizza"]
        );
        let mains: Vec<&str> = items
            .iter()
            .filter(|i| i.category == "Main Course")
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(mains, vec!["1", "2", "4"]);
    }

    #[tokio::test]
    async fn test_unavailable_and_foreign_items_are_excluded() {
        let db = seeded().await;

        let mut sold_out = MenuItem::new("99", "Sold Out Soup", "Starters", Money::from_cents(500));
        sold_out.is_available = false;
        db.menu().insert(&sold_out).await.unwrap();

        let items = db.menu().list_available("default-restaurant").await.unwrap();
        assert!(items.iter().all(|i| i.id != "99"));
        assert!(db.menu().list_available("other").await.unwrap().is_empty());
        assert_eq!(db.menu().count().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_round_trips_every_column() {
        let db = seeded().await;
        let original = sample::menu_items().remove(3);

        let loaded = db.menu().get_by_id(&original.id).await.unwrap().unwrap();

        assert_eq!(loaded.name, original.name);
        assert_eq!(loaded.price, original.price);
        assert_eq!(loaded.dietary_type, DietaryType::Vegan);
        assert_eq!(loaded.spice_level, Some(SpiceLevel::Hot));
        assert_eq!(loaded.tags, original.tags);
        assert_eq!(loaded.allergens, original.allergens);
        assert_eq!(loaded.nutritional_info, original.nutritional_info);
        assert_eq!(loaded.model_path, original.model_path);
        assert_eq!(loaded.sales_count, original.sales_count);
        assert!(loaded.ar_enabled && loaded.has_3d_model);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let db = seeded().await;
        let err = db.menu().insert(&sample::menu_items()[0]).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { value, .. } if value == "1"));
    }

    #[tokio::test]
    async fn test_unknown_restaurant_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut orphan = MenuItem::new("1", "Orphan", "Mains", Money::from_cents(100));
        orphan.restaurant_id = "missing".to_string();

        let err = db.menu().insert(&orphan).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_corrupt_row_is_skipped() {
        let db = seeded().await;
        sqlx::query("UPDATE menu_items SET tags = 'not json' WHERE id = '2'")
            .execute(db.pool())
            .await
            .unwrap();

        let items = db.menu().list_available("default-restaurant").await.unwrap();
        assert_eq!(items.len(), 5);
        assert!(items.iter().all(|i| i.id != "2"));
    }
}
