//! # Restaurant Repository
//!
//! Establishment profiles. One row per establishment id.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use bistro_core::Restaurant;

#[derive(Debug, Clone)]
pub struct RestaurantRepository {
    pool: SqlitePool,
}

impl RestaurantRepository {
    pub fn new(pool: SqlitePool) -> Self {
        RestaurantRepository { pool }
    }

    /// Gets an establishment by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Restaurant))` - Establishment found
    /// * `Ok(None)` - No such establishment
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Restaurant>> {
        let restaurant = sqlx::query_as::<_, Restaurant>(
            r#"
            SELECT id, name, theme, primary_color, secondary_color, created_at, updated_at
            FROM restaurants
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(restaurant)
    }

    /// Inserts the establishment or overwrites the existing profile.
    ///
    /// `created_at` of an existing row is kept.
    pub async fn upsert(&self, restaurant: &Restaurant) -> DbResult<()> {
        debug!(id = %restaurant.id, "Upserting restaurant");

        sqlx::query(
            r#"
            INSERT INTO restaurants (
                id, name, theme, primary_color, secondary_color, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                theme = excluded.theme,
                primary_color = excluded.primary_color,
                secondary_color = excluded.secondary_color,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&restaurant.id)
        .bind(&restaurant.name)
        .bind(&restaurant.theme)
        .bind(&restaurant.primary_color)
        .bind(&restaurant.secondary_color)
        .bind(restaurant.created_at)
        .bind(restaurant.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use bistro_core::Restaurant;

    #[tokio::test]
    async fn test_upsert_then_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.restaurants();

        let mut restaurant = Restaurant::demo();
        repo.upsert(&restaurant).await.unwrap();

        restaurant.theme = "dark".to_string();
        repo.upsert(&restaurant).await.unwrap();

        let loaded = repo.get_by_id(&restaurant.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Matchis Restaurant");
        assert_eq!(loaded.theme, "dark");
    }

    #[tokio::test]
    async fn test_missing_restaurant_is_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.restaurants().get_by_id("nope").await.unwrap().is_none());
    }
}
