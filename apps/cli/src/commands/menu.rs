//! # Menu Commands
//!
//! Browsing, search and item detail.

use anyhow::{bail, Result};
use bistro_core::catalog::DietaryFilter;
use bistro_store::RestaurantStore;

use super::{item_line, print_items};

pub fn list(
    store: &RestaurantStore,
    query: Option<String>,
    category: Option<String>,
    dietary: DietaryFilter,
) -> Result<()> {
    store.set_search_query(query.unwrap_or_default());
    store.set_active_category(category.unwrap_or_else(|| "all".to_string()));
    store.set_dietary_filter(dietary);

    if let Some(restaurant) = store.restaurant() {
        println!("{}", restaurant.name);
    }
    print_items("Menu", &store.filtered_items());
    Ok(())
}

pub fn categories(store: &RestaurantStore) -> Result<()> {
    for category in store.categories() {
        let count = store.items_by_category(&category).len();
        println!("{:<16} {}", category, count);
    }
    Ok(())
}

/// Item detail page: records the view, then prints facts and related items.
pub fn show(store: &RestaurantStore, item_id: &str) -> Result<()> {
    let Some(item) = store.item_by_id(item_id) else {
        bail!("No menu item with id '{}'", item_id);
    };
    store.track_item_view(item_id)?;

    println!("{}", item_line(&item));
    if !item.description.is_empty() {
        println!("  {}", item.description);
    }
    if let Some(spice) = item.spice_level {
        println!("  Spice: {}", spice);
    }
    if let Some(minutes) = item.prep_time {
        println!("  Ready in about {} min", minutes);
    }
    if !item.tags.is_empty() {
        println!("  Tags: {}", item.tags.join(", "));
    }
    if !item.allergens.is_empty() {
        println!("  Allergens: {}", item.allergens.join(", "));
    }
    if let Some(n) = store.nutritional_info(item_id) {
        println!(
            "  {} kcal · protein {}g · carbs {}g · fat {}g · fiber {}g · sugar {}g",
            n.calories, n.protein, n.carbs, n.fat, n.fiber, n.sugar
        );
    }
    println!(
        "  Rating {:.1} ({} reviews) · {}",
        item.average_rating,
        item.review_count,
        if store.is_available(item_id) {
            "available"
        } else {
            "unavailable"
        }
    );
    if store.is_favorite(item_id) {
        println!("  ♥ In favorites");
    }
    if store.is_ar_available(item_id) {
        println!("  AR view available (bistro ar {})", item_id);
    }

    let related = store.recommendations(Some(item_id));
    if !related.is_empty() {
        println!();
        print_items("You might also like", &related);
    }
    Ok(())
}

pub async fn refresh(store: &RestaurantStore) -> Result<()> {
    store.refresh().await;
    if let Some(error) = store.error() {
        bail!("{}", error);
    }
    println!("Menu refreshed: {} items", store.menu_items().len());
    Ok(())
}

pub fn recommend(store: &RestaurantStore, item_id: Option<&str>) -> Result<()> {
    if let Some(id) = item_id {
        if store.item_by_id(id).is_none() {
            bail!("No menu item with id '{}'", id);
        }
    }
    print_items("Recommended", &store.recommendations(item_id));
    Ok(())
}
