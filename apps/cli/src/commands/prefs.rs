//! Favorites, recently viewed and theme.

use anyhow::Result;
use bistro_store::RestaurantStore;

use super::item_line;

pub fn toggle_favorite(store: &RestaurantStore, item_id: &str) -> Result<()> {
    store.toggle_favorite(item_id);
    Ok(())
}

pub fn favorites(store: &RestaurantStore) -> Result<()> {
    print_ids(store, "Favorites", &store.favorites());
    Ok(())
}

pub fn recently_viewed(store: &RestaurantStore) -> Result<()> {
    print_ids(store, "Recently viewed", &store.recently_viewed());
    Ok(())
}

pub fn theme(store: &RestaurantStore, name: Option<String>) -> Result<()> {
    if let Some(name) = name {
        store.set_theme(name);
    }
    println!("Theme: {}", store.theme());
    Ok(())
}

/// Ids no longer on the menu are still listed.
fn print_ids(store: &RestaurantStore, title: &str, ids: &[String]) {
    println!("{} ({})", title, ids.len());
    for id in ids {
        match store.item_by_id(id) {
            Some(item) => println!("  {}", item_line(&item)),
            None => println!("  [{}] (not on the current menu)", id),
        }
    }
}
