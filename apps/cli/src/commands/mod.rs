//! # Commands
//!
//! One handler per subcommand, grouped by concern. Handlers print to stdout
//! and return errors for the binary to report.

pub mod ar;
pub mod cart;
pub mod menu;
pub mod prefs;

use anyhow::Result;
use bistro_core::{MenuItem, Notice, NoticeLevel};
use bistro_store::RestaurantStore;

use crate::Commands;

pub async fn dispatch(store: &RestaurantStore, command: Commands) -> Result<()> {
    match command {
        Commands::Menu {
            query,
            category,
            dietary,
        } => menu::list(store, query, category, dietary),
        Commands::Categories => menu::categories(store),
        Commands::Show { item_id } => menu::show(store, &item_id),
        Commands::Refresh => menu::refresh(store).await,
        Commands::Featured => {
            print_items("Featured", &store.featured_items());
            Ok(())
        }
        Commands::Popular => {
            print_items("Popular", &store.popular_items());
            Ok(())
        }
        Commands::Recommend { item_id } => menu::recommend(store, item_id.as_deref()),

        Commands::Add {
            item_id,
            customizations,
            note,
        } => cart::add(store, &item_id, customizations, note),
        Commands::Qty { line_id, quantity } => cart::set_quantity(store, &line_id, quantity),
        Commands::Remove { line_id } => cart::remove(store, &line_id),
        Commands::Cart => cart::show(store),
        Commands::Clear => cart::clear(store),

        Commands::Fav { item_id } => prefs::toggle_favorite(store, &item_id),
        Commands::Favs => prefs::favorites(store),
        Commands::Recent => prefs::recently_viewed(store),
        Commands::Theme { name } => prefs::theme(store, name),

        Commands::Ar { item_id } => ar::model(store, &item_id),
        Commands::ArTrack {
            item_id,
            device,
            mode,
            success,
            interactions,
        } => ar::track(store, item_id, device, mode, success, interactions),
    }
}

pub fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Success => println!("✓ {}", notice.message),
        NoticeLevel::Error => eprintln!("✗ {}", notice.message),
    }
}

/// One summary line per item.
pub fn print_items(title: &str, items: &[MenuItem]) {
    println!("{} ({})", title, items.len());
    for item in items {
        println!("  {}", item_line(item));
    }
}

pub fn item_line(item: &MenuItem) -> String {
    let mut flags = Vec::new();
    if item.is_new {
        flags.push("new");
    }
    if item.is_popular {
        flags.push("popular");
    }
    if item.is_spicy {
        flags.push("spicy");
    }

    let mut line = format!(
        "[{}] {:<24} {:>9}  {:<12} {}",
        item.id,
        item.name,
        item.price.to_string(),
        item.category,
        item.dietary_type.as_str()
    );
    if !flags.is_empty() {
        line.push_str(&format!("  ({})", flags.join(", ")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use bistro_core::sample;

    #[test]
    fn test_item_line_shows_flags() {
        let mut item = sample::menu_items().remove(0);
        item.is_new = true;
        item.is_popular = false;
        item.is_spicy = false;

        let line = item_line(&item);
        assert!(line.starts_with(&format!("[{}] {}", item.id, item.name)));
        assert!(line.contains(&item.price.to_string()));
        assert!(line.ends_with("(new)"));
    }
}
