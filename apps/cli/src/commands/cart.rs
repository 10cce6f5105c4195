//! # Cart Commands
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐   add    ┌──────────┐   qty 0 / remove   ┌──────────┐    │
//! │  │  Empty   │─────────►│ In Cart  │───────────────────►│ line gone│    │
//! │  │  Cart    │          │          │◄── add (same item, └──────────┘    │
//! │  └──────────┘          └────┬─────┘    same choices:                   │
//! │       ▲                     │          quantity + 1)                   │
//! │       └──────── clear ──────┘                                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::{bail, Result};
use bistro_core::CustomizationChoice;
use bistro_store::RestaurantStore;

pub fn add(
    store: &RestaurantStore,
    item_id: &str,
    customizations: Vec<CustomizationChoice>,
    note: Option<String>,
) -> Result<()> {
    let Some(item) = store.item_by_id(item_id) else {
        bail!("No menu item with id '{}'", item_id);
    };
    if !item.is_available {
        bail!("{} is not available right now", item.name);
    }

    store.add_to_cart(&item, customizations, note)?;
    print_totals(store);
    Ok(())
}

pub fn set_quantity(store: &RestaurantStore, line_id: &str, quantity: i64) -> Result<()> {
    store.update_cart_item_quantity(line_id, quantity)?;
    print_totals(store);
    Ok(())
}

pub fn remove(store: &RestaurantStore, line_id: &str) -> Result<()> {
    store.remove_from_cart(line_id)?;
    print_totals(store);
    Ok(())
}

pub fn clear(store: &RestaurantStore) -> Result<()> {
    store.clear_cart();
    Ok(())
}

pub fn show(store: &RestaurantStore) -> Result<()> {
    let lines = store.cart_items();
    if lines.is_empty() {
        println!("Cart is empty");
        return Ok(());
    }

    for line in &lines {
        println!(
            "{}  {} x{}  {}",
            line.id, line.menu_item.name, line.quantity, line.total_price
        );
        for choice in &line.customizations {
            println!("    + {} ({})", choice.name, choice.additional_cost);
        }
        if let Some(note) = &line.special_instructions {
            println!("    \"{}\"", note);
        }
    }
    println!("──────────");
    print_totals(store);
    Ok(())
}

fn print_totals(store: &RestaurantStore) {
    let totals = store.cart_totals();
    println!(
        "{} items in {} lines · total {}",
        totals.item_count, totals.line_count, totals.total
    );
}
