//! # Bistro CLI Library
//!
//! Argument definitions and dispatch for the `bistro` binary.
//!
//! ## Module Organization
//! ```text
//! bistro_cli/
//! ├── lib.rs          ◄─── You are here (arguments, logging, dispatch)
//! └── commands/
//!     ├── mod.rs      ◄─── Shared printing helpers
//!     ├── menu.rs     ◄─── Browse, search, item detail, refresh
//!     ├── cart.rs     ◄─── Cart manipulation
//!     ├── prefs.rs    ◄─── Favorites, recently viewed, theme
//!     └── ar.rs       ◄─── AR model lookup and session tracking
//! ```
//!
//! Every invocation is one short session: the store is rehydrated from the
//! storage file, the command runs, and persisted slices are written back as
//! the command mutates them.

pub mod commands;

use anyhow::{Context, Result};
use bistro_core::ar::{ArMode, DeviceType};
use bistro_core::catalog::DietaryFilter;
use bistro_core::CustomizationChoice;
use bistro_store::{RestaurantStore, StoreConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bistro")]
#[command(about = "Bistro - restaurant menu, cart and favorites from the terminal", long_about = None)]
pub struct Cli {
    /// Config file (default: platform config dir / bistro.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the menu, optionally filtered
    Menu {
        /// Case-insensitive text search
        #[arg(short, long)]
        query: Option<String>,
        /// Exact category, or "all"
        #[arg(short, long)]
        category: Option<String>,
        /// all | veg | non-veg | vegan
        #[arg(short, long, default_value = "all")]
        dietary: DietaryFilter,
    },
    /// List menu categories
    Categories,
    /// Show one item and record the view
    Show { item_id: String },
    /// Re-fetch the menu from the source
    Refresh,
    /// Featured items
    Featured,
    /// Best sellers and top rated
    Popular,
    /// Related items, or general picks without an id
    Recommend { item_id: Option<String> },

    /// Add one unit of an item to the cart
    Add {
        item_id: String,
        /// Customization as id:name:cents (repeatable)
        #[arg(long = "custom", value_parser = parse_customization)]
        customizations: Vec<CustomizationChoice>,
        /// Special instructions for the kitchen
        #[arg(long)]
        note: Option<String>,
    },
    /// Set a cart line quantity (0 or less removes it)
    Qty {
        line_id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a cart line
    Remove { line_id: String },
    /// Show the cart
    Cart,
    /// Empty the cart
    Clear,

    /// Toggle an item in favorites
    Fav { item_id: String },
    /// List favorites
    Favs,
    /// List recently viewed items
    Recent,
    /// Show or set the theme
    Theme { name: Option<String> },

    /// Show the AR model of an item
    Ar { item_id: String },
    /// Record an AR viewing session
    ArTrack {
        item_id: String,
        /// mobile | tablet | desktop
        #[arg(long)]
        device: Option<DeviceType>,
        /// webxr | scene-viewer | quick-look | fallback
        #[arg(long)]
        mode: Option<ArMode>,
        #[arg(long)]
        success: bool,
        #[arg(long)]
        interactions: Option<u32>,
    },
}

/// Parses `id:name:cents` (the name may itself contain colons).
pub fn parse_customization(raw: &str) -> Result<CustomizationChoice, String> {
    let (id, rest) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected id:name:cents, got '{}'", raw))?;
    let (name, cents) = rest
        .rsplit_once(':')
        .ok_or_else(|| format!("expected id:name:cents, got '{}'", raw))?;
    let cents: i64 = cents
        .trim()
        .parse()
        .map_err(|_| format!("invalid cost '{}' in '{}'", cents, raw))?;

    if id.trim().is_empty() || name.trim().is_empty() {
        return Err(format!("customization id and name are required in '{}'", raw));
    }
    if cents < 0 {
        return Err(format!("customization cost cannot be negative in '{}'", raw));
    }

    Ok(CustomizationChoice::new(id.trim(), name.trim(), cents))
}

/// Builds the store, loads the session and runs one command.
pub async fn run(cli: Cli) -> Result<()> {
    let config = StoreConfig::load(cli.config.clone()).context("Failed to load configuration")?;
    debug!(?config, "Configuration loaded");

    let store = RestaurantStore::from_config(&config)
        .await
        .context("Failed to open the restaurant store")?;
    let mut notices = store.subscribe();

    store.init().await;
    if let Some(error) = store.error() {
        anyhow::bail!("{}", error);
    }
    info!(restaurant_id = %store.restaurant_id(), "Session ready");

    let result = commands::dispatch(&store, cli.command).await;

    while let Ok(notice) = notices.try_recv() {
        commands::print_notice(&notice);
    }

    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bistro::analytics=info` - Analytics events only
/// - Default: `info,bistro=debug,sqlx=warn`
///
/// Logs go to stderr so command output stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bistro=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_customization() {
        let choice = parse_customization("extra-cheese:Extra cheese:150").unwrap();
        assert_eq!(choice.id, "extra-cheese");
        assert_eq!(choice.name, "Extra cheese");
        assert_eq!(choice.additional_cost.cents(), 150);

        let colon = parse_customization("x:Sauce: garlic:0").unwrap();
        assert_eq!(colon.name, "Sauce: garlic");

        assert!(parse_customization("extra-cheese").is_err());
        assert!(parse_customization("a:b:lots").is_err());
        assert!(parse_customization("a:b:-5").is_err());
        assert!(parse_customization(":b:5").is_err());
    }

    #[test]
    fn test_cli_parses_menu_filters() {
        let cli = Cli::try_parse_from(["bistro", "menu", "-q", "pasta", "-d", "vegan"]).unwrap();
        match cli.command {
            Commands::Menu {
                query, dietary, category,
            } => {
                assert_eq!(query.as_deref(), Some("pasta"));
                assert_eq!(dietary, DietaryFilter::Vegan);
                assert!(category.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parses_cart_commands() {
        let cli = Cli::try_parse_from([
            "bistro", "add", "1", "--custom", "xl:Large:300", "--note", "no onions",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Add { ref customizations, .. } if customizations.len() == 1
        ));

        let cli = Cli::try_parse_from(["bistro", "qty", "cart-1", "-1"]).unwrap();
        assert!(matches!(cli.command, Commands::Qty { quantity: -1, .. }));
    }

    #[test]
    fn test_cli_rejects_unknown_dietary() {
        assert!(Cli::try_parse_from(["bistro", "menu", "-d", "keto"]).is_err());
    }
}
