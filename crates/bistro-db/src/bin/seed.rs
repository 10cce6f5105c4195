//! # Seed Data Loader
//!
//! Loads the demo establishment and its six dishes into a menu database.
//!
//! ## Usage
//! ```bash
//! # Seed ./bistro_dev.db (default)
//! cargo run -p bistro-db --bin seed
//!
//! # Specify database path
//! cargo run -p bistro-db --bin seed -- --db ./data/bistro.db
//!
//! # Keep existing rows and add only missing dishes
//! cargo run -p bistro-db --bin seed -- --merge
//! ```

use bistro_core::sample;
use bistro_db::{Database, DbConfig, DbError};
use clap::Parser;

/// Bistro seed data loader.
#[derive(Parser, Debug)]
#[command(name = "seed", version, about = "Loads the demo catalog into a menu database")]
struct Args {
    /// Database file path
    #[arg(short, long, default_value = "./bistro_dev.db")]
    db: String,

    /// Add missing dishes to a non-empty database
    #[arg(short, long)]
    merge: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("🌱 Bistro Seed Data Loader");
    println!("==========================");
    println!("Database: {}", args.db);
    println!();

    let db = Database::new(DbConfig::new(&args.db)).await?;
    if !db.health_check().await {
        return Err("database did not answer after connecting".into());
    }

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let result = seed(&db, args.merge).await;
    db.close().await;
    result
}

async fn seed(db: &Database, merge: bool) -> Result<(), Box<dyn std::error::Error>> {
    let existing = db.menu().count().await?;
    if existing > 0 && !merge {
        println!("⚠ Database already has {} menu items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Pass --merge to add missing dishes.");
        return Ok(());
    }

    let restaurant = sample::restaurant();
    db.restaurants().upsert(&restaurant).await?;
    println!("✓ Restaurant '{}' ({})", restaurant.name, restaurant.id);

    println!();
    println!("Inserting dishes...");

    let mut inserted = 0;
    for item in sample::menu_items() {
        match db.menu().insert(&item).await {
            Ok(()) => {
                inserted += 1;
                println!("  + {} [{}] {}", item.name, item.category, item.price);
            }
            Err(DbError::UniqueViolation { .. }) => {
                println!("  = {} (already present)", item.name);
            }
            Err(e) => eprintln!("Failed to insert {}: {}", item.name, e),
        }
    }

    println!();
    println!("Verifying...");
    let available = db.menu().list_available(&restaurant.id).await?;
    println!("  Available items: {}", available.len());

    println!();
    println!("✓ Seed complete! ({} inserted)", inserted);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["seed"]).unwrap();
        assert_eq!(args.db, "./bistro_dev.db");
        assert!(!args.merge);
    }

    #[test]
    fn test_db_flag_requires_a_path() {
        assert!(Args::try_parse_from(["seed", "--db"]).is_err());

        let args = Args::try_parse_from(["seed", "-d", "./data/bistro.db", "--merge"]).unwrap();
        assert_eq!(args.db, "./data/bistro.db");
        assert!(args.merge);
    }
}
