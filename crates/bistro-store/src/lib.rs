//! # bistro-store: Session Store Host
//!
//! Hosts one menu session on top of the pure logic in `bistro-core`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   UI layer / apps/cli                                                   │
//! │        │  reads (cloned views)       mutations       subscribe()        │
//! │        ▼                                                    │           │
//! │  ┌──────────────────────────────────────────────────────────┼───────┐   │
//! │  │                 bistro-store (THIS CRATE)                ▼       │   │
//! │  │                                                                  │   │
//! │  │   RestaurantStore ──► SessionState (bistro-core)   Notice chan   │   │
//! │  │        │        │                                                │   │
//! │  │        ▼        ▼                                                │   │
//! │  │   MenuSource   KeyValueStore        StoreConfig                  │   │
//! │  │   sample |     memory |             bistro.toml + BISTRO_*       │   │
//! │  │   sqlite       json file                                         │   │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   bistro-db (SQLite)                                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - The `RestaurantStore` session container
//! - [`source`] - Menu source contract and implementations
//! - [`storage`] - Key-value storage contract and implementations
//! - [`config`] - Configuration loading
//! - [`error`] - Storage and store errors
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bistro_store::{MemoryStorage, RestaurantStore, SampleMenuSource};
//!
//! let store = RestaurantStore::new(SampleMenuSource::new(), MemoryStorage::new());
//! store.init().await;
//!
//! let pasta = store.item_by_id("1").unwrap();
//! store.add_to_cart(&pasta, vec![], None)?;
//! assert_eq!(store.cart_item_count(), 1);
//! ```

pub mod config;
pub mod error;
pub mod source;
pub mod storage;
pub mod store;

pub use config::{MenuSourceKind, StoreConfig};
pub use error::{StorageError, StorageResult, StoreError, StoreResult};
pub use source::{DatabaseMenuSource, MenuSource, SampleMenuSource};
pub use storage::{JsonFileStorage, KeyValueStore, MemoryStorage};
pub use store::RestaurantStore;
