//! # Repository Module
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  DatabaseMenuSource                                                    │
//! │       │                                                                 │
//! │       │  db.menu().list_available("default-restaurant")                │
//! │       ▼                                                                 │
//! │  MenuRepository                    RestaurantRepository                │
//! │  ├── list_available(restaurant)    ├── get_by_id(id)                   │
//! │  ├── get_by_id(id)                 └── upsert(restaurant)              │
//! │  ├── insert(item)                                                      │
//! │  └── count()                                                           │
//! │       │                                                                 │
//! │       │  SQL + row mapping                                              │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod menu;
pub mod restaurant;
