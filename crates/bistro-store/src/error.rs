//! # Store Error Types
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  StoreError (what callers of RestaurantStore see)                      │
//! │  ├── Source      - a menu source could not answer                      │
//! │  ├── RestaurantNotFound                                                │
//! │  ├── Storage ◄── StorageError (key-value backend)                      │
//! │  ├── Db      ◄── bistro_db::DbError                                    │
//! │  ├── Core    ◄── bistro_core::CoreError (unknown cart line, ...)       │
//! │  └── Config  - unreadable configuration file                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage failures never reach the UI through mutations: the store logs
//! them and keeps the in-memory change.

use bistro_core::CoreError;
use bistro_db::DbError;
use std::path::PathBuf;
use thiserror::Error;

/// Key-value storage failures.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded or decoded as JSON.
    #[error("Storage value for '{key}' is not valid JSON: {reason}")]
    Serialization { key: String, reason: String },

    /// The backing document is unreadable as a whole.
    #[error("Storage file {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn serialization(key: &str, err: serde_json::Error) -> Self {
        StorageError::Serialization {
            key: key.to_string(),
            reason: err.to_string(),
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Errors surfaced by the session store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Menu source failed: {0}")]
    Source(String),

    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::Config(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_passes_through() {
        let err: StoreError = CoreError::LineNotFound("cart-1".to_string()).into();
        assert_eq!(err.to_string(), "Cart line not found: cart-1");
    }

    #[test]
    fn test_serialization_error_names_key() {
        let json_err = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let err = StorageError::serialization("restaurant-cart", json_err);
        assert!(err.to_string().contains("restaurant-cart"));
    }
}
