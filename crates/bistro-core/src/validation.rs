//! # Validation Module
//!
//! Checks applied to menu rows before they enter the session.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Menu source (sample / SQLite)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_menu_item() ── Err ──► row skipped, warning logged            │
//! │       │ Ok                                                              │
//! │       ▼                                                                 │
//! │  SessionState.menu_items                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The checks stay shallow: the cart and filters only need an identity, a
//! display name and a price that cannot produce negative totals.

use crate::error::ValidationError;
use crate::types::MenuItem;

/// Longest accepted item name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Highest accepted price, in cents ($100,000.00).
pub const MAX_PRICE_CENTS: i64 = 10_000_000;

/// Validates a required text field.
///
/// ```rust
/// use bistro_core::validation::validate_required;
///
/// assert!(validate_required("id", "1").is_ok());
/// assert!(validate_required("id", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    validate_required("name", name)?;
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }
    Ok(())
}

pub fn validate_price(cents: i64) -> Result<(), ValidationError> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }
    Ok(())
}

/// Ratings are averages on a 0 to 5 scale.
pub fn validate_rating(rating: f64) -> Result<(), ValidationError> {
    if !rating.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "average_rating".to_string(),
            reason: "not a finite number".to_string(),
        });
    }
    if !(0.0..=5.0).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "average_rating".to_string(),
            min: 0,
            max: 5,
        });
    }
    Ok(())
}

/// Runs every row check on a menu item.
pub fn validate_menu_item(item: &MenuItem) -> Result<(), ValidationError> {
    validate_required("id", &item.id)?;
    validate_name(&item.name)?;
    validate_required("category", &item.category)?;
    validate_price(item.price.cents())?;
    validate_rating(item.average_rating)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn item() -> MenuItem {
        MenuItem::new("1", "Truffle Pasta", "Main Course", Money::from_cents(2899))
    }

    #[test]
    fn test_valid_item_passes() {
        assert!(validate_menu_item(&item()).is_ok());
    }

    #[test]
    fn test_empty_identity_fails() {
        let mut missing_id = item();
        missing_id.id = String::new();
        assert!(matches!(
            validate_menu_item(&missing_id),
            Err(ValidationError::Required { field }) if field == "id"
        ));

        let mut missing_name = item();
        missing_name.name = "  ".to_string();
        assert!(validate_menu_item(&missing_name).is_err());
    }

    #[test]
    fn test_name_length() {
        assert!(validate_name(&"a".repeat(MAX_NAME_LENGTH)).is_ok());
        assert!(matches!(
            validate_name(&"a".repeat(MAX_NAME_LENGTH + 1)),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_negative_price_fails() {
        let mut bad = item();
        bad.price = Money::from_cents(-1);
        assert!(matches!(
            validate_menu_item(&bad),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(validate_price(0).is_ok());
    }

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(4.8).is_ok());
        assert!(validate_rating(5.5).is_err());
        assert!(matches!(
            validate_rating(f64::NAN),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }
}
