//! # Cart Engine
//!
//! Cart lines, merging of identical selections, quantity rescaling and
//! derived totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action                 Cart Method            Line Change           │
//! │  ─────────                 ───────────            ───────────           │
//! │                                                                         │
//! │  "Add to cart" ──────────► add() ──────┬─ same key ──► qty+1, +unit    │
//! │                                        └─ new key ───► push(qty 1)     │
//! │                                                                         │
//! │  Stepper +/- ────────────► set_quantity() ─┬─ n ≤ 0 ──► remove line    │
//! │                                            └─ n > 0 ──► unit × n       │
//! │                                                                         │
//! │  Trash icon ─────────────► remove() ─────────────────► drop line       │
//! │                                                                         │
//! │  "Clear cart" ───────────► clear() ──────────────────► no lines        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Line Identity
//! Two selections are the same line when the item id matches and the
//! customization ids, sorted and joined with `,`, match. Order of the
//! choices and their display names do not matter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{CustomizationChoice, MenuItem};

/// Canonical key of a customization set.
///
/// ```rust
/// use bistro_core::cart::customization_key;
/// use bistro_core::CustomizationChoice;
///
/// let a = vec![
///     CustomizationChoice::new("no-onion", "No onion", 0),
///     CustomizationChoice::new("extra-cheese", "Extra cheese", 150),
/// ];
/// assert_eq!(customization_key(&a), "extra-cheese,no-onion");
/// assert_eq!(customization_key(&[]), "");
/// ```
pub fn customization_key(choices: &[CustomizationChoice]) -> String {
    let mut ids: Vec<&str> = choices.iter().map(|c| c.id.as_str()).collect();
    ids.sort_unstable();
    ids.join(",")
}

fn generate_line_id() -> String {
    format!("cart-{}", Uuid::new_v4())
}

// =============================================================================
// Cart Item
// =============================================================================

/// One cart entry: a chosen item, its customizations and quantity.
///
/// ## Invariant
/// `total_price = (menu_item.price + Σ customization cost) × quantity`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    pub id: String,
    /// Copy of the item as it was when first added.
    pub menu_item: MenuItem,
    pub quantity: i64,
    #[serde(default)]
    pub customizations: Vec<CustomizationChoice>,
    pub total_price: Money,
    #[serde(default)]
    pub special_instructions: Option<String>,
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    fn new(
        item: &MenuItem,
        unit: Money,
        customizations: Vec<CustomizationChoice>,
        special_instructions: Option<String>,
    ) -> Self {
        CartItem {
            id: generate_line_id(),
            menu_item: item.clone(),
            quantity: 1,
            customizations,
            total_price: unit,
            special_instructions,
            added_at: Utc::now(),
        }
    }

    /// Per-unit price recovered from the stored total.
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.total_price.per_unit(self.quantity)
    }

    /// Sum of the customization surcharges for one unit.
    pub fn customization_cost(&self) -> Money {
        self.customizations.iter().map(|c| c.additional_cost).sum()
    }

    fn matches(&self, item_id: &str, key: &str) -> bool {
        self.menu_item.id == item_id && customization_key(&self.customizations) == key
    }
}

/// Unit price of an item with the given customizations.
///
/// ## Errors
/// `Validation(Overflow)` when the surcharges push the price past `i64`.
pub fn unit_price_for(item: &MenuItem, customizations: &[CustomizationChoice]) -> CoreResult<Money> {
    customizations
        .iter()
        .try_fold(item.price, |acc, c| acc.checked_add(c.additional_cost))
        .ok_or_else(|| overflow("price"))
}

fn overflow(field: &str) -> CoreError {
    ValidationError::Overflow {
        field: field.to_string(),
    }
    .into()
}

/// What `set_quantity` did to the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// The line now has the requested quantity.
    Updated,
    /// The requested quantity was ≤ 0, so the line was removed.
    Removed,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by (item id, customization key)
/// - Every line has quantity ≥ 1
/// - The cart total and item count fit in an `i64`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Rebuilds a cart from a persisted snapshot.
    ///
    /// Lines with a quantity below 1 cannot come from the engine and are
    /// dropped, as are lines that would overflow the cart totals.
    pub fn from_lines(lines: Vec<CartItem>) -> Self {
        let mut cart = Cart::new();
        for line in lines.into_iter().filter(|l| l.quantity >= 1) {
            if cart.check_totals(None, line.quantity, line.total_price).is_ok() {
                cart.lines.push(line);
            }
        }
        cart
    }

    pub fn lines(&self) -> &[CartItem] {
        &self.lines
    }

    pub fn find_line(&self, line_id: &str) -> Option<&CartItem> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    /// Adds one unit of `item` with the given customizations.
    ///
    /// Merges into an existing line with the same item and customization set
    /// (quantity + 1, total + unit price). Otherwise appends a new line with
    /// quantity 1. Special instructions of a merged add are not applied.
    ///
    /// ## Returns
    /// The line that now holds the selection.
    ///
    /// ## Errors
    /// `Validation(Overflow)` when the price, line total or cart totals
    /// would not fit in an `i64`. The cart is left unchanged.
    pub fn add(
        &mut self,
        item: &MenuItem,
        customizations: Vec<CustomizationChoice>,
        special_instructions: Option<String>,
    ) -> CoreResult<&CartItem> {
        let key = customization_key(&customizations);
        let unit = unit_price_for(item, &customizations)?;

        if let Some(idx) = self.lines.iter().position(|l| l.matches(&item.id, &key)) {
            let line = &self.lines[idx];
            let quantity = line.quantity.checked_add(1).ok_or_else(|| overflow("quantity"))?;
            let total = line
                .total_price
                .checked_add(unit)
                .ok_or_else(|| overflow("line total"))?;
            self.check_totals(Some(idx), quantity, total)?;

            let line = &mut self.lines[idx];
            line.quantity = quantity;
            line.total_price = total;
            return Ok(&self.lines[idx]);
        }

        self.check_totals(None, 1, unit)?;
        self.lines
            .push(CartItem::new(item, unit, customizations, special_instructions));
        Ok(&self.lines[self.lines.len() - 1])
    }

    /// Removes a line by id.
    pub fn remove(&mut self, line_id: &str) -> CoreResult<CartItem> {
        let idx = self
            .lines
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))?;
        Ok(self.lines.remove(idx))
    }

    /// Sets a line's quantity, keeping its per-unit price.
    ///
    /// ## Behavior
    /// - `quantity ≤ 0`: removes the line
    /// - otherwise: `total = (total / old quantity) × quantity`
    pub fn set_quantity(&mut self, line_id: &str, quantity: i64) -> CoreResult<QuantityUpdate> {
        if quantity <= 0 {
            self.remove(line_id)?;
            return Ok(QuantityUpdate::Removed);
        }

        let idx = self
            .lines
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))?;

        let total = self.lines[idx]
            .unit_price()
            .checked_mul(quantity)
            .ok_or_else(|| overflow("line total"))?;
        self.check_totals(Some(idx), quantity, total)?;

        let line = &mut self.lines[idx];
        line.quantity = quantity;
        line.total_price = total;
        Ok(QuantityUpdate::Updated)
    }

    /// Checks that the cart totals stay representable once the line at
    /// `replacing` (or a new line, for `None`) holds `quantity` and `total`.
    fn check_totals(&self, replacing: Option<usize>, quantity: i64, total: Money) -> CoreResult<()> {
        let others = self
            .lines
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != replacing)
            .map(|(_, l)| l);

        let mut count = quantity;
        let mut sum = total;
        for line in others {
            count = count
                .checked_add(line.quantity)
                .ok_or_else(|| overflow("item count"))?;
            sum = sum
                .checked_add(line.total_price)
                .ok_or_else(|| overflow("cart total"))?;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of all line totals.
    pub fn total(&self) -> Money {
        self.lines.iter().map(|l| l.total_price).sum()
    }

    /// Sum of all line quantities.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Cart totals summary for the UI badge and checkout bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub item_count: i64,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.lines.len(),
            item_count: cart.item_count(),
            total: cart.total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_item(id: &str, price_cents: i64) -> MenuItem {
        MenuItem::new(id, format!("Item {}", id), "Main Course", Money::from_cents(price_cents))
    }

    fn extra(id: &str, cents: i64) -> CustomizationChoice {
        CustomizationChoice::new(id, id.replace('-', " "), cents)
    }

    #[test]
    fn test_add_same_selection_twice_merges() {
        let mut cart = Cart::new();
        let item = test_item("A", 1000);

        cart.add(&item, vec![extra("extra-sauce", 200)], None).unwrap();
        cart.add(&item, vec![extra("extra-sauce", 200)], None).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.lines()[0].total_price, Money::from_cents(2400));
    }

    #[test]
    fn test_customization_order_does_not_split_lines() {
        let mut cart = Cart::new();
        let item = test_item("A", 1000);

        cart.add(&item, vec![extra("a", 100), extra("b", 50)], None).unwrap();
        cart.add(&item, vec![extra("b", 50), extra("a", 100)], None).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total(), Money::from_cents(2300));
    }

    #[test]
    fn test_different_customizations_make_separate_lines() {
        let mut cart = Cart::new();
        let item = test_item("A", 1000);

        cart.add(&item, vec![], None).unwrap();
        cart.add(&item, vec![extra("extra-sauce", 200)], None).unwrap();

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.total(), Money::from_cents(2200));
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_merged_add_keeps_first_instructions() {
        let mut cart = Cart::new();
        let item = test_item("A", 1000);

        cart.add(&item, vec![], Some("no salt".to_string())).unwrap();
        let line = cart.add(&item, vec![], Some("extra salt".to_string())).unwrap();

        assert_eq!(line.special_instructions.as_deref(), Some("no salt"));
    }

    #[test]
    fn test_set_quantity_rescales_total() {
        let mut cart = Cart::new();
        let item = test_item("A", 1000);
        let id = cart.add(&item, vec![extra("x", 200)], None).unwrap().id.clone();

        let outcome = cart.set_quantity(&id, 5).unwrap();

        assert_eq!(outcome, QuantityUpdate::Updated);
        let line = cart.find_line(&id).unwrap();
        assert_eq!(line.quantity, 5);
        assert_eq!(line.total_price, Money::from_cents(6000));
        assert_eq!(line.unit_price(), Money::from_cents(1200));
    }

    #[test]
    fn test_set_quantity_zero_or_negative_removes() {
        let mut cart = Cart::new();
        let a = cart.add(&test_item("A", 1000), vec![], None).unwrap().id.clone();
        let b = cart.add(&test_item("B", 500), vec![], None).unwrap().id.clone();

        assert_eq!(cart.set_quantity(&a, 0).unwrap(), QuantityUpdate::Removed);
        assert_eq!(cart.set_quantity(&b, -3).unwrap(), QuantityUpdate::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unknown_line_is_an_error() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.remove("cart-missing"),
            Err(CoreError::LineNotFound(_))
        ));
        assert!(matches!(
            cart.set_quantity("cart-missing", 2),
            Err(CoreError::LineNotFound(_))
        ));
    }

    #[test]
    fn test_totals_track_lines() {
        let mut cart = Cart::new();
        cart.add(&test_item("A", 2899), vec![], None).unwrap();
        cart.add(&test_item("A", 2899), vec![], None).unwrap();
        let soup = cart.add(&test_item("B", 1499), vec![], None).unwrap().id.clone();
        cart.set_quantity(&soup, 3).unwrap();

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.item_count, 5);
        assert_eq!(totals.total, Money::from_cents(2899 * 2 + 1499 * 3));
        assert_eq!(
            totals.total,
            cart.lines().iter().map(|l| l.total_price).sum::<Money>()
        );
    }

    #[test]
    fn test_oversized_quantity_is_rejected() {
        let mut cart = Cart::new();
        let id = cart.add(&test_item("A", 1000), vec![], None).unwrap().id.clone();

        let result = cart.set_quantity(&id, i64::MAX / 10);

        assert!(matches!(
            result,
            Err(CoreError::Validation(ValidationError::Overflow { .. }))
        ));
        let line = cart.find_line(&id).unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.total_price, Money::from_cents(1000));
    }

    #[test]
    fn test_oversized_surcharge_is_rejected() {
        let mut cart = Cart::new();
        let item = test_item("A", 1000);

        let result = cart.add(&item, vec![extra("gold-leaf", i64::MAX)], None);

        assert!(matches!(
            result,
            Err(CoreError::Validation(ValidationError::Overflow { .. }))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_total_cannot_overflow() {
        let mut cart = Cart::new();
        let a = cart.add(&test_item("A", 1000), vec![], None).unwrap().id.clone();
        cart.set_quantity(&a, i64::MAX / 1000).unwrap();

        let result = cart.add(&test_item("B", 1000), vec![], None);

        assert!(result.is_err());
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total(), Money::from_cents(i64::MAX / 1000 * 1000));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&test_item("A", 1000), vec![], None).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_from_lines_drops_empty_quantities() {
        let mut cart = Cart::new();
        cart.add(&test_item("A", 1000), vec![], None).unwrap();
        let mut lines = cart.lines().to_vec();
        let mut broken = lines[0].clone();
        broken.id = "cart-broken".to_string();
        broken.quantity = 0;
        lines.push(broken);

        let restored = Cart::from_lines(lines);
        assert_eq!(restored.lines().len(), 1);
    }
}
