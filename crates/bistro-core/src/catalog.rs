//! # Catalog: Search, Filter and Menu Utilities
//!
//! Every function here is a pure recomputation over the loaded menu. Nothing
//! is cached; callers rerun them whenever the menu or the filter changes.
//!
//! ## Filter Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  menu items                                                             │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  text query ── blank? ─► pass all                                       │
//! │      │         else ───► lowercase substring of name, description,     │
//! │      │                   any tag, or category                           │
//! │      ▼                                                                  │
//! │  category ──── None / "all"? ─► pass all, else exact match             │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  dietary ───── All? ─► pass all, else exact match                      │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  filtered items (menu order preserved)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{DietaryType, MenuItem, NutritionalInfo};

/// Category selector value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Maximum entries returned by [`popular_items`].
pub const POPULAR_LIMIT: usize = 6;

/// Rating at or above which an item counts as popular without sales.
pub const POPULAR_MIN_RATING: f64 = 4.5;

/// Maximum entries returned by [`recommendations`] for a specific item.
pub const RELATED_LIMIT: usize = 4;

/// Maximum entries returned by [`recommendations`] with no item.
pub const GENERAL_LIMIT: usize = 6;

/// Rating threshold for general recommendations.
pub const GENERAL_MIN_RATING: f64 = 4.3;

// =============================================================================
// Filter Types
// =============================================================================

/// Dietary selector of the menu filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DietaryFilter {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "veg")]
    Veg,
    #[serde(rename = "non-veg")]
    NonVeg,
    #[serde(rename = "vegan")]
    Vegan,
}

impl DietaryFilter {
    pub fn accepts(&self, dietary: DietaryType) -> bool {
        match self {
            DietaryFilter::All => true,
            DietaryFilter::Veg => dietary == DietaryType::Veg,
            DietaryFilter::NonVeg => dietary == DietaryType::NonVeg,
            DietaryFilter::Vegan => dietary == DietaryType::Vegan,
        }
    }
}

impl FromStr for DietaryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL_CATEGORIES) {
            return Ok(DietaryFilter::All);
        }
        Ok(match s.parse::<DietaryType>()? {
            DietaryType::Veg => DietaryFilter::Veg,
            DietaryType::NonVeg => DietaryFilter::NonVeg,
            DietaryType::Vegan => DietaryFilter::Vegan,
        })
    }
}

/// Current search/filter inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuFilter {
    pub query: String,
    /// `None` or `"all"` disables the category filter.
    pub category: Option<String>,
    pub dietary: DietaryFilter,
}

impl MenuFilter {
    pub fn with_query(query: impl Into<String>) -> Self {
        MenuFilter {
            query: query.into(),
            ..MenuFilter::default()
        }
    }

    /// Returns true when `item` passes every active selector.
    pub fn matches(&self, item: &MenuItem) -> bool {
        // A blank query disables search; any other query matches verbatim.
        if !self.query.trim().is_empty() && !matches_query(item, &self.query.to_lowercase()) {
            return false;
        }

        if let Some(category) = self.active_category() {
            if item.category != category {
                return false;
            }
        }

        self.dietary.accepts(item.dietary_type)
    }

    fn active_category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| *c != ALL_CATEGORIES)
    }
}

/// Case-insensitive substring match. `needle` must already be lowercase.
fn matches_query(item: &MenuItem, needle: &str) -> bool {
    item.name.to_lowercase().contains(needle)
        || item.description.to_lowercase().contains(needle)
        || item.tags.iter().any(|t| t.to_lowercase().contains(needle))
        || item.category.to_lowercase().contains(needle)
}

// =============================================================================
// Derived Views
// =============================================================================

/// Items passing `filter`, in menu order.
pub fn filter_items<'a>(items: &'a [MenuItem], filter: &MenuFilter) -> Vec<&'a MenuItem> {
    items.iter().filter(|item| filter.matches(item)).collect()
}

/// Distinct categories in first-seen order.
pub fn categories(items: &[MenuItem]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for item in items {
        if !seen.iter().any(|c| *c == item.category) {
            seen.push(item.category.clone());
        }
    }
    seen
}

pub fn items_by_category<'a>(items: &'a [MenuItem], category: &str) -> Vec<&'a MenuItem> {
    items.iter().filter(|i| i.category == category).collect()
}

pub fn find_item<'a>(items: &'a [MenuItem], item_id: &str) -> Option<&'a MenuItem> {
    items.iter().find(|i| i.id == item_id)
}

/// Featured or popular-flagged items.
pub fn featured_items(items: &[MenuItem]) -> Vec<&MenuItem> {
    items
        .iter()
        .filter(|i| i.is_featured || i.is_popular)
        .collect()
}

/// Best sellers.
///
/// An item qualifies with any sales or a rating of at least 4.5. Qualifying
/// items are ordered by sales count, highest first (ties keep menu order),
/// and the first six are returned.
pub fn popular_items(items: &[MenuItem]) -> Vec<&MenuItem> {
    let mut popular: Vec<&MenuItem> = items
        .iter()
        .filter(|i| i.sales_count > 0 || i.average_rating >= POPULAR_MIN_RATING)
        .collect();
    popular.sort_by(|a, b| b.sales_count.cmp(&a.sales_count));
    popular.truncate(POPULAR_LIMIT);
    popular
}

/// Suggestions for an item detail page, or general suggestions.
///
/// ## With an item
/// Other items sharing its category or a tag, best rated first, up to four.
/// An unknown id falls through to the general list.
///
/// ## Without an item
/// Items rated at least 4.3, ranked by `0.7 × rating + 0.3 × sales`, up to
/// six.
pub fn recommendations<'a>(items: &'a [MenuItem], item_id: Option<&str>) -> Vec<&'a MenuItem> {
    if let Some(current) = item_id.and_then(|id| find_item(items, id)) {
        let mut related: Vec<&MenuItem> = items
            .iter()
            .filter(|i| {
                i.id != current.id
                    && (i.category == current.category || i.shares_tag_with(current))
            })
            .collect();
        related.sort_by(|a, b| desc(a.average_rating, b.average_rating));
        related.truncate(RELATED_LIMIT);
        return related;
    }

    let mut general: Vec<&MenuItem> = items
        .iter()
        .filter(|i| i.average_rating >= GENERAL_MIN_RATING)
        .collect();
    general.sort_by(|a, b| desc(score(a), score(b)));
    general.truncate(GENERAL_LIMIT);
    general
}

fn score(item: &MenuItem) -> f64 {
    item.average_rating * 0.7 + f64::from(item.sales_count) * 0.3
}

fn desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

pub fn nutritional_info(items: &[MenuItem], item_id: &str) -> Option<NutritionalInfo> {
    find_item(items, item_id).and_then(|i| i.nutritional_info)
}

/// Unknown items count as unavailable.
pub fn is_available(items: &[MenuItem], item_id: &str) -> bool {
    find_item(items, item_id).is_some_and(|i| i.is_available)
}

// =============================================================================
// Unit Tests
// =============================================================================
