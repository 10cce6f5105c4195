//! # Domain Types
//!
//! Core domain types shared by the session state, the menu database and the
//! UI layer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │   Restaurant    │   │    MenuItem     │   │ CustomizationChoice │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id             │◄──│  restaurant_id  │   │  id                 │   │
//! │  │  name, theme    │   │  price (Money)  │   │  name               │   │
//! │  │  colors         │   │  dietary_type   │   │  additional_cost    │   │
//! │  └─────────────────┘   │  model_path     │   └─────────────────────┘   │
//! │                        │  tags, flags    │                              │
//! │  ┌─────────────────┐   └─────────────────┘   ┌─────────────────────┐   │
//! │  │  DietaryType    │                         │  NutritionalInfo    │   │
//! │  │  veg | non-veg  │                         │  calories, macros   │   │
//! │  │  vegan          │                         └─────────────────────┘   │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Menu items are immutable once loaded. A refresh replaces the whole list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::DEFAULT_RESTAURANT_ID;

// =============================================================================
// Dietary Type
// =============================================================================

/// Dietary classification of a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum DietaryType {
    #[default]
    #[serde(rename = "veg")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "veg"))]
    Veg,

    #[serde(rename = "non-veg")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "non-veg"))]
    NonVeg,

    #[serde(rename = "vegan")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "vegan"))]
    Vegan,
}

impl DietaryType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DietaryType::Veg => "veg",
            DietaryType::NonVeg => "non-veg",
            DietaryType::Vegan => "vegan",
        }
    }
}

impl fmt::Display for DietaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DietaryType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "veg" | "vegetarian" => Ok(DietaryType::Veg),
            "non-veg" | "nonveg" | "non_veg" => Ok(DietaryType::NonVeg),
            "vegan" => Ok(DietaryType::Vegan),
            other => Err(ValidationError::InvalidFormat {
                field: "dietary_type".to_string(),
                reason: format!("unknown dietary type '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Spice Level
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SpiceLevel {
    Mild,
    Medium,
    Hot,
}

impl SpiceLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SpiceLevel::Mild => "mild",
            SpiceLevel::Medium => "medium",
            SpiceLevel::Hot => "hot",
        }
    }
}

impl fmt::Display for SpiceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpiceLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mild" => Ok(SpiceLevel::Mild),
            "medium" => Ok(SpiceLevel::Medium),
            "hot" => Ok(SpiceLevel::Hot),
            other => Err(ValidationError::InvalidFormat {
                field: "spice_level".to_string(),
                reason: format!("unknown spice level '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Nutritional Info
// =============================================================================

/// Nutritional facts per serving. Macros are in grams.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NutritionalInfo {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    #[serde(default)]
    pub fiber: u32,
    #[serde(default)]
    pub sugar: u32,
}

// =============================================================================
// Restaurant
// =============================================================================

/// The establishment whose menu is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub theme: String,
    pub primary_color: String,
    pub secondary_color: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Restaurant {
    /// The demo establishment used when no backend profile exists.
    pub fn demo() -> Self {
        let now = Utc::now();
        Restaurant {
            id: DEFAULT_RESTAURANT_ID.to_string(),
            name: "Matchis Restaurant".to_string(),
            theme: crate::DEFAULT_THEME.to_string(),
            primary_color: "#1E40AF".to_string(),
            secondary_color: "#059669".to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

// =============================================================================
// Menu Item
// =============================================================================

/// A dish on the menu.
///
/// Cart lines keep a full copy of the item as it was when added, so this
/// type is also what the cart snapshot in local storage contains. Every
/// optional or counter field therefore has a serde default to keep older
/// snapshots readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItem {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    pub category: String,
    #[serde(default)]
    pub dietary_type: DietaryType,
    #[serde(default)]
    pub nutritional_info: Option<NutritionalInfo>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_spicy: bool,
    #[serde(default)]
    pub spice_level: Option<SpiceLevel>,
    /// Preparation time in minutes.
    #[serde(default)]
    pub prep_time: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub has_3d_model: bool,
    #[serde(default)]
    pub ar_enabled: bool,
    /// Path or URL of the `.glb` model.
    #[serde(default)]
    pub model_path: Option<String>,
    #[serde(default)]
    pub sales_count: u32,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl MenuItem {
    /// Creates an available item with every optional field empty.
    ///
    /// ```rust
    /// use bistro_core::{MenuItem, Money};
    ///
    /// let item = MenuItem::new("7", "Garlic Bread", "Starters", Money::from_cents(699));
    /// assert!(item.is_available);
    /// assert!(item.tags.is_empty());
    /// ```
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
    ) -> Self {
        let now = Utc::now();
        MenuItem {
            id: id.into(),
            restaurant_id: DEFAULT_RESTAURANT_ID.to_string(),
            name: name.into(),
            description: String::new(),
            price,
            category: category.into(),
            dietary_type: DietaryType::default(),
            nutritional_info: None,
            image_url: None,
            image: None,
            is_available: true,
            is_featured: false,
            is_popular: false,
            is_new: false,
            is_spicy: false,
            spice_level: None,
            prep_time: None,
            tags: Vec::new(),
            allergens: Vec::new(),
            has_3d_model: false,
            ar_enabled: false,
            model_path: None,
            sales_count: 0,
            average_rating: 0.0,
            review_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Image used as a thumbnail: `image_url`, then `image`, else empty.
    pub fn thumbnail_url(&self) -> &str {
        self.image_url
            .as_deref()
            .or(self.image.as_deref())
            .unwrap_or("")
    }

    /// Returns true when the item shares at least one tag with `other`.
    pub fn shares_tag_with(&self, other: &MenuItem) -> bool {
        self.tags.iter().any(|tag| other.tags.contains(tag))
    }
}

// =============================================================================
// Customization Choice
// =============================================================================

/// A named optional modification carrying an additional cost.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomizationChoice {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub additional_cost: Money,
}

impl CustomizationChoice {
    pub fn new(id: impl Into<String>, name: impl Into<String>, additional_cost_cents: i64) -> Self {
        CustomizationChoice {
            id: id.into(),
            name: name.into(),
            additional_cost: Money::from_cents(additional_cost_cents),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
