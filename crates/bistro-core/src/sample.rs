//! Built-in demo catalog.
//!
//! Served by the sample menu source and loaded into fresh databases by the
//! `seed` binary.

use crate::money::Money;
use crate::types::{DietaryType, MenuItem, NutritionalInfo, Restaurant, SpiceLevel};

/// The demo establishment.
pub fn restaurant() -> Restaurant {
    Restaurant::demo()
}

struct Dish {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price_cents: i64,
    photo: &'static str,
    category: &'static str,
    dietary: DietaryType,
    nutrition: [u32; 6],
    featured: bool,
    popular: bool,
    new: bool,
    spicy: bool,
    spice: SpiceLevel,
    prep_time: u32,
    tags: &'static [&'static str],
    allergens: &'static [&'static str],
    model: &'static str,
    sales: u32,
    rating: f64,
    reviews: u32,
}

const DISHES: &[Dish] = &[
    Dish {
        id: "1",
        name: "Truffle Pasta",
        description: "Handmade pasta with truffle oil, parmesan, and fresh herbs. A signature dish crafted with premium black truffles.",
        price_cents: 2899,
        photo: "https://images.pexels.com/photos/1279330/pexels-photo-1279330.jpeg",
        category: "Main Course",
        dietary: DietaryType::Veg,
        nutrition: [650, 18, 75, 28, 4, 8],
        featured: true,
        popular: true,
        new: false,
        spicy: false,
        spice: SpiceLevel::Mild,
        prep_time: 25,
        tags: &["truffle", "pasta", "premium", "signature"],
        allergens: &["gluten", "dairy"],
        model: "/models/truffle-pasta.glb",
        sales: 156,
        rating: 4.8,
        reviews: 89,
    },
    Dish {
        id: "2",
        name: "Grilled Salmon",
        description: "Atlantic salmon with lemon herb butter and seasonal vegetables. Fresh, sustainably sourced fish grilled to perfection.",
        price_cents: 3299,
        photo: "https://images.pexels.com/photos/3563625/pexels-photo-3563625.jpeg",
        category: "Main Course",
        dietary: DietaryType::NonVeg,
        nutrition: [520, 45, 12, 32, 6, 5],
        featured: true,
        popular: false,
        new: false,
        spicy: false,
        spice: SpiceLevel::Mild,
        prep_time: 20,
        tags: &["salmon", "grilled", "healthy", "omega-3"],
        allergens: &["fish"],
        model: "/models/grilled-salmon.glb",
        sales: 134,
        rating: 4.7,
        reviews: 76,
    },
    Dish {
        id: "3",
        name: "Chocolate Soufflé",
        description: "Decadent dark chocolate soufflé with vanilla ice cream. Made with Belgian chocolate and served warm.",
        price_cents: 1499,
        photo: "https://images.pexels.com/photos/5945757/pexels-photo-5945757.jpeg",
        category: "Dessert",
        dietary: DietaryType::Veg,
        nutrition: [420, 8, 52, 18, 3, 45],
        featured: false,
        popular: false,
        new: true,
        spicy: false,
        spice: SpiceLevel::Mild,
        prep_time: 30,
        tags: &["chocolate", "dessert", "premium", "belgian"],
        allergens: &["dairy", "eggs"],
        model: "/models/chocolate-souffle.glb",
        sales: 98,
        rating: 4.9,
        reviews: 52,
    },
    Dish {
        id: "4",
        name: "Spicy Thai Curry",
        description: "Authentic red curry with coconut milk, vegetables, and jasmine rice. Made with traditional Thai spices.",
        price_cents: 2499,
        photo: "https://images.pexels.com/photos/2474661/pexels-photo-2474661.jpeg",
        category: "Main Course",
        dietary: DietaryType::Vegan,
        nutrition: [580, 15, 65, 25, 8, 12],
        featured: false,
        popular: false,
        new: false,
        spicy: true,
        spice: SpiceLevel::Hot,
        prep_time: 18,
        tags: &["thai", "curry", "vegan", "spicy"],
        allergens: &["coconut"],
        model: "/models/thai-curry.glb",
        sales: 87,
        rating: 4.6,
        reviews: 43,
    },
    Dish {
        id: "5",
        name: "Classic Cheeseburger",
        description: "Juicy beef patty with aged cheddar, lettuce, tomato, and our signature sauce on a brioche bun.",
        price_cents: 1699,
        photo: "https://images.pexels.com/photos/1639557/pexels-photo-1639557.jpeg",
        category: "Burgers",
        dietary: DietaryType::NonVeg,
        nutrition: [720, 35, 45, 42, 3, 8],
        featured: true,
        popular: true,
        new: false,
        spicy: false,
        spice: SpiceLevel::Mild,
        prep_time: 15,
        tags: &["burger", "beef", "cheese", "classic"],
        allergens: &["gluten", "dairy"],
        model: "/models/cheeseburger.glb",
        sales: 245,
        rating: 4.5,
        reviews: 128,
    },
    Dish {
        id: "6",
        name: "Margherita Pizza",
        description: "Traditional Italian pizza with fresh mozzarella, basil, and san marzano tomatoes on thin crust.",
        price_cents: 1999,
        photo: "https://images.pexels.com/photos/315755/pexels-photo-315755.jpeg",
        category: "Pizza",
        dietary: DietaryType::Veg,
        nutrition: [680, 28, 85, 24, 4, 12],
        featured: true,
        popular: false,
        new: false,
        spicy: false,
        spice: SpiceLevel::Mild,
        prep_time: 12,
        tags: &["pizza", "italian", "margherita", "mozzarella"],
        allergens: &["gluten", "dairy"],
        model: "/models/margherita-pizza.glb",
        sales: 189,
        rating: 4.7,
        reviews: 94,
    },
];

impl Dish {
    fn to_menu_item(&self) -> MenuItem {
        let [calories, protein, carbs, fat, fiber, sugar] = self.nutrition;
        let mut item = MenuItem::new(self.id, self.name, self.category, Money::from_cents(self.price_cents));
        item.description = self.description.to_string();
        item.dietary_type = self.dietary;
        item.nutritional_info = Some(NutritionalInfo {
            calories,
            protein,
            carbs,
            fat,
            fiber,
            sugar,
        });
        item.image_url = Some(self.photo.to_string());
        item.image = Some(self.photo.to_string());
        item.is_featured = self.featured;
        item.is_popular = self.popular;
        item.is_new = self.new;
        item.is_spicy = self.spicy;
        item.spice_level = Some(self.spice);
        item.prep_time = Some(self.prep_time);
        item.tags = self.tags.iter().map(|t| t.to_string()).collect();
        item.allergens = self.allergens.iter().map(|a| a.to_string()).collect();
        item.has_3d_model = true;
        item.ar_enabled = true;
        item.model_path = Some(self.model.to_string());
        item.sales_count = self.sales;
        item.average_rating = self.rating;
        item.review_count = self.reviews;
        item
    }
}

/// The six demo dishes, in menu order.
pub fn menu_items() -> Vec<MenuItem> {
    DISHES.iter().map(Dish::to_menu_item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_menu_item;

    #[test]
    fn test_sample_catalog_is_valid() {
        let items = menu_items();
        assert_eq!(items.len(), 6);
        for item in &items {
            validate_menu_item(item).unwrap();
            assert_eq!(item.restaurant_id, restaurant().id);
        }
    }

    #[test]
    fn test_sample_ids_are_unique() {
        let items = menu_items();
        let mut ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), items.len());
    }
}
