//! Grocery category taxonomy.
//!
//! # Responsibility
//! - Define the closed set of grocery categories.
//! - Map every category to exactly one default display emoji.
//!
//! # Invariants
//! - The taxonomy is closed: parsing never invents a category.
//! - `GroceryCategory::Other` is the universal fallback.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Closed grocery taxonomy. Serialized as snake_case ids (`nut_seed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroceryCategory {
    Produce,
    Dairy,
    Meat,
    Seafood,
    Bakery,
    Grain,
    Pasta,
    Pantry,
    Canned,
    Snack,
    Frozen,
    Beverage,
    Breakfast,
    Deli,
    Condiment,
    Baking,
    NutSeed,
    Household,
    PersonalCare,
    Baby,
    Pet,
    International,
    Alcohol,
    Other,
}

/// All categories in display order.
pub const CATEGORIES: [GroceryCategory; 24] = [
    GroceryCategory::Produce,
    GroceryCategory::Dairy,
    GroceryCategory::Meat,
    GroceryCategory::Seafood,
    GroceryCategory::Bakery,
    GroceryCategory::Grain,
    GroceryCategory::Pasta,
    GroceryCategory::Pantry,
    GroceryCategory::Canned,
    GroceryCategory::Snack,
    GroceryCategory::Frozen,
    GroceryCategory::Beverage,
    GroceryCategory::Breakfast,
    GroceryCategory::Deli,
    GroceryCategory::Condiment,
    GroceryCategory::Baking,
    GroceryCategory::NutSeed,
    GroceryCategory::Household,
    GroceryCategory::PersonalCare,
    GroceryCategory::Baby,
    GroceryCategory::Pet,
    GroceryCategory::International,
    GroceryCategory::Alcohol,
    GroceryCategory::Other,
];

impl GroceryCategory {
    /// Stable id used in storage, seed data and API payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Produce => "produce",
            Self::Dairy => "dairy",
            Self::Meat => "meat",
            Self::Seafood => "seafood",
            Self::Bakery => "bakery",
            Self::Grain => "grain",
            Self::Pasta => "pasta",
            Self::Pantry => "pantry",
            Self::Canned => "canned",
            Self::Snack => "snack",
            Self::Frozen => "frozen",
            Self::Beverage => "beverage",
            Self::Breakfast => "breakfast",
            Self::Deli => "deli",
            Self::Condiment => "condiment",
            Self::Baking => "baking",
            Self::NutSeed => "nut_seed",
            Self::Household => "household",
            Self::PersonalCare => "personal_care",
            Self::Baby => "baby",
            Self::Pet => "pet",
            Self::International => "international",
            Self::Alcohol => "alcohol",
            Self::Other => "other",
        }
    }

    /// Default display glyph for this category.
    pub fn default_emoji(self) -> &'static str {
        match self {
            Self::Produce => "🥬",
            Self::Dairy => "🥛",
            Self::Meat => "🥩",
            Self::Seafood => "🐟",
            Self::Bakery => "🍞",
            Self::Grain => "🌾",
            Self::Pasta => "🍝",
            Self::Pantry | Self::Canned => "🥫",
            Self::Snack => "🍿",
            Self::Frozen => "🧊",
            Self::Beverage => "🥤",
            Self::Breakfast => "🥣",
            Self::Deli => "🥪",
            Self::Condiment => "🫙",
            Self::Baking => "🧁",
            Self::NutSeed => "🥜",
            Self::Household => "🧻",
            Self::PersonalCare => "🧴",
            Self::Baby => "🍼",
            Self::Pet => "🐾",
            Self::International => "🍱",
            Self::Alcohol => "🍷",
            Self::Other => "🛒",
        }
    }

    /// Returns all taxonomy members.
    pub fn all() -> &'static [GroceryCategory] {
        &CATEGORIES
    }
}

impl Display for GroceryCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a taxonomy member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl Display for UnknownCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown grocery category: `{}`", self.0)
    }
}

impl Error for UnknownCategory {}

impl FromStr for GroceryCategory {
    type Err = UnknownCategory;

    /// Parses an exact taxonomy id. Ids are case-sensitive, as stored.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        CATEGORIES
            .iter()
            .copied()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| UnknownCategory(value.to_string()))
    }
}

/// Returns whether `value` names a taxonomy member.
pub fn is_grocery_category(value: &str) -> bool {
    value.parse::<GroceryCategory>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::{is_grocery_category, GroceryCategory, CATEGORIES};

    #[test]
    fn every_category_roundtrips_through_its_id() {
        for category in CATEGORIES {
            let parsed: GroceryCategory = category.as_str().parse().expect("id should parse");
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn serde_ids_match_storage_ids() {
        let json = serde_json::to_string(&GroceryCategory::PersonalCare).expect("serialize");
        assert_eq!(json, "\"personal_care\"");
        let parsed: GroceryCategory = serde_json::from_str("\"nut_seed\"").expect("deserialize");
        assert_eq!(parsed, GroceryCategory::NutSeed);
    }

    #[test]
    fn unknown_ids_are_rejected() {
        assert!(!is_grocery_category("vegetables"));
        assert!(!is_grocery_category("Produce"));
        assert!(!is_grocery_category(""));
        assert!(is_grocery_category("other"));
    }

    #[test]
    fn other_uses_cart_emoji() {
        assert_eq!(GroceryCategory::Other.default_emoji(), "🛒");
        assert_eq!(GroceryCategory::all().len(), 24);
    }
}
