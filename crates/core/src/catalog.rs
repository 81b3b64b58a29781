//! Item catalog - the table every placeable item is created from
//!
//! The catalog holds two explicit tables:
//!
//! - **Ingredients**: ordered names, index 0 is always the anchor ("bread").
//!   Every other index is a filler ingredient.
//! - **Tiers**: the valued ladder. Tier `k` is worth `2 << k` (2, 4, 8, ...),
//!   so merging two items of tier `k` yields exactly tier `k + 1`.
//!
//! Both tables are validated when the catalog is built. Lookups by index or
//! value go through the tables and fail with a [`CoreError`] instead of
//! indexing out of range.

use crate::error::CoreError;
use crate::types::{ItemKind, ANCHOR_INGREDIENT, BASE_TIER_VALUE};

/// Ingredients of [`ItemCatalog::standard`], anchor first
pub const STANDARD_INGREDIENTS: [&str; 7] =
    ["bread", "cheese", "tomato", "lettuce", "bacon", "egg", "ham"];

/// Tiers of [`ItemCatalog::standard`] (values 2 ..= 65536)
pub const STANDARD_TIER_COUNT: usize = 16;

/// Ingredient indices are `u8`, anchor included
pub const MAX_INGREDIENT_COUNT: usize = u8::MAX as usize + 1;

/// Largest tier count whose values still fit in a `u32`
pub const MAX_TIER_COUNT: usize = 31;

/// One placeable unit. Immutable once created by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Item {
    kind: ItemKind,
    value: u32,
}

impl Item {
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Numeric value, only meaningful for valued items (0 otherwise)
    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn is_ingredient(&self) -> bool {
        self.kind.is_ingredient()
    }

    pub fn is_anchor(&self) -> bool {
        self.kind.is_anchor()
    }

    /// Tier index for valued items
    pub fn tier(&self) -> Option<u8> {
        match self.kind {
            ItemKind::Valued(tier) => Some(tier),
            _ => None,
        }
    }

    /// Catalog ingredient index for anchors and ingredients
    pub fn ingredient_index(&self) -> Option<u8> {
        match self.kind {
            ItemKind::Anchor => Some(ANCHOR_INGREDIENT),
            ItemKind::Ingredient(index) => Some(index),
            ItemKind::Valued(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCatalog {
    ingredients: Vec<String>,
    tiers: Vec<u32>,
}

impl ItemCatalog {
    /// Build a catalog from explicit tables.
    ///
    /// `tier_values[k]` must equal `2 << k`.
    pub fn new(ingredients: Vec<String>, tier_values: Vec<u32>) -> Result<Self, CoreError> {
        if ingredients.is_empty() {
            return Err(CoreError::EmptyIngredientTable);
        }
        if ingredients.len() > MAX_INGREDIENT_COUNT {
            return Err(CoreError::TooManyIngredients {
                count: ingredients.len(),
                max: MAX_INGREDIENT_COUNT,
            });
        }
        if tier_values.len() > MAX_TIER_COUNT {
            return Err(CoreError::TooManyTiers {
                count: tier_values.len(),
                max: MAX_TIER_COUNT,
            });
        }
        for (tier, &actual) in tier_values.iter().enumerate() {
            let expected = BASE_TIER_VALUE << tier;
            if actual != expected {
                return Err(CoreError::BrokenTierLadder {
                    tier: tier as u8,
                    expected,
                    actual,
                });
            }
        }

        Ok(Self {
            ingredients,
            tiers: tier_values,
        })
    }

    /// Build a catalog with the given ingredient names and a `tier_count` long ladder
    pub fn with_ladder<S: Into<String>>(
        ingredients: impl IntoIterator<Item = S>,
        tier_count: usize,
    ) -> Result<Self, CoreError> {
        if tier_count > MAX_TIER_COUNT {
            return Err(CoreError::TooManyTiers {
                count: tier_count,
                max: MAX_TIER_COUNT,
            });
        }
        let tiers = (0..tier_count).map(|k| BASE_TIER_VALUE << k).collect();
        Self::new(ingredients.into_iter().map(Into::into).collect(), tiers)
    }

    /// Bread plus six fillers, sixteen tiers
    pub fn standard() -> Self {
        Self {
            ingredients: STANDARD_INGREDIENTS.iter().map(|s| s.to_string()).collect(),
            tiers: (0..STANDARD_TIER_COUNT)
                .map(|k| BASE_TIER_VALUE << k)
                .collect(),
        }
    }

    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }

    /// Number of ingredients that are not the anchor
    pub fn filler_count(&self) -> usize {
        self.ingredients.len() - 1
    }

    pub fn tier_count(&self) -> usize {
        self.tiers.len()
    }

    /// Highest defined tier, `None` when the ladder is empty
    pub fn max_tier(&self) -> Option<u8> {
        self.tiers.len().checked_sub(1).map(|t| t as u8)
    }

    pub fn ingredient_name(&self, index: u8) -> Option<&str> {
        self.ingredients.get(index as usize).map(String::as_str)
    }

    pub fn anchor(&self) -> Item {
        Item {
            kind: ItemKind::Anchor,
            value: 0,
        }
    }

    /// Item for a catalog ingredient index. Index 0 is the anchor.
    pub fn ingredient(&self, index: u8) -> Result<Item, CoreError> {
        if index as usize >= self.ingredients.len() {
            return Err(CoreError::UnknownIngredient {
                index,
                len: self.ingredients.len(),
            });
        }
        if index == ANCHOR_INGREDIENT {
            return Ok(self.anchor());
        }
        Ok(Item {
            kind: ItemKind::Ingredient(index),
            value: 0,
        })
    }

    /// Valued item for a tier index
    pub fn valued(&self, tier: usize) -> Result<Item, CoreError> {
        let value = *self.tiers.get(tier).ok_or(CoreError::UnknownTier {
            tier,
            len: self.tiers.len(),
        })?;
        Ok(Item {
            kind: ItemKind::Valued(tier as u8),
            value,
        })
    }

    pub fn tier_value(&self, tier: u8) -> Option<u32> {
        self.tiers.get(tier as usize).copied()
    }

    /// Tier whose value is exactly `value`
    pub fn tier_for_value(&self, value: u32) -> Option<u8> {
        self.tiers.iter().position(|&v| v == value).map(|t| t as u8)
    }

    /// Valued item carrying exactly `value`
    pub fn valued_by_value(&self, value: u32) -> Result<Item, CoreError> {
        let tier = self
            .tier_for_value(value)
            .ok_or(CoreError::UnknownValue { value })?;
        self.valued(tier as usize)
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
