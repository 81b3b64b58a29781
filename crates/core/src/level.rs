//! Level records - what a level loader hands in and what a saved random layout looks like
//!
//! Level definitions and saved layouts share one per-cell record,
//! [`TileRecord`], listed row-major (`row * width + column`).
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "levels": [
//!     { "width": 2, "height": 1,
//!       "cells": [ { "tile_type": "Occupied", "ingredient": 0 },
//!                  { "tile_type": "Occupied", "ingredient": 0 } ] },
//!     { "width": 4, "height": 4, "randomize": true, "ingredient_amount": 5 },
//!     { "width": 4, "height": 4, "make_valued": true, "valued_amount": 4 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{TileType, RANDOM_GRID_HEIGHT, RANDOM_GRID_WIDTH};

/// One cell of a level definition or saved layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TileRecord {
    #[serde(default)]
    pub tile_type: TileType,
    /// Catalog ingredient index of the bottom item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<u8>,
    /// Value of the bottom item, for valued layouts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
}

impl TileRecord {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn ingredient(index: u8) -> Self {
        Self {
            tile_type: TileType::Occupied,
            ingredient: Some(index),
            value: None,
        }
    }

    pub fn valued(value: u32) -> Self {
        Self {
            tile_type: TileType::Occupied,
            ingredient: None,
            value: Some(value),
        }
    }
}

/// How a level's grid gets built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// Cells placed exactly as listed
    Fixed,
    /// Two anchors plus random fillers on a 4x4 grid
    RandomIngredients,
    /// One tier-0 seed plus an increasing tier run on a 4x4 grid
    RandomValued,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub width: u8,
    pub height: u8,
    #[serde(default)]
    pub ingredient_amount: usize,
    #[serde(default)]
    pub valued_amount: usize,
    #[serde(default)]
    pub randomize: bool,
    #[serde(default)]
    pub make_valued: bool,
    /// Row-major cells, only read for fixed layouts
    #[serde(default)]
    pub cells: Vec<TileRecord>,
}

impl LevelDefinition {
    /// A fixed layout of `width x height` cells
    pub fn fixed(width: u8, height: u8, cells: Vec<TileRecord>) -> Self {
        Self {
            width,
            height,
            ingredient_amount: 0,
            valued_amount: 0,
            randomize: false,
            make_valued: false,
            cells,
        }
    }

    /// A randomized 4x4 ingredient layout with `amount` fillers
    pub fn random_ingredients(amount: usize) -> Self {
        Self {
            width: RANDOM_GRID_WIDTH,
            height: RANDOM_GRID_HEIGHT,
            ingredient_amount: amount,
            valued_amount: 0,
            randomize: true,
            make_valued: false,
            cells: Vec::new(),
        }
    }

    /// A randomized 4x4 valued layout with `amount` fillers
    pub fn random_valued(amount: usize) -> Self {
        Self {
            width: RANDOM_GRID_WIDTH,
            height: RANDOM_GRID_HEIGHT,
            ingredient_amount: 0,
            valued_amount: amount,
            randomize: true,
            make_valued: true,
            cells: Vec::new(),
        }
    }

    /// Valued levels are always randomized; otherwise `randomize` decides.
    pub fn layout_kind(&self) -> LayoutKind {
        if self.make_valued {
            LayoutKind::RandomValued
        } else if self.randomize {
            LayoutKind::RandomIngredients
        } else {
            LayoutKind::Fixed
        }
    }

    pub fn expected_cells(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Ordered list of levels, indexed by level number
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelContainer {
    pub levels: Vec<LevelDefinition>,
}

impl LevelContainer {
    pub fn new(levels: Vec<LevelDefinition>) -> Self {
        Self { levels }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level(&self, index: usize) -> Result<&LevelDefinition, CoreError> {
        self.levels.get(index).ok_or(CoreError::UnknownLevel {
            index,
            len: self.levels.len(),
        })
    }
}

/// Snapshot of a randomized grid, replayable as a fixed level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedRandomLayout {
    pub width: u8,
    pub height: u8,
    pub cells: Vec<TileRecord>,
}

impl SavedRandomLayout {
    /// Fixed level definition reproducing this layout
    pub fn into_definition(self) -> LevelDefinition {
        LevelDefinition::fixed(self.width, self.height, self.cells)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.tile_type == TileType::Occupied)
            .count()
    }
}

/// Caller-owned collection saved layouts are appended to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomLayoutStore {
    pub layouts: Vec<SavedRandomLayout>,
}

impl RandomLayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, layout: SavedRandomLayout) {
        self.layouts.push(layout);
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    pub fn last(&self) -> Option<&SavedRandomLayout> {
        self.layouts.last()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Saved layouts as a level container, one fixed level each
    pub fn to_container(&self) -> LevelContainer {
        LevelContainer::new(
            self.layouts
                .iter()
                .cloned()
                .map(SavedRandomLayout::into_definition)
                .collect(),
        )
    }
}
