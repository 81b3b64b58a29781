//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic, making them usable in any
//! context (generation, merging, rendering collaborators, saved layouts).
//!
//! # Coordinates
//!
//! Every grid position is a [`Coord`] of `(row, column)`, both 0-based.
//! Rows grow downwards, columns grow to the right. Nothing in the workspace
//! indexes a grid as `(column, row)`.
//!
//! # Randomized grid constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `RANDOM_GRID_WIDTH` | 4 | Columns of a randomized layout |
//! | `RANDOM_GRID_HEIGHT` | 4 | Rows of a randomized layout |
//! | `ANCHOR_INGREDIENT` | 0 | Catalog index of the anchor ("bread") |
//! | `BASE_TIER_VALUE` | 2 | Value of the tier-0 valued item |
//!
//! # Examples
//!
//! ```
//! use sandwich_stack_types::{Coord, Direction};
//!
//! let c = Coord::new(0, 3);
//! assert_eq!(c.step(Direction::Down, 4, 4), Some(Coord::new(1, 3)));
//! assert_eq!(c.step(Direction::Right, 4, 4), None);
//! ```

use serde::{Deserialize, Serialize};

/// Columns of a randomized layout
pub const RANDOM_GRID_WIDTH: u8 = 4;

/// Rows of a randomized layout
pub const RANDOM_GRID_HEIGHT: u8 = 4;

/// Catalog index reserved for the anchor ingredient
pub const ANCHOR_INGREDIENT: u8 = 0;

/// Value carried by the lowest valued tier. Tier `k` is worth `BASE_TIER_VALUE << k`.
pub const BASE_TIER_VALUE: u32 = 2;

/// A grid position, `(row, column)`, both 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: u8,
    pub column: u8,
}

impl Coord {
    pub const fn new(row: u8, column: u8) -> Self {
        Self { row, column }
    }

    /// Move one cell in `dir`, staying inside a `width x height` grid.
    ///
    /// Returns `None` when the step would leave the grid.
    pub fn step(self, dir: Direction, width: u8, height: u8) -> Option<Coord> {
        let (dr, dc) = dir.offset();
        let row = self.row as i16 + dr as i16;
        let column = self.column as i16 + dc as i16;
        if row < 0 || column < 0 || row >= height as i16 || column >= width as i16 {
            return None;
        }
        Some(Coord::new(row as u8, column as u8))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Orthogonal directions, in the order neighbour queries report them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions: up, down, left, right
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(row, column)` delta for one step
    pub fn offset(self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Classification of a tile
///
/// - **Empty**: nothing stacked on the tile
/// - **Occupied**: at least one item on the tile
///
/// Level files written by older tools call the occupied state `Ingredient`;
/// both spellings deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileType {
    #[default]
    Empty,
    #[serde(alias = "Ingredient")]
    Occupied,
}

/// What an item is
///
/// - **Anchor**: a "bread slice", one end of a finished sandwich
/// - **Ingredient**: a filler ingredient, by catalog index (never the anchor index)
/// - **Valued**: a tier on the doubling ladder, by tier index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum ItemKind {
    Anchor,
    Ingredient(u8),
    Valued(u8),
}

impl ItemKind {
    /// Anchors and ingredients are "ingredients"; valued tiers are not.
    pub fn is_ingredient(&self) -> bool {
        !matches!(self, ItemKind::Valued(_))
    }

    pub fn is_anchor(&self) -> bool {
        matches!(self, ItemKind::Anchor)
    }
}
