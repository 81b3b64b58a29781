//! Core data model - pure, deterministic, and testable
//!
//! This crate holds the data every other part of the puzzle works on. It has
//! **zero dependencies** on rendering, animation, input or storage:
//!
//! - **Deterministic**: randomness is injected, the same seed gives the same layouts
//! - **Validated**: catalog tables and level records are checked before use
//! - **Portable**: usable from a game client, a headless runner or tests
//!
//! # Module Structure
//!
//! - [`catalog`]: item variants (anchor, ingredients, valued tier ladder) and [`Item`]
//! - [`tile`]: one grid cell and its bottom-to-top item stack
//! - [`grid`]: `width x height` tiles, neighbour and connectivity queries
//! - [`level`]: level definitions, level containers and saved random layouts
//! - [`snapshot`]: serializable view of a grid for renderers
//! - [`rng`]: injectable random sources
//! - [`error`]: the shared error type
//!
//! # Example
//!
//! ```
//! use sandwich_stack_core::{Grid, ItemCatalog};
//! use sandwich_stack_core::types::Coord;
//!
//! let catalog = ItemCatalog::standard();
//! let mut grid = Grid::new(4, 4);
//! grid.place(Coord::new(0, 0), catalog.anchor()).unwrap();
//! grid.place(Coord::new(0, 1), catalog.ingredient(2).unwrap()).unwrap();
//!
//! grid.transfer_stack(Coord::new(0, 1), Coord::new(0, 0)).unwrap();
//! assert_eq!(grid.occupied_coords(), vec![Coord::new(0, 0)]);
//! ```

pub mod catalog;
pub mod error;
pub mod grid;
pub mod level;
pub mod rng;
pub mod snapshot;
pub mod tile;

pub use sandwich_stack_types as types;

// Re-export commonly used types for convenience
pub use catalog::{Item, ItemCatalog};
pub use error::{CoreError, ErrorKind};
pub use grid::Grid;
pub use level::{
    LayoutKind, LevelContainer, LevelDefinition, RandomLayoutStore, SavedRandomLayout, TileRecord,
};
pub use rng::{RandomSource, SequenceRng, SimpleRng};
pub use snapshot::{GridSnapshot, ItemSnapshot, TileSnapshot};
pub use tile::Tile;
