//! Puzzle engine - generation, merging and outcome evaluation
//!
//! # Module Structure
//!
//! - [`generator`]: fixed and randomized grid construction, saved-layout capture and replay
//! - [`settle`]: per-tile stack merging after a settling event
//! - [`outcome`]: solved / failed / in-progress classification
//! - [`session`]: one level's lifecycle driven by explicit calls
//!
//! # Control flow
//!
//! ```text
//! load level ──► generate ──► Grid
//!                               │  external move mechanics relocate stacks
//!                               ▼
//!                            settle ──► evaluate ──► Outcome (+ highlighted tile)
//! ```
//!
//! # Example
//!
//! ```
//! use sandwich_stack_engine::{evaluate, generate, settle, Outcome};
//! use sandwich_stack_core::{ItemCatalog, LevelDefinition, SimpleRng, TileRecord};
//! use sandwich_stack_core::types::Coord;
//!
//! let catalog = ItemCatalog::standard();
//! let def = LevelDefinition::fixed(
//!     3,
//!     1,
//!     vec![TileRecord::ingredient(0), TileRecord::ingredient(2), TileRecord::ingredient(0)],
//! );
//! let mut grid = generate(&def, &catalog, &mut SimpleRng::new(1), None).unwrap();
//!
//! grid.transfer_stack(Coord::new(0, 1), Coord::new(0, 0)).unwrap();
//! grid.transfer_stack(Coord::new(0, 2), Coord::new(0, 0)).unwrap();
//!
//! let result = settle(&mut grid, &catalog);
//! assert_eq!(evaluate(&grid, &result.occupied), Outcome::Solved(Coord::new(0, 0)));
//! ```

pub mod generator;
pub mod outcome;
pub mod session;
pub mod settle;

pub use sandwich_stack_core as core;
pub use sandwich_stack_types as types;

pub use generator::{
    build_from_definition, build_random_ingredient_layout, build_random_valued_layout,
    capture_layout, generate, replay_layout,
};
pub use outcome::{evaluate, evaluate_grid, Outcome};
pub use session::{LevelSession, SettleReport};
pub use settle::{settle, SettleResult};
