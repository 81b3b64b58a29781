//! Outcome evaluator - classifies the grid after each settle
//!
//! | Occupied tiles | Single stack | Outcome |
//! |----------------|--------------|---------|
//! | 0 | - | `Failed(None)` |
//! | 1 | anchor at bottom and top | `Solved(tile)` |
//! | 1 | anything else | `Failed(Some(tile))` |
//! | 2+ | - | `InProgress` |
//!
//! `Solved` and `Failed` are terminal for the current level instance.

use crate::core::Grid;
use crate::types::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// More than one tile still occupied
    InProgress,
    /// One stack left with anchors at both ends
    Solved(Coord),
    /// Converged to something that is not a sandwich
    Failed(Option<Coord>),
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Tile a renderer should focus on, if any
    pub fn highlight(&self) -> Option<Coord> {
        match self {
            Outcome::InProgress => None,
            Outcome::Solved(coord) => Some(*coord),
            Outcome::Failed(coord) => *coord,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::InProgress => "in_progress",
            Outcome::Solved(_) => "solved",
            Outcome::Failed(_) => "failed",
        }
    }
}

/// Classify `grid` given the occupied tiles reported by settle.
pub fn evaluate(grid: &Grid, occupied: &[Coord]) -> Outcome {
    match occupied {
        [] => Outcome::Failed(None),
        [coord] => {
            let Some(tile) = grid.get(*coord) else {
                return Outcome::Failed(Some(*coord));
            };
            let bottom_is_anchor = tile.bottom().is_some_and(|i| i.is_anchor());
            let top_is_anchor = tile.top().is_some_and(|i| i.is_anchor());
            if bottom_is_anchor && top_is_anchor {
                Outcome::Solved(*coord)
            } else {
                Outcome::Failed(Some(*coord))
            }
        }
        _ => Outcome::InProgress,
    }
}

/// [`evaluate`] against the grid's current occupancy
pub fn evaluate_grid(grid: &Grid) -> Outcome {
    evaluate(grid, &grid.occupied_coords())
}
