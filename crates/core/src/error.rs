//! Error type shared by the catalog, generator and merge engine.

use thiserror::Error;

use crate::types::Coord;

/// Broad class of a [`CoreError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed catalog or level definition
    Configuration,
    /// Randomized placement ran out of candidate tiles
    Generation,
    /// A merge needs a tier the catalog does not define
    MergeOverflow,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("catalog needs at least one ingredient (the anchor)")]
    EmptyIngredientTable,

    #[error("catalog tier {tier} has value {actual}, expected {expected}")]
    BrokenTierLadder { tier: u8, expected: u32, actual: u32 },

    #[error("catalog defines {count} ingredients, at most {max} are supported")]
    TooManyIngredients { count: usize, max: usize },

    #[error("catalog defines {count} tiers, at most {max} are supported")]
    TooManyTiers { count: usize, max: usize },

    #[error("catalog has no non-anchor ingredient to place")]
    NoFillerIngredients,

    #[error("level is {width}x{height} and needs {expected} cells, got {actual}")]
    CellCountMismatch {
        width: u8,
        height: u8,
        expected: usize,
        actual: usize,
    },

    #[error("ingredient index {index} is outside the catalog ({len} ingredients)")]
    UnknownIngredient { index: u8, len: usize },

    #[error("valued tier {tier} is outside the catalog ({len} tiers)")]
    UnknownTier { tier: usize, len: usize },

    #[error("value {value} is not on the catalog tier ladder")]
    UnknownValue { value: u32 },

    #[error("occupied cell {coord} names no item")]
    MissingItem { coord: Coord },

    #[error("cell {coord} names both an ingredient and a value")]
    AmbiguousItem { coord: Coord },

    #[error("level index {index} is out of range ({len} levels)")]
    UnknownLevel { index: usize, len: usize },

    #[error("coordinate {coord} is outside the {width}x{height} grid")]
    OutOfBounds { coord: Coord, width: u8, height: u8 },

    #[error("no empty tile left after placing {placed} of {requested} items")]
    NoCandidateTile { placed: usize, requested: usize },

    #[error("merging value {value} on {coord} needs a tier above {max_tier}")]
    MergeOverflow { coord: Coord, value: u32, max_tier: u8 },
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::NoCandidateTile { .. } => ErrorKind::Generation,
            CoreError::MergeOverflow { .. } => ErrorKind::MergeOverflow,
            _ => ErrorKind::Configuration,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Configuration => "configuration_error",
            ErrorKind::Generation => "generation_error",
            ErrorKind::MergeOverflow => "merge_overflow",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_kind() {
        let err = CoreError::NoCandidateTile {
            placed: 14,
            requested: 15,
        };
        assert_eq!(err.kind(), ErrorKind::Generation);
        assert_eq!(err.code(), "generation_error");

        let err = CoreError::UnknownIngredient { index: 9, len: 7 };
        assert_eq!(err.code(), "configuration_error");

        let err = CoreError::MergeOverflow {
            coord: Coord::new(1, 1),
            value: 4,
            max_tier: 0,
        };
        assert_eq!(err.code(), "merge_overflow");
        assert_eq!(
            err.to_string(),
            "merging value 4 on (1, 1) needs a tier above 0"
        );
    }
}
