//! Stack merge engine - normalizes stacks after a settling event
//!
//! Runs once per settle, after the external move mechanics have finished
//! relocating stacks. Merging only ever happens inside one tile's own stack:
//!
//! - a stack of two or more items whose **bottom** item is valued collapses
//!   into a single item worth twice the bottom value (the next tier up);
//! - stacks with an anchor or ingredient at the bottom are left alone.
//!
//! # Overflow
//!
//! A merge that needs a tier beyond the catalog leaves that stack untouched,
//! is logged, and is reported in [`SettleResult::overflows`]. Every other tile
//! still merges.

use log::{debug, warn};

use crate::core::{CoreError, Grid, Item, ItemCatalog};
use crate::types::Coord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettleResult {
    /// Occupied tiles after merging, row-major
    pub occupied: Vec<Coord>,
    /// Tiles whose stack was merged into one item
    pub merged: Vec<Coord>,
    /// One [`CoreError::MergeOverflow`] per stack that could not merge
    pub overflows: Vec<CoreError>,
}

impl SettleResult {
    pub fn has_overflow(&self) -> bool {
        !self.overflows.is_empty()
    }

    /// `Err` with the first overflow, if any
    pub fn into_result(self) -> Result<Self, CoreError> {
        match self.overflows.first() {
            Some(err) => Err(err.clone()),
            None => Ok(self),
        }
    }
}

pub fn settle(grid: &mut Grid, catalog: &ItemCatalog) -> SettleResult {
    let mut result = SettleResult::default();
    let max_tier = catalog.max_tier().unwrap_or(0);

    for tile in grid.tiles_mut() {
        let Some(bottom) = tile.bottom().copied() else {
            continue;
        };
        let coord = tile.coord();
        result.occupied.push(coord);

        if tile.len() < 2 || bottom.is_ingredient() {
            continue;
        }

        match merged_item(catalog, &bottom) {
            Some(item) => {
                debug!(
                    "merged {} items on {coord} into value {}",
                    tile.len(),
                    item.value()
                );
                tile.replace_with(item);
                result.merged.push(coord);
            }
            None => {
                let err = CoreError::MergeOverflow {
                    coord,
                    value: bottom.value(),
                    max_tier,
                };
                warn!("{err}");
                result.overflows.push(err);
            }
        }
    }

    result
}

/// Item one tier above `bottom`, `None` past the end of the ladder
fn merged_item(catalog: &ItemCatalog, bottom: &Item) -> Option<Item> {
    let value = bottom.value().checked_mul(2)?;
    let tier = catalog.tier_for_value(value)?;
    catalog.valued(tier as usize).ok()
}
