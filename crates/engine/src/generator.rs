//! Grid generator - builds a level's grid once per level load
//!
//! Three ways to build a grid:
//!
//! - [`build_from_definition`]: place the definition's cells exactly
//! - [`build_random_ingredient_layout`]: two anchors ("bread") plus random fillers
//! - [`build_random_valued_layout`]: one tier-0 seed plus fillers of tier 0, 1, 2, ...
//!
//! # Randomized growth
//!
//! Randomized layouts are always 4x4. After the seed items are down, each
//! filler goes on a uniformly chosen empty neighbour of a *growth point*:
//!
//! 1. the most recently placed filler with an empty neighbour, scanning
//!    fillers in reverse placement order;
//! 2. failing that, the first seed item, then the second.
//!
//! The occupied region therefore stays connected and grows like a snake that
//! backtracks to older tiles when its head is boxed in. A request for more
//! items than the grid has tiles fails with [`CoreError::NoCandidateTile`]
//! before anything is placed.

use arrayvec::ArrayVec;
use log::debug;

use crate::core::{
    CoreError, Grid, Item, ItemCatalog, LayoutKind, LevelDefinition, RandomLayoutStore,
    RandomSource, SavedRandomLayout, TileRecord,
};
use crate::types::{Coord, ItemKind, TileType, RANDOM_GRID_HEIGHT, RANDOM_GRID_WIDTH};

/// Build the grid for `def`, picking the builder from its layout kind.
///
/// `store` receives a snapshot of randomized layouts; fixed layouts are never saved.
pub fn generate<R: RandomSource>(
    def: &LevelDefinition,
    catalog: &ItemCatalog,
    rng: &mut R,
    store: Option<&mut RandomLayoutStore>,
) -> Result<Grid, CoreError> {
    match def.layout_kind() {
        LayoutKind::Fixed => build_from_definition(def, catalog),
        LayoutKind::RandomIngredients => build_random_ingredient_layout(def, catalog, rng, store),
        LayoutKind::RandomValued => build_random_valued_layout(def, catalog, rng, store),
    }
}

/// Place every cell of a fixed definition, row-major.
///
/// Occupied cells get exactly one item: the ingredient they name, or the
/// valued item carrying the value they name (saved valued layouts).
pub fn build_from_definition(
    def: &LevelDefinition,
    catalog: &ItemCatalog,
) -> Result<Grid, CoreError> {
    let expected = def.expected_cells();
    if def.cells.len() != expected {
        return Err(CoreError::CellCountMismatch {
            width: def.width,
            height: def.height,
            expected,
            actual: def.cells.len(),
        });
    }

    let mut grid = Grid::new(def.width, def.height);
    let width = def.width as usize;
    for (i, record) in def.cells.iter().enumerate() {
        let coord = Coord::new((i / width) as u8, (i % width) as u8);
        if let Some(item) = record_item(record, coord, catalog)? {
            grid.place(coord, item)?;
        }
    }

    debug!(
        "built fixed {}x{} grid with {} occupied tiles",
        def.width,
        def.height,
        grid.occupied_count()
    );
    Ok(grid)
}

fn record_item(
    record: &TileRecord,
    coord: Coord,
    catalog: &ItemCatalog,
) -> Result<Option<Item>, CoreError> {
    match (record.tile_type, record.ingredient, record.value) {
        (TileType::Empty, _, _) => Ok(None),
        (TileType::Occupied, Some(_), Some(_)) => Err(CoreError::AmbiguousItem { coord }),
        (TileType::Occupied, Some(index), None) => catalog.ingredient(index).map(Some),
        (TileType::Occupied, None, Some(value)) => catalog.valued_by_value(value).map(Some),
        (TileType::Occupied, None, None) => Err(CoreError::MissingItem { coord }),
    }
}

/// Rebuild a saved random layout as a fixed grid
pub fn replay_layout(saved: &SavedRandomLayout, catalog: &ItemCatalog) -> Result<Grid, CoreError> {
    build_from_definition(&saved.clone().into_definition(), catalog)
}

/// Record every tile's type and bottom item, row-major
pub fn capture_layout(grid: &Grid) -> SavedRandomLayout {
    let cells = grid
        .tiles()
        .iter()
        .map(|tile| match tile.bottom() {
            None => TileRecord::empty(),
            Some(item) => match item.kind() {
                ItemKind::Valued(_) => TileRecord::valued(item.value()),
                _ => TileRecord {
                    tile_type: TileType::Occupied,
                    ingredient: item.ingredient_index(),
                    value: None,
                },
            },
        })
        .collect();

    SavedRandomLayout {
        width: grid.width(),
        height: grid.height(),
        cells,
    }
}

/// Two anchors plus `def.ingredient_amount` random fillers on a 4x4 grid.
pub fn build_random_ingredient_layout<R: RandomSource>(
    def: &LevelDefinition,
    catalog: &ItemCatalog,
    rng: &mut R,
    store: Option<&mut RandomLayoutStore>,
) -> Result<Grid, CoreError> {
    let amount = def.ingredient_amount;
    if amount > 0 && catalog.filler_count() == 0 {
        return Err(CoreError::NoFillerIngredients);
    }
    let mut grid = random_grid(def);
    let requested = check_room(&grid, 2, amount)?;
    let first = place_seed(&mut grid, rng, catalog.anchor());

    let options = grid.empty_neighbors(first);
    let second = *rng.choose(&options).ok_or(CoreError::NoCandidateTile {
        placed: 1,
        requested,
    })?;
    grid.place(second, catalog.anchor())?;
    debug!("anchors placed on {first} and {second}");

    let fillers = catalog.filler_count() as u32;
    grow(&mut grid, rng, &[first, second], amount, 2, |_, rng| {
        let index = 1 + rng.next_range(fillers);
        catalog.ingredient(index as u8)
    })?;

    save(&grid, store);
    Ok(grid)
}

/// One tier-0 seed plus `def.valued_amount` fillers on a 4x4 grid.
///
/// Filler `i` is tier `i`, so the seed and the first filler share tier 0.
pub fn build_random_valued_layout<R: RandomSource>(
    def: &LevelDefinition,
    catalog: &ItemCatalog,
    rng: &mut R,
    store: Option<&mut RandomLayoutStore>,
) -> Result<Grid, CoreError> {
    let amount = def.valued_amount;
    let needed = amount.max(1);
    if needed > catalog.tier_count() {
        return Err(CoreError::UnknownTier {
            tier: needed - 1,
            len: catalog.tier_count(),
        });
    }

    let mut grid = random_grid(def);
    check_room(&grid, 1, amount)?;
    let seed = place_seed(&mut grid, rng, catalog.valued(0)?);
    debug!("valued seed placed on {seed}");

    grow(&mut grid, rng, &[seed], amount, 1, |i, _| catalog.valued(i))?;

    save(&grid, store);
    Ok(grid)
}

fn random_grid(def: &LevelDefinition) -> Grid {
    if def.width != RANDOM_GRID_WIDTH || def.height != RANDOM_GRID_HEIGHT {
        debug!(
            "randomized layouts are {}x{}, ignoring the {}x{} in the definition",
            RANDOM_GRID_WIDTH, RANDOM_GRID_HEIGHT, def.width, def.height
        );
    }
    Grid::new(RANDOM_GRID_WIDTH, RANDOM_GRID_HEIGHT)
}

/// Total item count for `amount` fillers after `seeds` seed items, if it fits the grid
fn check_room(grid: &Grid, seeds: usize, amount: usize) -> Result<usize, CoreError> {
    let requested = amount.saturating_add(seeds);
    if requested > grid.len() {
        return Err(CoreError::NoCandidateTile {
            placed: 0,
            requested,
        });
    }
    Ok(requested)
}

/// Put `item` on a uniformly random tile of an empty grid: row first, then column.
fn place_seed<R: RandomSource>(grid: &mut Grid, rng: &mut R, item: Item) -> Coord {
    let row = rng.next_range(grid.height() as u32) as u8;
    let column = rng.next_range(grid.width() as u32) as u8;
    let coord = Coord::new(row, column);
    if let Some(tile) = grid.get_mut(coord) {
        tile.place(item);
    }
    coord
}

/// Place `amount` fillers, each next to the current growth point.
///
/// `item_for(i, rng)` picks the item for filler `i` after its tile is chosen.
fn grow<R, F>(
    grid: &mut Grid,
    rng: &mut R,
    seeds: &[Coord],
    amount: usize,
    already_placed: usize,
    mut item_for: F,
) -> Result<Vec<Coord>, CoreError>
where
    R: RandomSource,
    F: FnMut(usize, &mut R) -> Result<Item, CoreError>,
{
    let requested = already_placed + amount;
    let mut fillers: Vec<Coord> = Vec::with_capacity(amount.min(grid.len()));

    for i in 0..amount {
        let no_room = CoreError::NoCandidateTile {
            placed: already_placed + i,
            requested,
        };
        let options = growth_options(grid, seeds, &fillers).ok_or(no_room.clone())?;
        let target = *rng.choose(&options).ok_or(no_room)?;

        let item = item_for(i, rng)?;
        grid.place(target, item)?;
        fillers.push(target);
    }

    Ok(fillers)
}

/// Empty neighbours of the first growth point that has any.
///
/// Fillers are scanned newest first, then the seeds in placement order.
fn growth_options(grid: &Grid, seeds: &[Coord], fillers: &[Coord]) -> Option<ArrayVec<Coord, 4>> {
    fillers
        .iter()
        .rev()
        .chain(seeds.iter())
        .map(|&c| grid.empty_neighbors(c))
        .find(|options| !options.is_empty())
}

fn save(grid: &Grid, store: Option<&mut RandomLayoutStore>) {
    if let Some(store) = store {
        store.push(capture_layout(grid));
        debug!("saved random layout #{}", store.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SequenceRng, SimpleRng};

    fn anchors_in(grid: &Grid) -> usize {
        grid.tiles()
            .iter()
            .filter(|t| t.bottom().is_some_and(Item::is_anchor))
            .count()
    }

    #[test]
    fn fixed_layout_places_cells_row_major() {
        let catalog = ItemCatalog::standard();
        let def = LevelDefinition::fixed(
            3,
            2,
            vec![
                TileRecord::ingredient(0),
                TileRecord::empty(),
                TileRecord::ingredient(4),
                TileRecord::empty(),
                TileRecord::empty(),
                TileRecord::ingredient(0),
            ],
        );

        let grid = build_from_definition(&def, &catalog).unwrap();
        assert_eq!(
            grid.occupied_coords(),
            vec![Coord::new(0, 0), Coord::new(0, 2), Coord::new(1, 2)]
        );
        let middle = grid.get(Coord::new(0, 2)).unwrap();
        assert_eq!(middle.bottom().unwrap().kind(), ItemKind::Ingredient(4));
        assert_eq!(middle.len(), 1);
        assert_eq!(anchors_in(&grid), 2);
    }

    #[test]
    fn fixed_layout_rejects_wrong_cell_count() {
        let catalog = ItemCatalog::standard();
        let def = LevelDefinition::fixed(2, 2, vec![TileRecord::empty(); 3]);
        assert_eq!(
            build_from_definition(&def, &catalog),
            Err(CoreError::CellCountMismatch {
                width: 2,
                height: 2,
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn fixed_layout_rejects_unknown_ingredient() {
        let catalog = ItemCatalog::standard();
        let def = LevelDefinition::fixed(1, 1, vec![TileRecord::ingredient(42)]);
        assert_eq!(
            build_from_definition(&def, &catalog),
            Err(CoreError::UnknownIngredient { index: 42, len: 7 })
        );
    }

    #[test]
    fn fixed_layout_rejects_item_less_and_ambiguous_cells() {
        let catalog = ItemCatalog::standard();
        let bare = TileRecord {
            tile_type: TileType::Occupied,
            ingredient: None,
            value: None,
        };
        let def = LevelDefinition::fixed(1, 1, vec![bare]);
        assert_eq!(
            build_from_definition(&def, &catalog),
            Err(CoreError::MissingItem {
                coord: Coord::new(0, 0)
            })
        );

        let both = TileRecord {
            tile_type: TileType::Occupied,
            ingredient: Some(1),
            value: Some(2),
        };
        let def = LevelDefinition::fixed(1, 1, vec![both]);
        assert!(matches!(
            build_from_definition(&def, &catalog),
            Err(CoreError::AmbiguousItem { .. })
        ));
    }

    #[test]
    fn empty_cells_ignore_stray_ingredient() {
        let catalog = ItemCatalog::standard();
        let stray = TileRecord {
            tile_type: TileType::Empty,
            ingredient: Some(99),
            value: None,
        };
        let def = LevelDefinition::fixed(1, 1, vec![stray]);
        let grid = build_from_definition(&def, &catalog).unwrap();
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn scripted_ingredient_layout() {
        let catalog = ItemCatalog::standard();
        let def = LevelDefinition::random_ingredients(2);
        // anchor row 0, col 0; second anchor option 0 of [(1,0), (0,1)];
        // filler 0 grows from the first anchor: only (0,1) left, subtype 1 + 2;
        // filler 1 grows from (0,1): options [(1,1), (0,2)], pick 1, subtype 1 + 0.
        let mut rng = SequenceRng::new(vec![0, 0, 0, 0, 2, 1, 0]);

        let grid = build_random_ingredient_layout(&def, &catalog, &mut rng, None).unwrap();
        let kind_at = |r, c| grid.get(Coord::new(r, c)).unwrap().bottom().unwrap().kind();

        assert_eq!(kind_at(0, 0), ItemKind::Anchor);
        assert_eq!(kind_at(1, 0), ItemKind::Anchor);
        assert_eq!(kind_at(0, 1), ItemKind::Ingredient(3));
        assert_eq!(kind_at(0, 2), ItemKind::Ingredient(1));
        assert_eq!(grid.occupied_count(), 4);
        assert_eq!(rng.consumed(), 7);
    }

    #[test]
    fn growth_backtracks_to_older_fillers() {
        let catalog = ItemCatalog::standard();
        let mut grid = Grid::new(4, 4);
        // Head at (0,3) is boxed in by (0,2) and (1,3); (1,2) still has room.
        for c in [
            Coord::new(0, 2),
            Coord::new(1, 3),
            Coord::new(0, 3),
            Coord::new(1, 2),
        ] {
            grid.place(c, catalog.anchor()).unwrap();
        }
        let fillers = [Coord::new(1, 2), Coord::new(0, 3)];

        let options = growth_options(&grid, &[Coord::new(0, 2)], &fillers).unwrap();
        assert_eq!(options.as_slice(), &[Coord::new(2, 2), Coord::new(1, 1)]);
    }

    #[test]
    fn growth_falls_back_to_seeds() {
        let catalog = ItemCatalog::standard();
        let mut grid = Grid::new(3, 1);
        grid.place(Coord::new(0, 1), catalog.anchor()).unwrap();
        grid.place(Coord::new(0, 2), catalog.anchor()).unwrap();

        let options = growth_options(&grid, &[Coord::new(0, 1)], &[Coord::new(0, 2)]).unwrap();
        assert_eq!(options.as_slice(), &[Coord::new(0, 0)]);

        grid.place(Coord::new(0, 0), catalog.anchor()).unwrap();
        assert!(growth_options(&grid, &[Coord::new(0, 1)], &[Coord::new(0, 2)]).is_none());
    }

    #[test]
    fn ingredient_layout_fills_whole_grid() {
        let catalog = ItemCatalog::standard();
        let def = LevelDefinition::random_ingredients(14);
        let grid =
            build_random_ingredient_layout(&def, &catalog, &mut SimpleRng::new(9), None).unwrap();
        assert_eq!(grid.occupied_count(), 16);
        assert_eq!(anchors_in(&grid), 2);
    }

    #[test]
    fn ingredient_layout_overflow_is_generation_error() {
        let catalog = ItemCatalog::standard();
        let def = LevelDefinition::random_ingredients(15);
        let err = build_random_ingredient_layout(&def, &catalog, &mut SimpleRng::new(9), None)
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::NoCandidateTile {
                placed: 0,
                requested: 17
            }
        );
    }

    #[test]
    fn widest_catalog_never_draws_extra_anchors() {
        let names: Vec<String> = (0..256).map(|i| format!("ingredient {i}")).collect();
        let catalog = ItemCatalog::with_ladder(names, 4).unwrap();
        let def = LevelDefinition::random_ingredients(14);

        for seed in 0..200 {
            let grid =
                build_random_ingredient_layout(&def, &catalog, &mut SimpleRng::new(seed), None)
                    .unwrap();
            assert_eq!(anchors_in(&grid), 2, "seed {seed}");
        }
    }

    #[test]
    fn huge_amounts_fail_without_placing() {
        let catalog = ItemCatalog::standard();
        let mut rng = SequenceRng::new(vec![0]);

        for amount in [usize::MAX, usize::MAX - 2] {
            let def = LevelDefinition::random_ingredients(amount);
            let err = build_random_ingredient_layout(&def, &catalog, &mut rng, None).unwrap_err();
            assert!(matches!(err, CoreError::NoCandidateTile { placed: 0, .. }), "{err:?}");
            assert_eq!(err.code(), "generation_error");
        }

        let catalog = ItemCatalog::with_ladder(["bread"], 20).unwrap();
        let def = LevelDefinition::random_valued(16);
        assert_eq!(
            build_random_valued_layout(&def, &catalog, &mut rng, None),
            Err(CoreError::NoCandidateTile {
                placed: 0,
                requested: 17
            })
        );
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn ingredient_layout_needs_fillers_in_catalog() {
        let catalog = ItemCatalog::with_ladder(["bread"], 4).unwrap();
        let def = LevelDefinition::random_ingredients(1);
        assert_eq!(
            build_random_ingredient_layout(&def, &catalog, &mut SimpleRng::new(1), None),
            Err(CoreError::NoFillerIngredients)
        );

        // Anchors alone need no fillers.
        let def = LevelDefinition::random_ingredients(0);
        let grid =
            build_random_ingredient_layout(&def, &catalog, &mut SimpleRng::new(1), None).unwrap();
        assert_eq!(anchors_in(&grid), 2);
    }

    #[test]
    fn valued_layout_tiers_follow_placement_order() {
        let catalog = ItemCatalog::standard();
        let def = LevelDefinition::random_valued(4);
        // seed (2,2); fillers always take the first option.
        let mut rng = SequenceRng::new(vec![2, 2, 0, 0, 0, 0]);

        let grid = build_random_valued_layout(&def, &catalog, &mut rng, None).unwrap();
        assert_eq!(grid.occupied_count(), 5);

        let tier_at = |r, c| grid.get(Coord::new(r, c)).unwrap().bottom().unwrap().tier();
        assert_eq!(tier_at(2, 2), Some(0));
        // first option is always "up" while there is room
        assert_eq!(tier_at(1, 2), Some(0));
        assert_eq!(tier_at(0, 2), Some(1));
        // (0,2) can only go left or right now
        assert_eq!(tier_at(0, 1), Some(2));
        assert_eq!(tier_at(1, 1), Some(3));
    }

    #[test]
    fn valued_layout_rejects_missing_tiers() {
        let catalog = ItemCatalog::with_ladder(["bread"], 3).unwrap();
        let def = LevelDefinition::random_valued(4);
        assert_eq!(
            build_random_valued_layout(&def, &catalog, &mut SimpleRng::new(1), None),
            Err(CoreError::UnknownTier { tier: 3, len: 3 })
        );
    }

    #[test]
    fn saved_layout_replays_identically() {
        let catalog = ItemCatalog::standard();
        let mut store = RandomLayoutStore::new();

        let def = LevelDefinition::random_ingredients(6);
        let grid = generate(&def, &catalog, &mut SimpleRng::new(77), Some(&mut store)).unwrap();
        let def = LevelDefinition::random_valued(5);
        let valued = generate(&def, &catalog, &mut SimpleRng::new(78), Some(&mut store)).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(replay_layout(&store.layouts[0], &catalog).unwrap(), grid);
        assert_eq!(replay_layout(&store.layouts[1], &catalog).unwrap(), valued);
    }

    #[test]
    fn fixed_layouts_are_never_saved() {
        let catalog = ItemCatalog::standard();
        let mut store = RandomLayoutStore::new();
        let def = LevelDefinition::fixed(1, 1, vec![TileRecord::ingredient(0)]);
        generate(&def, &catalog, &mut SimpleRng::new(1), Some(&mut store)).unwrap();
        assert!(store.is_empty());
    }
}
