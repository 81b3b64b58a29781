//! Level session - one level's lifecycle as explicit calls
//!
//! A session owns the level list, the catalog, the random source and the
//! current grid. Collaborators drive it directly:
//!
//! 1. the level loader calls [`LevelSession::load`] (or `restart` / `next_level`);
//! 2. move mechanics relocate stacks through [`LevelSession::grid_mut`] or
//!    [`LevelSession::transfer_stack`];
//! 3. once a move has finished, they call [`LevelSession::on_settled`] and
//!    forward the returned [`SettleReport`] to whoever renders it.

use log::{debug, info};

use crate::core::{
    CoreError, Grid, GridSnapshot, ItemCatalog, LevelContainer, RandomLayoutStore, RandomSource,
};
use crate::generator::generate;
use crate::outcome::{evaluate, Outcome};
use crate::settle::settle;
use crate::types::Coord;

/// Everything one settle produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettleReport {
    pub occupied: Vec<Coord>,
    pub merged: Vec<Coord>,
    pub overflows: Vec<CoreError>,
    pub outcome: Outcome,
}

#[derive(Debug, Clone)]
pub struct LevelSession<R: RandomSource> {
    levels: LevelContainer,
    catalog: ItemCatalog,
    rng: R,
    /// Randomized layouts are saved here when present
    store: Option<RandomLayoutStore>,
    level_index: usize,
    grid: Grid,
    outcome: Outcome,
    settles: u32,
    loaded: bool,
}

impl<R: RandomSource> LevelSession<R> {
    /// Create a session with no level loaded yet
    pub fn new(levels: LevelContainer, catalog: ItemCatalog, rng: R) -> Self {
        Self {
            levels,
            catalog,
            rng,
            store: None,
            level_index: 0,
            grid: Grid::new(0, 0),
            outcome: Outcome::InProgress,
            settles: 0,
            loaded: false,
        }
    }

    /// Save every randomized layout generated from now on into `store`
    pub fn with_layout_store(mut self, store: RandomLayoutStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Build level `index` and make it current.
    ///
    /// On error the previous grid stays current.
    pub fn load(&mut self, index: usize) -> Result<&Grid, CoreError> {
        let def = self.levels.level(index)?;
        let grid = generate(def, &self.catalog, &mut self.rng, self.store.as_mut())?;

        info!(
            "level {} loaded ({:?}, {} occupied tiles)",
            index,
            def.layout_kind(),
            grid.occupied_count()
        );
        self.grid = grid;
        self.level_index = index;
        self.outcome = Outcome::InProgress;
        self.settles = 0;
        self.loaded = true;
        Ok(&self.grid)
    }

    /// Rebuild the current level. Randomized levels get a fresh layout.
    pub fn restart(&mut self) -> Result<&Grid, CoreError> {
        self.load(self.level_index)
    }

    /// Load the following level, wrapping to the first after the last
    pub fn next_level(&mut self) -> Result<&Grid, CoreError> {
        if self.levels.is_empty() {
            return Err(CoreError::UnknownLevel { index: 0, len: 0 });
        }
        let next = (self.level_index + 1) % self.levels.len();
        self.load(next)
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid for move mechanics. Call [`Self::on_settled`] when done.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn transfer_stack(&mut self, from: Coord, to: Coord) -> Result<usize, CoreError> {
        self.grid.transfer_stack(from, to)
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Settles run on the current level
    pub fn settle_count(&self) -> u32 {
        self.settles
    }

    /// Merge stacks and classify the grid after a move has finished.
    ///
    /// Once the level is solved or failed the outcome is fixed: further calls
    /// report it again without merging anything. Before the first successful
    /// load there is nothing to settle and the report is empty and in progress.
    pub fn on_settled(&mut self) -> SettleReport {
        if !self.loaded {
            debug!("no level loaded, ignoring settle");
            return SettleReport {
                occupied: Vec::new(),
                merged: Vec::new(),
                overflows: Vec::new(),
                outcome: Outcome::InProgress,
            };
        }
        if self.outcome.is_terminal() {
            debug!(
                "level {} already {}, ignoring settle",
                self.level_index,
                self.outcome.as_str()
            );
            return SettleReport {
                occupied: self.grid.occupied_coords(),
                merged: Vec::new(),
                overflows: Vec::new(),
                outcome: self.outcome,
            };
        }

        let result = settle(&mut self.grid, &self.catalog);
        let outcome = evaluate(&self.grid, &result.occupied);
        self.settles += 1;
        self.outcome = outcome;

        match outcome {
            Outcome::Solved(coord) => info!(
                "level {} solved on {} after {} settles",
                self.level_index, coord, self.settles
            ),
            Outcome::Failed(_) => info!(
                "level {} failed after {} settles",
                self.level_index, self.settles
            ),
            Outcome::InProgress => debug!(
                "settle {}: {} occupied, {} merged",
                self.settles,
                result.occupied.len(),
                result.merged.len()
            ),
        }

        SettleReport {
            occupied: result.occupied,
            merged: result.merged,
            overflows: result.overflows,
            outcome,
        }
    }

    /// Renderer view of the current grid, highlighting the finished tile
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::capture(&self.grid).with_highlight(self.outcome.highlight())
    }

    pub fn layout_store(&self) -> Option<&RandomLayoutStore> {
        self.store.as_ref()
    }

    /// Hand the saved layouts back to the caller, ending saving
    pub fn take_layout_store(&mut self) -> Option<RandomLayoutStore> {
        self.store.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LevelDefinition, SimpleRng, TileRecord};

    fn two_anchor_level() -> LevelDefinition {
        LevelDefinition::fixed(
            2,
            1,
            vec![TileRecord::ingredient(0), TileRecord::ingredient(0)],
        )
    }

    fn session(levels: Vec<LevelDefinition>) -> LevelSession<SimpleRng> {
        LevelSession::new(
            LevelContainer::new(levels),
            ItemCatalog::standard(),
            SimpleRng::new(1),
        )
    }

    #[test]
    fn solve_fixed_level() {
        let mut s = session(vec![two_anchor_level()]);
        s.load(0).unwrap();

        let report = s.on_settled();
        assert_eq!(report.outcome, Outcome::InProgress);

        s.transfer_stack(Coord::new(0, 1), Coord::new(0, 0)).unwrap();
        let report = s.on_settled();
        assert_eq!(report.outcome, Outcome::Solved(Coord::new(0, 0)));
        assert_eq!(s.settle_count(), 2);
        assert_eq!(s.snapshot().highlight, Some(Coord::new(0, 0)));
    }

    #[test]
    fn settle_before_load_changes_nothing() {
        let mut s = session(vec![two_anchor_level()]);
        let report = s.on_settled();
        assert_eq!(report.outcome, Outcome::InProgress);
        assert!(report.occupied.is_empty());
        assert_eq!(s.outcome(), Outcome::InProgress);
        assert_eq!(s.settle_count(), 0);

        s.load(0).unwrap();
        s.transfer_stack(Coord::new(0, 1), Coord::new(0, 0)).unwrap();
        assert_eq!(s.on_settled().outcome, Outcome::Solved(Coord::new(0, 0)));
    }

    #[test]
    fn terminal_outcome_is_sticky() {
        let mut s = session(vec![two_anchor_level()]);
        s.load(0).unwrap();
        s.transfer_stack(Coord::new(0, 1), Coord::new(0, 0)).unwrap();
        s.on_settled();

        // Moving the stack away again does not reopen the level.
        s.transfer_stack(Coord::new(0, 0), Coord::new(0, 1)).unwrap();
        let report = s.on_settled();
        assert_eq!(report.outcome, Outcome::Solved(Coord::new(0, 0)));
        assert_eq!(report.occupied, vec![Coord::new(0, 1)]);
        assert_eq!(s.settle_count(), 1);

        s.restart().unwrap();
        assert_eq!(s.outcome(), Outcome::InProgress);
        assert_eq!(s.settle_count(), 0);
    }

    #[test]
    fn next_level_wraps() {
        let mut s = session(vec![two_anchor_level(), LevelDefinition::random_ingredients(3)]);
        s.load(0).unwrap();
        s.next_level().unwrap();
        assert_eq!(s.level_index(), 1);
        assert_eq!(s.grid().occupied_count(), 5);
        s.next_level().unwrap();
        assert_eq!(s.level_index(), 0);
    }

    #[test]
    fn failed_load_keeps_previous_grid() {
        let bad = LevelDefinition::fixed(2, 2, Vec::new());
        let mut s = session(vec![two_anchor_level(), bad]);
        s.load(0).unwrap();
        let before = s.grid().clone();

        assert!(matches!(
            s.load(1),
            Err(CoreError::CellCountMismatch { .. })
        ));
        assert_eq!(s.grid(), &before);
        assert_eq!(s.level_index(), 0);
        assert!(matches!(s.load(9), Err(CoreError::UnknownLevel { .. })));
    }

    #[test]
    fn empty_container_has_no_next_level() {
        let mut s = session(Vec::new());
        assert_eq!(
            s.next_level().map(|_| ()),
            Err(CoreError::UnknownLevel { index: 0, len: 0 })
        );
    }

    #[test]
    fn random_layouts_are_saved_when_store_attached() {
        let mut s = session(vec![LevelDefinition::random_valued(3), two_anchor_level()])
            .with_layout_store(RandomLayoutStore::new());
        s.load(0).unwrap();
        s.restart().unwrap();
        s.next_level().unwrap();

        let store = s.take_layout_store().unwrap();
        assert_eq!(store.len(), 2);
        assert!(s.layout_store().is_none());
    }
}
