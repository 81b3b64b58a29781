//! Grid module - the rectangular field of tiles
//!
//! Tiles live in a flat vector, row-major (`row * width + column`), created
//! once and never resized. Every coordinate in range maps to exactly one tile.
//! Coordinates: `(row, column)` where row ranges `0..height` (top to bottom)
//! and column ranges `0..width` (left to right).

use std::collections::VecDeque;
use std::fmt::Write as _;

use arrayvec::ArrayVec;

use crate::catalog::Item;
use crate::error::CoreError;
use crate::tile::Tile;
use crate::types::{Coord, Direction, ItemKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u8,
    height: u8,
    /// Flat array of tiles, row-major order
    tiles: Vec<Tile>,
}

impl Grid {
    /// Create a `width x height` grid of empty tiles
    pub fn new(width: u8, height: u8) -> Self {
        let mut tiles = Vec::with_capacity(width as usize * height as usize);
        for row in 0..height {
            for column in 0..width {
                tiles.push(Tile::new(Coord::new(row, column)));
            }
        }
        Self {
            width,
            height,
            tiles,
        }
    }

    /// Calculate flat index from a coordinate
    #[inline(always)]
    fn index(&self, coord: Coord) -> Option<usize> {
        if coord.row >= self.height || coord.column >= self.width {
            return None;
        }
        Some(coord.row as usize * self.width as usize + coord.column as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Total number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.index(coord).is_some()
    }

    /// Get tile at `coord`, `None` if out of bounds
    pub fn get(&self, coord: Coord) -> Option<&Tile> {
        self.index(coord).map(|idx| &self.tiles[idx])
    }

    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Tile> {
        self.index(coord).map(|idx| &mut self.tiles[idx])
    }

    fn out_of_bounds(&self, coord: Coord) -> CoreError {
        CoreError::OutOfBounds {
            coord,
            width: self.width,
            height: self.height,
        }
    }

    /// Get tile at `coord`, failing when out of bounds
    pub fn tile(&self, coord: Coord) -> Result<&Tile, CoreError> {
        self.get(coord).ok_or_else(|| self.out_of_bounds(coord))
    }

    pub fn tile_mut(&mut self, coord: Coord) -> Result<&mut Tile, CoreError> {
        let err = self.out_of_bounds(coord);
        self.get_mut(coord).ok_or(err)
    }

    /// Put `item` on top of the stack at `coord`
    pub fn place(&mut self, coord: Coord, item: Item) -> Result<(), CoreError> {
        self.tile_mut(coord)?.place(item);
        Ok(())
    }

    /// All tiles, row-major
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// All tiles, row-major, mutable (the grid itself cannot be resized)
    pub fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut()
    }

    /// Check if position is inside the grid and empty
    pub fn is_empty_at(&self, coord: Coord) -> bool {
        self.get(coord).is_some_and(Tile::is_empty)
    }

    /// Check if position is inside the grid and occupied
    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.get(coord).is_some_and(Tile::is_occupied)
    }

    /// In-bounds orthogonal neighbours, ordered up, down, left, right
    pub fn neighbors(&self, coord: Coord) -> ArrayVec<Coord, 4> {
        Direction::ALL
            .iter()
            .filter_map(|&dir| coord.step(dir, self.width, self.height))
            .collect()
    }

    /// Orthogonal neighbours whose tile is empty
    pub fn empty_neighbors(&self, coord: Coord) -> ArrayVec<Coord, 4> {
        let mut out = self.neighbors(coord);
        out.retain(|c| self.is_empty_at(*c));
        out
    }

    /// Coordinates of occupied tiles, row-major
    pub fn occupied_coords(&self) -> Vec<Coord> {
        self.tiles
            .iter()
            .filter(|t| t.is_occupied())
            .map(Tile::coord)
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_occupied()).count()
    }

    /// Lift the whole stack from `from` onto the top of `to`, keeping order.
    ///
    /// This is the primitive external move mechanics use to relocate stacks.
    /// Returns how many items moved. Moving a tile onto itself is a no-op.
    pub fn transfer_stack(&mut self, from: Coord, to: Coord) -> Result<usize, CoreError> {
        let to_idx = self.index(to).ok_or_else(|| self.out_of_bounds(to))?;
        let from_idx = self.index(from).ok_or_else(|| self.out_of_bounds(from))?;
        if from_idx == to_idx {
            return Ok(0);
        }

        let moved = self.tiles[from_idx].take_stack();
        let count = moved.len();
        self.tiles[to_idx].extend_stack(moved);
        Ok(count)
    }

    /// Whether all occupied tiles form one orthogonally connected region.
    ///
    /// A grid with no occupied tiles counts as connected.
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.tiles.iter().find(|t| t.is_occupied()) else {
            return true;
        };

        let mut seen = vec![false; self.tiles.len()];
        let mut queue = VecDeque::new();
        let mut reached = 0usize;
        if let Some(idx) = self.index(start.coord()) {
            seen[idx] = true;
            queue.push_back(start.coord());
        }

        while let Some(coord) = queue.pop_front() {
            reached += 1;
            for next in self.neighbors(coord) {
                let Some(idx) = self.index(next) else {
                    continue;
                };
                if !seen[idx] && self.tiles[idx].is_occupied() {
                    seen[idx] = true;
                    queue.push_back(next);
                }
            }
        }

        reached == self.occupied_count()
    }

    /// Clear every stack
    pub fn clear(&mut self) {
        for tile in &mut self.tiles {
            tile.clear();
        }
    }

    /// Plain-text picture of the grid, one line per row.
    ///
    /// `.` is an empty tile. A stack lists its items bottom-to-top: `B` for an
    /// anchor, the catalog index for an ingredient, `v<value>` for a valued item.
    pub fn to_ascii(&self) -> String {
        let labels: Vec<String> = self.tiles.iter().map(stack_label).collect();
        let cell_width = labels.iter().map(String::len).max().unwrap_or(1);

        let mut out = String::new();
        for row in labels.chunks(self.width.max(1) as usize) {
            let line: Vec<String> = row
                .iter()
                .map(|label| format!("{label:>cell_width$}"))
                .collect();
            out.push_str(line.join(" ").trim_end());
            out.push('\n');
        }
        out
    }
}

fn stack_label(tile: &Tile) -> String {
    if tile.is_empty() {
        return ".".to_string();
    }
    let mut label = String::new();
    for item in tile.items() {
        match item.kind() {
            ItemKind::Anchor => label.push('B'),
            ItemKind::Ingredient(index) => {
                let _ = write!(label, "{index}");
            }
            ItemKind::Valued(_) => {
                let _ = write!(label, "v{}", item.value());
            }
        }
    }
    label
}
