//! Tile - one grid cell and its stack of items
//!
//! The stack is ordered bottom-to-top in insertion order. A tile's type is
//! derived from its stack, so `Occupied` always means "non-empty stack".

use crate::catalog::Item;
use crate::types::{Coord, TileType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    coord: Coord,
    stack: Vec<Item>,
}

impl Tile {
    /// Create an empty tile at `coord`
    pub fn new(coord: Coord) -> Self {
        Self {
            coord,
            stack: Vec::new(),
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn row(&self) -> u8 {
        self.coord.row
    }

    pub fn column(&self) -> u8 {
        self.coord.column
    }

    pub fn tile_type(&self) -> TileType {
        if self.stack.is_empty() {
            TileType::Empty
        } else {
            TileType::Occupied
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn is_occupied(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Number of items stacked here
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Items bottom-to-top
    pub fn items(&self) -> &[Item] {
        &self.stack
    }

    pub fn bottom(&self) -> Option<&Item> {
        self.stack.first()
    }

    pub fn top(&self) -> Option<&Item> {
        self.stack.last()
    }

    /// Put `item` on top of the stack
    pub fn place(&mut self, item: Item) {
        self.stack.push(item);
    }

    /// Put `items` on top of the stack, keeping their order
    pub fn extend_stack(&mut self, items: impl IntoIterator<Item = Item>) {
        self.stack.extend(items);
    }

    /// Remove and return the whole stack, leaving the tile empty
    pub fn take_stack(&mut self) -> Vec<Item> {
        std::mem::take(&mut self.stack)
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// Replace the whole stack with one item
    pub fn replace_with(&mut self, item: Item) {
        self.stack.clear();
        self.stack.push(item);
    }
}
