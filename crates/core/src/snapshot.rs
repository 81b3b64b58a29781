use serde::Serialize;

use crate::catalog::Item;
use crate::grid::Grid;
use crate::types::{Coord, ItemKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ItemSnapshot {
    #[serde(flatten)]
    pub kind: ItemKind,
    pub value: u32,
}

impl From<&Item> for ItemSnapshot {
    fn from(item: &Item) -> Self {
        Self {
            kind: item.kind(),
            value: item.value(),
        }
    }
}

/// One occupied tile, items bottom-to-top
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TileSnapshot {
    pub row: u8,
    pub column: u8,
    pub items: Vec<ItemSnapshot>,
}

impl TileSnapshot {
    pub fn coord(&self) -> Coord {
        Coord::new(self.row, self.column)
    }
}

/// Everything a renderer needs to draw a grid: its size and every occupied stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GridSnapshot {
    pub width: u8,
    pub height: u8,
    /// Occupied tiles only, row-major
    pub tiles: Vec<TileSnapshot>,
    /// Tile a renderer should focus, e.g. the finished sandwich
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Coord>,
}

impl GridSnapshot {
    pub fn capture(grid: &Grid) -> Self {
        let tiles = grid
            .tiles()
            .iter()
            .filter(|t| t.is_occupied())
            .map(|t| TileSnapshot {
                row: t.row(),
                column: t.column(),
                items: t.items().iter().map(ItemSnapshot::from).collect(),
            })
            .collect();

        Self {
            width: grid.width(),
            height: grid.height(),
            tiles,
            highlight: None,
        }
    }

    pub fn with_highlight(mut self, highlight: Option<Coord>) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
