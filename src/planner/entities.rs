use bevy::prelude::*;
use hexx::Hex;

use crate::adjacency::{AdjacencyMap, compute_adjacency};
use crate::paint::{PaintController, Tool};
use crate::store::{TileEdit, TileStore};

/// Input to the planner, processed strictly in delivery order.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum PlannerCommand {
    /// Toolbar click: selects the tool or deselects it if already active.
    SelectTool(Tool),
    /// Keyboard shortcut: selects the tool, never deselects.
    HotkeyTool(Tool),
    /// Primary button pressed over a tile.
    PointerDown(Hex),
    /// Pointer moved onto a tile while a stroke is active.
    PointerEnter(Hex),
    /// Primary button released, or the pointer left the board.
    PointerUp,
    /// Secondary button pressed over a tile.
    EraseAt(Hex),
    /// Confirmed bulk clear of one layer.
    BulkClear(ClearSection),
    /// Confirmed reset to the initial grid.
    Reset,
}

/// Layer targeted by a bulk clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ClearSection {
    Biomes,
    Features,
    Buildings,
}

impl ClearSection {
    pub const ALL: [Self; 3] = [Self::Biomes, Self::Features, Self::Buildings];

    pub fn label(self) -> &'static str {
        match self {
            Self::Biomes => "biomes",
            Self::Features => "features",
            Self::Buildings => "buildings",
        }
    }

    pub fn edit(self) -> TileEdit {
        match self {
            Self::Biomes => TileEdit::ClearAllBiomes,
            Self::Features => TileEdit::ClearAllFeatures,
            Self::Buildings => TileEdit::ClearAllBuildings,
        }
    }
}

/// Current grid snapshot. Replaced, never edited in place.
#[derive(Resource, Debug, Clone, Default, PartialEq, Deref)]
pub struct CityGrid(pub TileStore);

/// Adjacency result for the current [`CityGrid`].
#[derive(Resource, Debug, Clone, Deref)]
pub struct Adjacency(pub AdjacencyMap);

impl Default for Adjacency {
    fn default() -> Self {
        Self(compute_adjacency(&TileStore::new()))
    }
}

/// Active tool and stroke state.
#[derive(Resource, Debug, Clone, Default, Deref, DerefMut)]
pub struct PaintSession(pub PaintController);
