//! Tool selection and paint-stroke handling.
//!
//! [`PaintController`] turns pointer gestures into [`TileEdit`]s. It never
//! touches the store itself; callers apply the returned edit and hand the new
//! store back in on the next gesture.

use bevy::platform::collections::HashSet;
use bevy::prelude::*;
use hexx::Hex;

use crate::kinds::{Biome, Building, Feature, Kind, kind_for_hotkey};
use crate::store::{TileEdit, TileStore};
use crate::tiles::{Slot, Tile};

/// Which tile layer a tool paints and erases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Biome,
    Feature,
    Building,
}

/// A selectable painting tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Tool {
    Biome(Biome),
    Feature(Feature),
    Building(Building),
}

impl Tool {
    pub fn layer(self) -> Layer {
        match self {
            Self::Biome(_) => Layer::Biome,
            Self::Feature(_) => Layer::Feature,
            Self::Building(_) => Layer::Building,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Biome(b) => b.label(),
            Self::Feature(f) => f.label(),
            Self::Building(b) => b.label(),
        }
    }

    pub fn hotkey(self) -> Option<char> {
        match self {
            Self::Biome(b) => b.hotkey(),
            Self::Feature(f) => f.hotkey(),
            Self::Building(b) => b.hotkey(),
        }
    }

    /// Tool bound to a keyboard letter.
    pub fn from_hotkey(key: char) -> Option<Self> {
        kind_for_hotkey(key)
            .map(Self::Building)
            .or_else(|| kind_for_hotkey(key).map(Self::Feature))
            .or_else(|| kind_for_hotkey(key).map(Self::Biome))
    }

    /// The edit this tool makes on `hex`, if any.
    fn edit(self, store: &TileStore, hex: Hex) -> Option<TileEdit> {
        match self {
            Self::Biome(biome) => Some(TileEdit::SetBiome {
                hex,
                biome: Some(biome),
            }),
            Self::Feature(feature) => Some(TileEdit::ToggleFeature { hex, feature }),
            Self::Building(building) => {
                let slot = building_slot(store.get(hex)?)?;
                Some(TileEdit::PlaceBuilding {
                    hex,
                    slot,
                    building: Some(building),
                })
            }
        }
    }
}

/// Slot a painted building goes into, or `None` when the tile is blocked or
/// has no free slot. The palace slot is never offered.
pub fn building_slot(tile: &Tile) -> Option<Slot> {
    if tile.is_blocked() {
        return None;
    }
    let free = |slot: Slot| tile.building(slot).is_none().then_some(slot);
    if tile.is_palace_tile() {
        free(Slot::Second)
    } else {
        free(Slot::First).or_else(|| free(Slot::Second))
    }
}

/// Current tool plus the state of an in-progress stroke.
///
/// A stroke runs from [`pointer_down`](Self::pointer_down) to
/// [`pointer_up`](Self::pointer_up). Feature tools toggle each tile at most
/// once per stroke so dragging back over a tile does not flicker it.
#[derive(Debug, Clone, Default)]
pub struct PaintController {
    tool: Option<Tool>,
    stroke: Option<HashSet<Hex>>,
}

impl PaintController {
    pub fn tool(&self) -> Option<Tool> {
        self.tool
    }

    pub fn is_painting(&self) -> bool {
        self.stroke.is_some()
    }

    /// Selects `tool`, or deselects it if it is already active.
    pub fn select(&mut self, tool: Tool) {
        self.tool = if self.tool == Some(tool) {
            None
        } else {
            Some(tool)
        };
    }

    /// Selects `tool` without toggling.
    pub fn select_from_hotkey(&mut self, tool: Tool) {
        self.tool = Some(tool);
    }

    pub fn deselect(&mut self) {
        self.tool = None;
    }

    /// Starts a stroke and paints the first tile.
    pub fn pointer_down(&mut self, store: &TileStore, hex: Hex) -> Option<TileEdit> {
        let mut visited = HashSet::default();
        // A tile only counts as visited once a tool has acted on it.
        if self.tool.is_some() {
            visited.insert(hex);
        }
        self.stroke = Some(visited);
        self.tool?.edit(store, hex)
    }

    /// Paints a tile entered during a stroke.
    pub fn pointer_enter(&mut self, store: &TileStore, hex: Hex) -> Option<TileEdit> {
        let visited = self.stroke.as_mut()?;
        let tool = self.tool?;
        let first_visit = visited.insert(hex);
        if !first_visit && tool.layer() == Layer::Feature {
            return None;
        }
        tool.edit(store, hex)
    }

    /// Ends the stroke.
    pub fn pointer_up(&mut self) {
        self.stroke = None;
    }

    /// Removes the active tool's layer from `hex`, regardless of the tool's
    /// value. With no tool selected a building is removed.
    pub fn erase_at(&self, hex: Hex) -> TileEdit {
        match self.tool.map(Tool::layer) {
            Some(Layer::Biome) => TileEdit::ClearBiome { hex },
            Some(Layer::Feature) => TileEdit::ClearFeatures { hex },
            Some(Layer::Building) | None => TileEdit::RemoveBuilding { hex },
        }
    }
}
