//! Authoritative coordinate → tile mapping.
//!
//! [`TileStore`] is a value: every edit produces a new store and leaves the
//! old one untouched. Edits are total. An edit that targets a coordinate
//! outside the grid, a blocked tile, or the palace yields a store equal to the
//! input.

use std::sync::Arc;

use bevy::platform::collections::HashMap;
use hexx::Hex;

use crate::kinds::{Biome, Building, Feature};
use crate::tiles::{FeatureSet, Slot, Tile};
use crate::topology::{self, CENTER, RADIUS};

/// A single mutation of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileEdit {
    /// Set or clear a tile's biome.
    SetBiome { hex: Hex, biome: Option<Biome> },
    /// Add the feature if absent, remove it if present.
    ToggleFeature { hex: Hex, feature: Feature },
    /// Write one slot. Refused on blocked tiles and for the palace.
    PlaceBuilding {
        hex: Hex,
        slot: Slot,
        building: Option<Building>,
    },
    /// Remove the second building, else the first unless it is the palace.
    RemoveBuilding { hex: Hex },
    ClearBiome { hex: Hex },
    ClearFeatures { hex: Hex },
    ClearAllBiomes,
    ClearAllFeatures,
    /// Empty every slot except the palace.
    ClearAllBuildings,
    /// Back to the initial layout.
    Reset,
}

/// Full grid snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileStore {
    order: Arc<[Hex]>,
    tiles: HashMap<Hex, Tile>,
}

impl Default for TileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TileStore {
    /// Blank grid with the palace on the center tile.
    pub fn new() -> Self {
        let order: Arc<[Hex]> = topology::all_coordinates(RADIUS).into();
        let tiles = order
            .iter()
            .map(|&hex| {
                let tile = if hex == CENTER {
                    Tile::palace()
                } else {
                    Tile::default()
                };
                (hex, tile)
            })
            .collect();
        Self { order, tiles }
    }

    // ── Reads ──────────────────────────────────────────────────────

    pub fn get(&self, hex: Hex) -> Option<&Tile> {
        self.tiles.get(&hex)
    }

    pub fn contains(&self, hex: Hex) -> bool {
        self.tiles.contains_key(&hex)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles in [`topology::all_coordinates`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Hex, &Tile)> {
        self.order
            .iter()
            .filter_map(|&hex| self.tiles.get(&hex).map(|tile| (hex, tile)))
    }

    /// The six neighbor slots of `hex`; off-grid neighbors are `None`.
    pub fn neighbor_tiles(&self, hex: Hex) -> [Option<&Tile>; 6] {
        topology::neighbors(hex).map(|n| self.tiles.get(&n))
    }

    /// Every `(coordinate, slot)` holding a palace.
    pub fn palace_locations(&self) -> Vec<(Hex, Slot)> {
        self.iter()
            .flat_map(|(hex, tile)| {
                Slot::ALL
                    .into_iter()
                    .filter(move |&slot| tile.building(slot) == Some(Building::Palace))
                    .map(move |slot| (hex, slot))
            })
            .collect()
    }

    // ── Edits ──────────────────────────────────────────────────────

    /// Applies one edit, returning the resulting store.
    pub fn apply(&self, edit: TileEdit) -> TileStore {
        match edit {
            TileEdit::SetBiome { hex, biome } => self.update(hex, |tile| {
                tile.biome = biome;
                true
            }),
            TileEdit::ToggleFeature { hex, feature } => {
                self.update(hex, |tile| toggle_feature(tile, feature))
            }
            TileEdit::PlaceBuilding {
                hex,
                slot,
                building,
            } => self.update(hex, |tile| place_building(tile, slot, building)),
            TileEdit::RemoveBuilding { hex } => self.update(hex, remove_building),
            TileEdit::ClearBiome { hex } => self.update(hex, |tile| {
                tile.biome = None;
                true
            }),
            TileEdit::ClearFeatures { hex } => self.update(hex, |tile| {
                tile.features = FeatureSet::empty();
                true
            }),
            TileEdit::ClearAllBiomes => self.update_all(|tile| tile.biome = None),
            TileEdit::ClearAllFeatures => {
                self.update_all(|tile| tile.features = FeatureSet::empty())
            }
            TileEdit::ClearAllBuildings => self.update_all(|tile| {
                for slot in tile.buildings.iter_mut() {
                    if *slot != Some(Building::Palace) {
                        *slot = None;
                    }
                }
            }),
            TileEdit::Reset => Self::new(),
        }
    }

    pub fn set_biome(&self, hex: Hex, biome: Option<Biome>) -> TileStore {
        self.apply(TileEdit::SetBiome { hex, biome })
    }

    pub fn toggle_feature(&self, hex: Hex, feature: Feature) -> TileStore {
        self.apply(TileEdit::ToggleFeature { hex, feature })
    }

    pub fn place_building(&self, hex: Hex, slot: Slot, building: Option<Building>) -> TileStore {
        self.apply(TileEdit::PlaceBuilding {
            hex,
            slot,
            building,
        })
    }

    pub fn remove_building(&self, hex: Hex) -> TileStore {
        self.apply(TileEdit::RemoveBuilding { hex })
    }

    pub fn clear_biome(&self, hex: Hex) -> TileStore {
        self.apply(TileEdit::ClearBiome { hex })
    }

    pub fn clear_features(&self, hex: Hex) -> TileStore {
        self.apply(TileEdit::ClearFeatures { hex })
    }

    pub fn clear_all_biomes(&self) -> TileStore {
        self.apply(TileEdit::ClearAllBiomes)
    }

    pub fn clear_all_features(&self) -> TileStore {
        self.apply(TileEdit::ClearAllFeatures)
    }

    /// Clears every building slot except the palace.
    pub fn clear_all_buildings(&self) -> TileStore {
        self.apply(TileEdit::ClearAllBuildings)
    }

    pub fn reset(&self) -> TileStore {
        self.apply(TileEdit::Reset)
    }

    /// Copies the store and edits one tile. `edit` returns `false` to refuse,
    /// in which case the copy is discarded and the store returned unchanged.
    fn update(&self, hex: Hex, edit: impl FnOnce(&mut Tile) -> bool) -> TileStore {
        let Some(current) = self.tiles.get(&hex) else {
            return self.clone();
        };
        let mut tile = current.clone();
        if !edit(&mut tile) {
            return self.clone();
        }
        let mut next = self.clone();
        next.tiles.insert(hex, tile);
        next
    }

    fn update_all(&self, edit: impl Fn(&mut Tile)) -> TileStore {
        let mut next = self.clone();
        for tile in next.tiles.values_mut() {
            edit(tile);
        }
        next
    }
}

fn toggle_feature(tile: &mut Tile, feature: Feature) -> bool {
    let flag = FeatureSet::from(feature);
    if tile.features.contains(flag) {
        tile.features.remove(flag);
    } else {
        if feature.is_blocking() {
            tile.features.remove(FeatureSet::BLOCKING);
        }
        tile.features.insert(flag);
    }
    true
}

fn place_building(tile: &mut Tile, slot: Slot, building: Option<Building>) -> bool {
    if tile.is_blocked()
        || building == Some(Building::Palace)
        || tile.building(slot) == Some(Building::Palace)
    {
        return false;
    }
    tile.buildings[slot.index()] = building;
    true
}

fn remove_building(tile: &mut Tile) -> bool {
    if tile.building(Slot::Second).is_some() {
        tile.buildings[Slot::Second.index()] = None;
        true
    } else if tile.building(Slot::First).is_some_and(|b| !b.is_palace()) {
        tile.buildings[Slot::First.index()] = None;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::Kind;

    const EAST: Hex = Hex { x: 1, y: 0 };
    const OUTSIDE: Hex = Hex { x: 5, y: 0 };

    fn assert_single_palace(store: &TileStore) {
        assert_eq!(store.palace_locations(), vec![(CENTER, Slot::First)]);
    }

    fn assert_blocking_exclusive(store: &TileStore) {
        for (hex, tile) in store.iter() {
            let blocking = (tile.features & FeatureSet::BLOCKING).bits().count_ones();
            assert!(blocking <= 1, "{hex:?} holds {blocking} blocking features");
        }
    }

    #[test]
    fn new_store_is_blank_except_palace() {
        let store = TileStore::new();
        assert_eq!(store.len(), 61);
        assert_single_palace(&store);
        for (hex, tile) in store.iter() {
            assert_eq!(tile.biome, None);
            assert!(tile.features.is_empty());
            if hex != CENTER {
                assert_eq!(tile.buildings, [None, None], "{hex:?} should be empty");
            }
        }
    }

    #[test]
    fn iteration_follows_topology_order() {
        let store = TileStore::new();
        let hexes: Vec<Hex> = store.iter().map(|(hex, _)| hex).collect();
        assert_eq!(hexes, topology::all_coordinates(RADIUS));
    }

    #[test]
    fn set_biome_accepts_any_value_and_clear() {
        let store = TileStore::new().set_biome(EAST, Some(Biome::Marine));
        assert_eq!(store.get(EAST).unwrap().biome, Some(Biome::Marine));
        let store = store.set_biome(EAST, Some(Biome::Desert));
        assert_eq!(store.get(EAST).unwrap().biome, Some(Biome::Desert));
        let store = store.set_biome(EAST, None);
        assert_eq!(store.get(EAST).unwrap().biome, None);
    }

    #[test]
    fn edits_do_not_mutate_previous_snapshot() {
        let before = TileStore::new();
        let after = before.set_biome(EAST, Some(Biome::Plains));
        assert_eq!(before.get(EAST).unwrap().biome, None);
        assert_ne!(before, after);
    }

    #[test]
    fn toggle_feature_adds_then_removes() {
        let store = TileStore::new().toggle_feature(EAST, Feature::River);
        assert!(store.get(EAST).unwrap().has_feature(Feature::River));
        let store = store.toggle_feature(EAST, Feature::River);
        assert!(store.get(EAST).unwrap().features.is_empty());
    }

    #[test]
    fn second_blocking_feature_replaces_first() {
        let store = TileStore::new()
            .toggle_feature(EAST, Feature::River)
            .toggle_feature(EAST, Feature::Mountain)
            .toggle_feature(EAST, Feature::Resource);
        let tile = store.get(EAST).unwrap();
        assert_eq!(tile.features, FeatureSet::RIVER | FeatureSet::RESOURCE);
        assert_blocking_exclusive(&store);
    }

    #[test]
    fn river_coexists_with_blocking_feature() {
        let store = TileStore::new()
            .toggle_feature(EAST, Feature::NaturalWonder)
            .toggle_feature(EAST, Feature::River);
        let tile = store.get(EAST).unwrap();
        assert!(tile.has_feature(Feature::NaturalWonder));
        assert!(tile.has_feature(Feature::River));
    }

    #[test]
    fn place_building_writes_requested_slot() {
        let store = TileStore::new()
            .place_building(EAST, Slot::Second, Some(Building::Gold))
            .place_building(EAST, Slot::First, Some(Building::Food));
        let tile = store.get(EAST).unwrap();
        assert_eq!(tile.buildings, [Some(Building::Food), Some(Building::Gold)]);

        let store = store.place_building(EAST, Slot::First, None);
        assert_eq!(store.get(EAST).unwrap().buildings, [None, Some(Building::Gold)]);
    }

    #[test]
    fn place_building_refused_on_blocked_tile() {
        let blocked = TileStore::new().toggle_feature(EAST, Feature::Mountain);
        let after = blocked.place_building(EAST, Slot::First, Some(Building::Culture));
        assert_eq!(after, blocked);
    }

    #[test]
    fn blocking_later_keeps_existing_buildings() {
        let store = TileStore::new()
            .place_building(EAST, Slot::First, Some(Building::Science))
            .toggle_feature(EAST, Feature::Resource);
        let tile = store.get(EAST).unwrap();
        assert!(tile.is_blocked());
        assert_eq!(tile.building(Slot::First), Some(Building::Science));

        let store = store.toggle_feature(EAST, Feature::Resource);
        assert_eq!(
            store.get(EAST).unwrap().visible_buildings(),
            vec![(Slot::First, Building::Science)]
        );
    }

    #[test]
    fn palace_cannot_be_placed_overwritten_or_cleared() {
        let store = TileStore::new();
        let elsewhere = store.place_building(EAST, Slot::First, Some(Building::Palace));
        assert_eq!(elsewhere, store);
        let overwrite = store.place_building(CENTER, Slot::First, Some(Building::Wonder));
        assert_eq!(overwrite, store);
        let cleared = store.place_building(CENTER, Slot::First, None);
        assert_eq!(cleared, store);
        assert_single_palace(&store.remove_building(CENTER));
    }

    #[test]
    fn remove_building_takes_second_slot_first() {
        let store = TileStore::new()
            .place_building(EAST, Slot::First, Some(Building::Food))
            .place_building(EAST, Slot::Second, Some(Building::Gold));
        let store = store.remove_building(EAST);
        assert_eq!(store.get(EAST).unwrap().buildings, [Some(Building::Food), None]);
        let store = store.remove_building(EAST);
        assert_eq!(store.get(EAST).unwrap().buildings, [None, None]);
        let again = store.remove_building(EAST);
        assert_eq!(again, store);
    }

    #[test]
    fn remove_building_on_center_only_clears_second_slot() {
        let store = TileStore::new()
            .place_building(CENTER, Slot::Second, Some(Building::Warehouse))
            .remove_building(CENTER)
            .remove_building(CENTER);
        assert_eq!(
            store.get(CENTER).unwrap().buildings,
            [Some(Building::Palace), None]
        );
    }

    #[test]
    fn clear_single_tile_layers() {
        let store = TileStore::new()
            .set_biome(EAST, Some(Biome::Tundra))
            .toggle_feature(EAST, Feature::River)
            .toggle_feature(EAST, Feature::Mountain);
        let store = store.clear_biome(EAST).clear_features(EAST);
        assert_eq!(store.get(EAST).unwrap(), &Tile::default());
    }

    #[test]
    fn every_edit_outside_the_grid_is_a_no_op() {
        let store = TileStore::new().set_biome(EAST, Some(Biome::Plains));
        let edits = [
            TileEdit::SetBiome {
                hex: OUTSIDE,
                biome: Some(Biome::Marine),
            },
            TileEdit::ToggleFeature {
                hex: OUTSIDE,
                feature: Feature::River,
            },
            TileEdit::PlaceBuilding {
                hex: OUTSIDE,
                slot: Slot::First,
                building: Some(Building::Food),
            },
            TileEdit::RemoveBuilding { hex: OUTSIDE },
            TileEdit::ClearBiome { hex: OUTSIDE },
            TileEdit::ClearFeatures { hex: OUTSIDE },
        ];
        for edit in edits {
            assert_eq!(store.apply(edit), store, "{edit:?} changed the store");
        }
    }

    #[test]
    fn bulk_clears_blank_only_their_layer() {
        let store = TileStore::new()
            .set_biome(EAST, Some(Biome::Grassland))
            .toggle_feature(EAST, Feature::River)
            .place_building(EAST, Slot::First, Some(Building::Food))
            .place_building(CENTER, Slot::Second, Some(Building::Culture));

        let no_biomes = store.clear_all_biomes();
        assert_eq!(no_biomes.get(EAST).unwrap().biome, None);
        assert!(no_biomes.get(EAST).unwrap().has_feature(Feature::River));

        let no_features = store.clear_all_features();
        assert!(no_features.get(EAST).unwrap().features.is_empty());
        assert_eq!(no_features.get(EAST).unwrap().biome, Some(Biome::Grassland));

        let no_buildings = store.clear_all_buildings();
        assert_eq!(no_buildings.get(EAST).unwrap().buildings, [None, None]);
        assert_eq!(no_buildings.get(EAST).unwrap().biome, Some(Biome::Grassland));
        assert_single_palace(&no_buildings);
        assert_eq!(
            no_buildings.get(CENTER).unwrap().buildings,
            [Some(Building::Palace), None]
        );
    }

    #[test]
    fn bulk_clears_are_idempotent() {
        let store = TileStore::new()
            .set_biome(EAST, Some(Biome::Grassland))
            .toggle_feature(EAST, Feature::Resource);
        let once = store.clear_all_biomes();
        assert_eq!(once.clear_all_biomes(), once);
        let once = store.clear_all_features();
        assert_eq!(once.clear_all_features(), once);
        let once = store.clear_all_buildings();
        assert_eq!(once.clear_all_buildings(), once);
    }

    #[test]
    fn reset_restores_initial_layout() {
        let store = TileStore::new()
            .set_biome(CENTER, Some(Biome::Desert))
            .toggle_feature(EAST, Feature::Mountain)
            .place_building(Hex { x: -1, y: 0 }, Slot::First, Some(Building::Wonder));
        assert_eq!(store.reset(), TileStore::new());
    }

    #[test]
    fn invariants_hold_across_an_edit_sequence() {
        let ring_one = topology::neighbors(CENTER);
        let mut store = TileStore::new();
        for (i, &hex) in ring_one.iter().chain([CENTER, OUTSIDE].iter()).enumerate() {
            let feature = Feature::ALL[i % Feature::ALL.len()];
            let building = Building::ALL[i % Building::ALL.len()];
            store = store
                .toggle_feature(hex, feature)
                .toggle_feature(hex, Feature::Mountain)
                .place_building(hex, Slot::First, Some(building))
                .place_building(hex, Slot::Second, Some(Building::Palace))
                .remove_building(hex)
                .toggle_feature(hex, Feature::Mountain)
                .place_building(hex, Slot::First, Some(building));
            assert_single_palace(&store);
            assert_blocking_exclusive(&store);
        }
        store = store.clear_all_buildings();
        assert_single_palace(&store);
    }
}
