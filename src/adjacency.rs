//! Per-building adjacency bonuses derived from the six neighboring tiles.
//!
//! The bonus map is a pure function of a [`TileStore`]; recompute it after
//! every committed edit rather than patching it.

use bevy::platform::collections::HashMap;
use hexx::Hex;

use crate::kinds::{Biome, Building, Feature};
use crate::store::TileStore;
use crate::tiles::{Slot, Tile};

/// Bonus per occupied slot of one tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotBonuses([Option<u32>; 2]);

impl SlotBonuses {
    /// Bonus for `slot`, or `None` when the slot is empty.
    pub fn get(&self, slot: Slot) -> Option<u32> {
        self.0[slot.index()]
    }

    fn set(&mut self, slot: Slot, bonus: u32) {
        self.0[slot.index()] = Some(bonus);
    }
}

/// Bonuses for every tile holding at least one building.
pub type AdjacencyMap = HashMap<Hex, SlotBonuses>;

/// Neighbor tiles in direction order; `None` for off-grid coordinates.
pub type Neighborhood<'a> = [Option<&'a Tile>; 6];

/// Bonus text for the help panel, one entry per rule group.
pub const RULES: [(&str, &str); 4] = [
    ("Palace", "+1 per adjacent Quarter (tile with 2 buildings)"),
    (
        "Culture / Happiness",
        "+1 per Mountain, Natural Wonder tile, or Wonder building",
    ),
    (
        "Food / Gold",
        "+1 per Navigable River, Marine biome, or Wonder building",
    ),
    (
        "Science / Production",
        "+1 per adjacent Resource tile or Wonder building",
    ),
];

/// Computes the bonus of every occupied slot in the grid.
pub fn compute_adjacency(store: &TileStore) -> AdjacencyMap {
    let mut map = AdjacencyMap::default();
    for (hex, tile) in store.iter() {
        if tile.occupied_slots() == 0 {
            continue;
        }
        let neighbors = store.neighbor_tiles(hex);
        let mut bonuses = SlotBonuses::default();
        for slot in Slot::ALL {
            if let Some(building) = tile.building(slot) {
                bonuses.set(slot, building_bonus(building, &neighbors));
            }
        }
        map.insert(hex, bonuses);
    }
    map
}

/// Bonus a building of kind `building` earns from `neighbors`.
pub fn building_bonus(building: Building, neighbors: &Neighborhood) -> u32 {
    match building {
        Building::Palace => palace_bonus(neighbors),
        Building::Science | Building::Production => {
            count(neighbors, |n| score(n.has_feature(Feature::Resource)) + wonder(n))
        }
        Building::Food | Building::Gold => count(neighbors, |n| {
            score(n.has_feature(Feature::River)) + score(n.biome == Some(Biome::Marine)) + wonder(n)
        }),
        Building::Culture | Building::Happiness => count(neighbors, |n| {
            score(n.has_feature(Feature::Mountain))
                + score(n.has_feature(Feature::NaturalWonder))
                + wonder(n)
        }),
        Building::Warehouse | Building::Wonder => 0,
    }
}

/// Number of neighboring quarters.
pub fn palace_bonus(neighbors: &Neighborhood) -> u32 {
    count(neighbors, |n| score(n.is_quarter()))
}

fn count(neighbors: &Neighborhood, points: impl Fn(&Tile) -> u32) -> u32 {
    neighbors.iter().flatten().map(|&n| points(n)).sum()
}

fn wonder(tile: &Tile) -> u32 {
    score(tile.has_building(Building::Wonder))
}

fn score(hit: bool) -> u32 {
    u32::from(hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::Kind;
    use crate::tiles::FeatureSet;
    use crate::topology::{self, CENTER};

    const EAST: Hex = Hex { x: 1, y: 0 };

    fn bonus(map: &AdjacencyMap, hex: Hex, slot: Slot) -> Option<u32> {
        map.get(&hex).and_then(|b| b.get(slot))
    }

    fn tile_with(features: FeatureSet, biome: Option<Biome>, wonder: bool) -> Tile {
        Tile {
            biome,
            features,
            buildings: [wonder.then_some(Building::Wonder), None],
        }
    }

    #[test]
    fn initial_grid_only_scores_the_palace() {
        let map = compute_adjacency(&TileStore::new());
        assert_eq!(map.len(), 1);
        assert_eq!(bonus(&map, CENTER, Slot::First), Some(0));
        assert_eq!(bonus(&map, CENTER, Slot::Second), None);
    }

    #[test]
    fn food_counts_river_marine_and_wonder() {
        let ring = topology::neighbors(EAST);
        let store = TileStore::new()
            .place_building(EAST, Slot::First, Some(Building::Food))
            .toggle_feature(ring[0], Feature::River)
            .set_biome(ring[1], Some(Biome::Marine))
            .place_building(ring[2], Slot::First, Some(Building::Wonder));
        let map = compute_adjacency(&store);
        assert_eq!(bonus(&map, EAST, Slot::First), Some(3));
    }

    #[test]
    fn single_neighbor_can_score_every_condition() {
        let rich = tile_with(FeatureSet::RIVER, Some(Biome::Marine), true);
        let neighbors: Neighborhood = [Some(&rich), None, None, None, None, None];
        assert_eq!(building_bonus(Building::Gold, &neighbors), 3);
        assert_eq!(building_bonus(Building::Science, &neighbors), 1);
        assert_eq!(building_bonus(Building::Culture, &neighbors), 1);
    }

    #[test]
    fn science_counts_resource_and_wonder() {
        let resource = tile_with(FeatureSet::RESOURCE, None, false);
        let both = tile_with(FeatureSet::RESOURCE, None, true);
        let river = tile_with(FeatureSet::RIVER, Some(Biome::Marine), false);
        let neighbors: Neighborhood =
            [Some(&resource), Some(&both), Some(&river), None, None, None];
        assert_eq!(building_bonus(Building::Science, &neighbors), 3);
        assert_eq!(building_bonus(Building::Production, &neighbors), 3);
    }

    #[test]
    fn culture_counts_mountain_natural_wonder_and_wonder() {
        let mountain = tile_with(FeatureSet::MOUNTAIN, None, false);
        let natural = tile_with(FeatureSet::NATURAL_WONDER | FeatureSet::RIVER, None, true);
        let neighbors: Neighborhood = [Some(&mountain), Some(&natural), None, None, None, None];
        assert_eq!(building_bonus(Building::Culture, &neighbors), 3);
        assert_eq!(building_bonus(Building::Happiness, &neighbors), 3);
    }

    #[test]
    fn warehouse_and_wonder_never_score() {
        let rich = tile_with(
            FeatureSet::RESOURCE | FeatureSet::RIVER,
            Some(Biome::Marine),
            true,
        );
        let neighbors: Neighborhood = [Some(&rich); 6];
        assert_eq!(building_bonus(Building::Warehouse, &neighbors), 0);
        assert_eq!(building_bonus(Building::Wonder, &neighbors), 0);
    }

    #[test]
    fn palace_counts_neighboring_quarters() {
        let ring = topology::neighbors(CENTER);
        let mut store = TileStore::new();
        for &hex in &ring[..2] {
            store = store
                .place_building(hex, Slot::First, Some(Building::Food))
                .place_building(hex, Slot::Second, Some(Building::Gold));
        }
        store = store.place_building(ring[3], Slot::First, Some(Building::Culture));
        let map = compute_adjacency(&store);
        assert_eq!(bonus(&map, CENTER, Slot::First), Some(2));
    }

    #[test]
    fn center_with_second_building_is_a_quarter_for_neighbors() {
        let store = TileStore::new()
            .place_building(CENTER, Slot::Second, Some(Building::Science))
            .place_building(EAST, Slot::First, Some(Building::Culture));
        let map = compute_adjacency(&store);
        let neighbors = store.neighbor_tiles(EAST);
        assert_eq!(palace_bonus(&neighbors), 1);
        assert_eq!(bonus(&map, CENTER, Slot::Second), Some(0));
    }

    #[test]
    fn off_grid_neighbors_contribute_nothing() {
        let corner = Hex { x: 4, y: 0 };
        let store = TileStore::new().place_building(corner, Slot::First, Some(Building::Food));
        let neighbors = store.neighbor_tiles(corner);
        assert_eq!(neighbors.iter().filter(|n| n.is_none()).count(), 3);
        assert_eq!(bonus(&compute_adjacency(&store), corner, Slot::First), Some(0));
    }

    #[test]
    fn map_covers_only_occupied_slots() {
        let store = TileStore::new()
            .place_building(EAST, Slot::First, Some(Building::Food))
            .set_biome(Hex { x: -1, y: 0 }, Some(Biome::Marine));
        let map = compute_adjacency(&store);
        assert_eq!(map.len(), 2);
        assert!(map.get(&Hex { x: -1, y: 0 }).is_none());
        assert_eq!(bonus(&map, EAST, Slot::Second), None);
    }

    #[test]
    fn every_placeable_building_has_a_rule_or_zero() {
        let empty: Neighborhood = [None; 6];
        for &building in Building::ALL {
            assert_eq!(building_bonus(building, &empty), 0, "{building} on empty map");
        }
    }
}
