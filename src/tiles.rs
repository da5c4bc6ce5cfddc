//! Per-tile layered data: biome, feature set, and two building slots.

use bevy::prelude::*;
use bitflags::bitflags;

use crate::kinds::{Biome, Building, Feature, Kind};

bitflags! {
    /// Terrain features present on a tile.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FeatureSet: u8 {
        const MOUNTAIN = 0b0001;
        const NATURAL_WONDER = 0b0010;
        const RESOURCE = 0b0100;
        const RIVER = 0b1000;
    }
}

impl From<Feature> for FeatureSet {
    fn from(feature: Feature) -> Self {
        match feature {
            Feature::Mountain => Self::MOUNTAIN,
            Feature::NaturalWonder => Self::NATURAL_WONDER,
            Feature::Resource => Self::RESOURCE,
            Feature::River => Self::RIVER,
        }
    }
}

impl FeatureSet {
    /// Union of every blocking feature.
    pub const BLOCKING: Self = Self::MOUNTAIN
        .union(Self::NATURAL_WONDER)
        .union(Self::RESOURCE);

    pub fn has(self, feature: Feature) -> bool {
        self.contains(feature.into())
    }

    /// Present features, in vocabulary order.
    pub fn features(self) -> impl Iterator<Item = Feature> {
        Feature::ALL.iter().copied().filter(move |&f| self.has(f))
    }

    /// The blocking feature, if any. There is never more than one.
    pub fn blocking(self) -> Option<Feature> {
        self.features().find(|f| f.is_blocking())
    }
}

/// One of a tile's two building positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub enum Slot {
    /// Slot 0. Holds the palace on the center tile.
    First,
    /// Slot 1.
    Second,
}

impl Slot {
    pub const ALL: [Self; 2] = [Self::First, Self::Second];

    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

/// Contents of one grid cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tile {
    pub biome: Option<Biome>,
    pub features: FeatureSet,
    pub buildings: [Option<Building>; 2],
}

impl Tile {
    /// Empty tile with the palace in the first slot.
    pub fn palace() -> Self {
        Self {
            buildings: [Some(Building::Palace), None],
            ..default()
        }
    }

    pub fn building(&self, slot: Slot) -> Option<Building> {
        self.buildings[slot.index()]
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.has(feature)
    }

    pub fn has_building(&self, building: Building) -> bool {
        self.buildings.contains(&Some(building))
    }

    pub fn blocking_feature(&self) -> Option<Feature> {
        self.features.blocking()
    }

    /// A blocking feature gates building placement and hides existing buildings.
    pub fn is_blocked(&self) -> bool {
        self.features.intersects(FeatureSet::BLOCKING)
    }

    pub fn occupied_slots(&self) -> usize {
        self.buildings.iter().flatten().count()
    }

    /// Both slots occupied.
    pub fn is_quarter(&self) -> bool {
        self.occupied_slots() >= 2
    }

    pub fn is_palace_tile(&self) -> bool {
        self.building(Slot::First) == Some(Building::Palace)
    }

    /// Occupied slots that should be drawn. Buildings under a blocking feature
    /// are kept but not shown.
    pub fn visible_buildings(&self) -> Vec<(Slot, Building)> {
        if self.is_blocked() {
            return Vec::new();
        }
        Slot::ALL
            .into_iter()
            .filter_map(|slot| self.building(slot).map(|b| (slot, b)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocking_mask_matches_vocabulary() {
        for &feature in Feature::ALL {
            assert_eq!(
                FeatureSet::BLOCKING.has(feature),
                feature.is_blocking(),
                "{feature} blocking flag disagrees"
            );
        }
    }

    #[test]
    fn river_alone_does_not_block() {
        let tile = Tile {
            features: FeatureSet::RIVER,
            ..default()
        };
        assert!(!tile.is_blocked());
        assert_eq!(tile.blocking_feature(), None);
    }

    #[test]
    fn blocking_feature_is_reported_next_to_river() {
        let tile = Tile {
            features: FeatureSet::RIVER | FeatureSet::RESOURCE,
            ..default()
        };
        assert!(tile.is_blocked());
        assert_eq!(tile.blocking_feature(), Some(Feature::Resource));
        assert_eq!(
            tile.features.features().collect::<Vec<_>>(),
            vec![Feature::Resource, Feature::River]
        );
    }

    #[test]
    fn quarter_needs_both_slots() {
        let mut tile = Tile::default();
        assert!(!tile.is_quarter());
        tile.buildings[0] = Some(Building::Food);
        assert!(!tile.is_quarter());
        tile.buildings[1] = Some(Building::Gold);
        assert!(tile.is_quarter());
        assert_eq!(tile.occupied_slots(), 2);
    }

    #[test]
    fn blocked_tile_hides_but_keeps_buildings() {
        let mut tile = Tile {
            buildings: [Some(Building::Science), None],
            ..default()
        };
        assert_eq!(
            tile.visible_buildings(),
            vec![(Slot::First, Building::Science)]
        );
        tile.features = FeatureSet::MOUNTAIN;
        assert!(tile.visible_buildings().is_empty());
        assert_eq!(tile.building(Slot::First), Some(Building::Science));
    }

    #[test]
    fn palace_tile_holds_palace_in_first_slot() {
        let tile = Tile::palace();
        assert!(tile.is_palace_tile());
        assert!(tile.has_building(Building::Palace));
        assert_eq!(tile.building(Slot::Second), None);
    }
}
