//! Fixed vocabularies painted onto the grid: biomes, terrain features and
//! buildings.
//!
//! Every kind has a stable camelCase identifier (`"naturalWonder"`) that
//! round-trips through [`Display`](fmt::Display) and [`FromStr`], a human
//! label, and (except the palace) a single-letter hotkey.

use std::fmt;
use std::str::FromStr;

use bevy::prelude::*;
use thiserror::Error;

/// Rejected identifier when parsing a vocabulary kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {category} identifier '{id}'")]
pub struct UnknownKind {
    /// Vocabulary the identifier was checked against (`"biome"`, ...).
    pub category: &'static str,
    /// The identifier as given.
    pub id: String,
}

/// Shared surface of the three vocabularies.
pub trait Kind: Copy + Eq + 'static {
    /// Vocabulary name used in parse errors.
    const CATEGORY: &'static str;
    /// Every member, in toolbar order.
    const ALL: &'static [Self];

    /// Stable identifier.
    fn id(self) -> &'static str;
    /// Human-readable label.
    fn label(self) -> &'static str;
    /// Tool hotkey, if the kind can be selected as a tool.
    fn hotkey(self) -> Option<char>;
}

/// Looks up a kind by its stable identifier.
pub fn parse_kind<K: Kind>(id: &str) -> Result<K, UnknownKind> {
    K::ALL
        .iter()
        .copied()
        .find(|kind| kind.id() == id)
        .ok_or_else(|| UnknownKind {
            category: K::CATEGORY,
            id: id.to_string(),
        })
}

/// Finds the kind bound to a hotkey (case-insensitive).
pub fn kind_for_hotkey<K: Kind>(key: char) -> Option<K> {
    let key = key.to_ascii_lowercase();
    K::ALL.iter().copied().find(|kind| kind.hotkey() == Some(key))
}

// ── Biome ──────────────────────────────────────────────────────────

/// Base terrain of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Biome {
    Grassland,
    Plains,
    Tundra,
    Desert,
    Tropical,
    Marine,
}

impl Kind for Biome {
    const CATEGORY: &'static str = "biome";
    const ALL: &'static [Self] = &[
        Self::Grassland,
        Self::Plains,
        Self::Tundra,
        Self::Desert,
        Self::Tropical,
        Self::Marine,
    ];

    fn id(self) -> &'static str {
        match self {
            Self::Grassland => "grassland",
            Self::Plains => "plains",
            Self::Tundra => "tundra",
            Self::Desert => "desert",
            Self::Tropical => "tropical",
            Self::Marine => "marine",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Grassland => "Grassland",
            Self::Plains => "Plains",
            Self::Tundra => "Tundra",
            Self::Desert => "Desert",
            Self::Tropical => "Tropical",
            Self::Marine => "Marine",
        }
    }

    fn hotkey(self) -> Option<char> {
        Some(match self {
            Self::Grassland => 'z',
            Self::Plains => 'x',
            Self::Tundra => 'c',
            Self::Desert => 'v',
            Self::Tropical => 'b',
            Self::Marine => 'n',
        })
    }
}

// ── Feature ────────────────────────────────────────────────────────

/// Terrain feature layered on top of the biome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Feature {
    Mountain,
    NaturalWonder,
    Resource,
    River,
}

impl Feature {
    /// Blocking features forbid building placement on their tile, and at most
    /// one of them may be present at a time.
    pub fn is_blocking(self) -> bool {
        !matches!(self, Self::River)
    }
}

impl Kind for Feature {
    const CATEGORY: &'static str = "feature";
    const ALL: &'static [Self] = &[
        Self::Mountain,
        Self::NaturalWonder,
        Self::Resource,
        Self::River,
    ];

    fn id(self) -> &'static str {
        match self {
            Self::Mountain => "mountain",
            Self::NaturalWonder => "naturalWonder",
            Self::Resource => "resource",
            Self::River => "river",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Mountain => "Mountain",
            Self::NaturalWonder => "Natural Wonder",
            Self::Resource => "Resource",
            Self::River => "Navigable River",
        }
    }

    fn hotkey(self) -> Option<char> {
        Some(match self {
            Self::Mountain => 'a',
            Self::NaturalWonder => 's',
            Self::Resource => 'd',
            Self::River => 'f',
        })
    }
}

// ── Building ───────────────────────────────────────────────────────

/// Building occupying one of a tile's two slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Building {
    Culture,
    Happiness,
    Food,
    Gold,
    Science,
    Production,
    Warehouse,
    Wonder,
    /// System-assigned to the center tile; never painted, never removed.
    Palace,
}

impl Building {
    /// Buildings a user may paint, in toolbar order.
    pub const PLACEABLE: [Self; 8] = [
        Self::Culture,
        Self::Happiness,
        Self::Food,
        Self::Gold,
        Self::Science,
        Self::Production,
        Self::Warehouse,
        Self::Wonder,
    ];

    pub fn is_palace(self) -> bool {
        self == Self::Palace
    }
}

impl Kind for Building {
    const CATEGORY: &'static str = "building";
    const ALL: &'static [Self] = &[
        Self::Culture,
        Self::Happiness,
        Self::Food,
        Self::Gold,
        Self::Science,
        Self::Production,
        Self::Warehouse,
        Self::Wonder,
        Self::Palace,
    ];

    fn id(self) -> &'static str {
        match self {
            Self::Culture => "culture",
            Self::Happiness => "happiness",
            Self::Food => "food",
            Self::Gold => "gold",
            Self::Science => "science",
            Self::Production => "production",
            Self::Warehouse => "warehouse",
            Self::Wonder => "wonder",
            Self::Palace => "palace",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Culture => "Culture",
            Self::Happiness => "Happiness",
            Self::Food => "Food",
            Self::Gold => "Gold",
            Self::Science => "Science",
            Self::Production => "Production",
            Self::Warehouse => "Warehouse",
            Self::Wonder => "Wonder",
            Self::Palace => "Palace",
        }
    }

    fn hotkey(self) -> Option<char> {
        match self {
            Self::Culture => Some('q'),
            Self::Happiness => Some('w'),
            Self::Food => Some('e'),
            Self::Gold => Some('r'),
            Self::Science => Some('t'),
            Self::Production => Some('y'),
            Self::Warehouse => Some('u'),
            Self::Wonder => Some('i'),
            Self::Palace => None,
        }
    }
}

// ── Display / FromStr ──────────────────────────────────────────────

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl fmt::Display for Building {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Biome {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_kind(s)
    }
}

impl FromStr for Feature {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_kind(s)
    }
}

impl FromStr for Building {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_kind(s)
    }
}
