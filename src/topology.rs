//! Pure hex-grid geometry over axial coordinates.
//!
//! Coordinates are [`hexx::Hex`] values where `x` is the axial `q` and `y` the
//! axial `r`. Nothing in this module holds state.

use hexx::Hex;

/// Number of rings around the center; yields 61 tiles.
pub const RADIUS: u32 = 4;

/// Outermost ring of the playable city. Ring [`RADIUS`] only exists so the
/// city-limits boundary has something to face.
pub const CITY_LIMIT_RING: u32 = 3;

/// The palace tile.
pub const CENTER: Hex = Hex { x: 0, y: 0 };

/// Axial neighbor offsets, in the order [`neighbors`] returns them.
pub const DIRECTIONS: [Hex; 6] = [
    Hex { x: 1, y: 0 },
    Hex { x: 1, y: -1 },
    Hex { x: 0, y: -1 },
    Hex { x: -1, y: 0 },
    Hex { x: -1, y: 1 },
    Hex { x: 0, y: 1 },
];

/// One side of a ring-3 tile that faces ring 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryEdge {
    /// Tile on the inner side of the boundary.
    pub hex: Hex,
    /// Index into [`DIRECTIONS`] pointing across the boundary.
    pub direction: usize,
}

impl BoundaryEdge {
    /// Tile on the outer side of the boundary.
    pub fn outer(&self) -> Hex {
        self.hex + DIRECTIONS[self.direction]
    }
}

/// Every coordinate within `radius` of the center.
///
/// Ordered by `q` ascending, then `r` ascending within each column.
pub fn all_coordinates(radius: u32) -> Vec<Hex> {
    let radius = radius as i32;
    let mut hexes = Vec::new();
    for q in -radius..=radius {
        let r_min = (-radius).max(-q - radius);
        let r_max = radius.min(-q + radius);
        for r in r_min..=r_max {
            hexes.push(Hex { x: q, y: r });
        }
    }
    hexes
}

/// The six adjacent coordinates; some may lie outside the grid.
pub fn neighbors(hex: Hex) -> [Hex; 6] {
    DIRECTIONS.map(|dir| hex + dir)
}

/// Hex distance from [`CENTER`].
pub fn ring(hex: Hex) -> u32 {
    hex.x
        .unsigned_abs()
        .max(hex.y.unsigned_abs())
        .max((hex.x + hex.y).unsigned_abs())
}

/// Whether `hex` belongs to the fixed grid.
pub fn in_grid(hex: Hex) -> bool {
    ring(hex) <= RADIUS
}

/// Edges separating the playable city from the outer ring.
pub fn city_limit_edges() -> Vec<BoundaryEdge> {
    all_coordinates(RADIUS)
        .into_iter()
        .filter(|&hex| ring(hex) == CITY_LIMIT_RING)
        .flat_map(|hex| {
            (0..DIRECTIONS.len()).map(move |direction| BoundaryEdge { hex, direction })
        })
        .filter(|edge| ring(edge.outer()) == RADIUS)
        .collect()
}
