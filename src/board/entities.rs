use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use hexx::{Hex, HexLayout};

use crate::kinds::Biome;

/// Marker for the top-down board camera.
#[derive(Component, Reflect)]
pub struct BoardCamera;

/// Marker on hex face entities.
#[derive(Component, Reflect)]
pub struct TileFace {
    /// The hex coordinate this face represents.
    pub hex: Hex,
}

/// Maps between hex coordinates and positions on the ground plane (`y = 0`).
#[derive(Resource, Clone, Debug)]
pub struct BoardLayout {
    layout: HexLayout,
    corner_offsets: [Vec2; 6],
}

impl BoardLayout {
    pub fn new(hex_size: f32) -> Self {
        let layout = HexLayout {
            scale: Vec2::splat(hex_size),
            ..default()
        };
        let corners = layout.center_aligned_hex_corners();
        Self {
            layout,
            corner_offsets: std::array::from_fn(|i| corners[i]),
        }
    }

    /// Layout the face mesh is built from.
    pub fn hex_layout(&self) -> &HexLayout {
        &self.layout
    }

    pub fn hex_to_world(&self, hex: Hex) -> Vec3 {
        let pos = self.layout.hex_to_world_pos(hex);
        Vec3::new(pos.x, 0.0, pos.y)
    }

    pub fn world_to_hex(&self, pos: Vec3) -> Hex {
        self.layout.world_pos_to_hex(Vec2::new(pos.x, pos.z))
    }

    /// Corners of `hex` pulled toward its center by `scale`, lifted to `y`.
    pub fn corners(&self, hex: Hex, scale: f32, y: f32) -> [Vec3; 6] {
        let center = self.layout.hex_to_world_pos(hex);
        self.corner_offsets.map(|c| {
            let p = center + c * scale;
            Vec3::new(p.x, y, p.y)
        })
    }

    /// The side of `hex` shared with `neighbor`.
    pub fn shared_edge(&self, hex: Hex, neighbor: Hex, y: f32) -> (Vec3, Vec3) {
        let mid = (self.hex_to_world(hex) + self.hex_to_world(neighbor)) / 2.0;
        let mut corners = self.corners(hex, 1.0, y);
        let dist = |p: &Vec3| Vec2::new(p.x - mid.x, p.z - mid.z).length_squared();
        corners.sort_by(|a, b| dist(a).total_cmp(&dist(b)));
        (corners[0], corners[1])
    }
}

/// Face materials, one per biome plus one for unpainted tiles.
#[derive(Resource)]
pub struct BiomePalette {
    pub empty: Handle<StandardMaterial>,
    pub biomes: HashMap<Biome, Handle<StandardMaterial>>,
}

impl BiomePalette {
    pub fn material(&self, biome: Option<Biome>) -> Handle<StandardMaterial> {
        biome
            .and_then(|b| self.biomes.get(&b))
            .unwrap_or(&self.empty)
            .clone()
    }
}

/// Left-button stroke as seen by pointer capture.
#[derive(Resource, Default, Debug)]
pub struct PointerStroke {
    /// A `PointerDown` was sent and not yet closed.
    pub active: bool,
    /// Hex under the cursor on the previous frame.
    pub hex: Option<Hex>,
}
