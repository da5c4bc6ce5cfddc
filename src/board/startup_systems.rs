use bevy::asset::RenderAssetUsages;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::mesh::Indices;
use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use hexx::PlaneMeshBuilder;

use super::BoardConfig;
use super::entities::{BiomePalette, BoardCamera, BoardLayout, TileFace};
use crate::kinds::{Biome, Kind};
use crate::planner::CityGrid;
use crate::topology::{self, RADIUS};

// ── Startup ─────────────────────────────────────────────────────────

/// Spawns the camera, the biome palette and one face per grid coordinate.
pub fn spawn_board(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<BoardConfig>,
    layout: Res<BoardLayout>,
    grid: Res<CityGrid>,
) {
    commands.spawn((
        BoardCamera,
        Name::new("BoardCamera"),
        Camera3d::default(),
        Tonemapping::None,
        Transform::from_xyz(0.0, cfg.camera_height, 0.0).looking_at(Vec3::ZERO, Vec3::NEG_Z),
    ));

    let mut flat = |color: Color| {
        materials.add(StandardMaterial {
            base_color: color,
            unlit: true,
            ..default()
        })
    };
    let palette = BiomePalette {
        empty: flat(Color::srgb(0.16, 0.17, 0.2)),
        biomes: Biome::ALL
            .iter()
            .map(|&biome| (biome, flat(biome_color(biome))))
            .collect::<HashMap<_, _>>(),
    };

    let mesh_info = PlaneMeshBuilder::new(layout.hex_layout()).build();
    let hex_mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, mesh_info.vertices)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, mesh_info.normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, mesh_info.uvs)
    .with_inserted_indices(Indices::U16(mesh_info.indices));
    let hex_mesh_handle = meshes.add(hex_mesh);

    let board = commands
        .spawn((
            Name::new("Board"),
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    for hex in topology::all_coordinates(RADIUS) {
        let biome = grid.get(hex).and_then(|tile| tile.biome);
        let face = commands
            .spawn((
                TileFace { hex },
                Name::new(format!("TileFace({},{})", hex.x, hex.y)),
                Mesh3d(hex_mesh_handle.clone()),
                MeshMaterial3d(palette.material(biome)),
                Transform::from_translation(layout.hex_to_world(hex))
                    .with_scale(Vec3::new(cfg.face_inset, 1.0, cfg.face_inset)),
            ))
            .id();
        commands.entity(board).add_child(face);
    }

    commands.insert_resource(palette);
}

fn biome_color(biome: Biome) -> Color {
    match biome {
        Biome::Grassland => Color::srgb(0.36, 0.62, 0.25),
        Biome::Plains => Color::srgb(0.74, 0.7, 0.36),
        Biome::Tundra => Color::srgb(0.55, 0.6, 0.58),
        Biome::Desert => Color::srgb(0.9, 0.78, 0.5),
        Biome::Tropical => Color::srgb(0.12, 0.48, 0.3),
        Biome::Marine => Color::srgb(0.2, 0.45, 0.78),
    }
}
