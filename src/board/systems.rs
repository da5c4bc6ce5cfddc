use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{EguiContext, PrimaryEguiContext, egui};
use hexx::Hex;

use super::BoardConfig;
use super::entities::{BiomePalette, BoardCamera, BoardLayout, PointerStroke, TileFace};
use crate::adjacency::AdjacencyMap;
use crate::kinds::{Building, Feature};
use crate::planner::{Adjacency, CityGrid, PlannerCommand};
use crate::tiles::{Slot, Tile};
use crate::topology::{self, CENTER};

const OUTLINE_Y: f32 = 0.01;

// ── Pointer ─────────────────────────────────────────────────────────

/// Mouse buttons relevant to painting, sampled once per frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerButtons {
    /// Paint button went down this frame.
    pub paint_pressed: bool,
    /// Paint button is currently held.
    pub paint_held: bool,
    /// Erase button went down this frame.
    pub erase_pressed: bool,
}

/// Where the cursor is this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Outside the window.
    Outside,
    /// Inside the window but not over a grid tile (off the grid or over a
    /// panel).
    OffBoard,
    /// Over a grid tile.
    Tile(Hex),
}

impl Cursor {
    fn hex(self) -> Option<Hex> {
        match self {
            Self::Tile(hex) => Some(hex),
            Self::Outside | Self::OffBoard => None,
        }
    }
}

/// Commands produced by one frame of pointer state.
///
/// A stroke survives the cursor crossing panels or empty board space while
/// the button stays down, and resumes on the next tile entered. It ends on
/// release or when the cursor leaves the window.
pub fn pointer_commands(
    stroke: &mut PointerStroke,
    cursor: Cursor,
    buttons: PointerButtons,
) -> Vec<PlannerCommand> {
    let mut out = Vec::new();
    let hex = cursor.hex();
    if let (true, Some(hex)) = (buttons.erase_pressed, hex) {
        out.push(PlannerCommand::EraseAt(hex));
    }
    if buttons.paint_pressed {
        if let Some(hex) = hex {
            out.push(PlannerCommand::PointerDown(hex));
            stroke.active = true;
        }
    } else if stroke.active {
        if !buttons.paint_held || cursor == Cursor::Outside {
            out.push(PlannerCommand::PointerUp);
            stroke.active = false;
        } else if let Some(hex) = hex
            && stroke.hex != Some(hex)
        {
            out.push(PlannerCommand::PointerEnter(hex));
        }
    }
    stroke.hex = hex;
    out
}

/// Turns mouse input over the board into planner commands.
pub fn capture_pointer(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_q: Query<(&Camera, &GlobalTransform), With<BoardCamera>>,
    mut egui_ctx: Query<&mut EguiContext, With<PrimaryEguiContext>>,
    layout: Res<BoardLayout>,
    mut stroke: ResMut<PointerStroke>,
    mut out: MessageWriter<PlannerCommand>,
) {
    let over_ui = egui_ctx
        .single_mut()
        .is_ok_and(|mut ctx| ctx.get_mut().is_pointer_over_area());
    let cursor = match (windows.single(), camera_q.single()) {
        (Ok(window), Ok((camera, cam_gt))) => match window.cursor_position() {
            None => Cursor::Outside,
            Some(_) if over_ui => Cursor::OffBoard,
            Some(pos) => cursor_hex(pos, camera, cam_gt, &layout)
                .map_or(Cursor::OffBoard, Cursor::Tile),
        },
        _ => Cursor::Outside,
    };
    let pressed = PointerButtons {
        paint_pressed: buttons.just_pressed(MouseButton::Left),
        paint_held: buttons.pressed(MouseButton::Left),
        erase_pressed: buttons.just_pressed(MouseButton::Right),
    };
    for command in pointer_commands(&mut stroke, cursor, pressed) {
        out.write(command);
    }
}

/// Closes an open stroke when painting is suspended.
pub fn end_stroke(mut stroke: ResMut<PointerStroke>, mut out: MessageWriter<PlannerCommand>) {
    if stroke.active {
        out.write(PlannerCommand::PointerUp);
    }
    *stroke = PointerStroke::default();
}

fn cursor_hex(
    cursor: Vec2,
    camera: &Camera,
    cam_gt: &GlobalTransform,
    layout: &BoardLayout,
) -> Option<Hex> {
    let ray = camera.viewport_to_world(cam_gt, cursor).ok()?;
    let distance = ray.intersect_plane(Vec3::ZERO, InfinitePlane3d::new(Vec3::Y))?;
    let hex = layout.world_to_hex(ray.get_point(distance));
    topology::in_grid(hex).then_some(hex)
}

// ── Faces and outlines ──────────────────────────────────────────────

/// Swaps face materials to match the committed biomes.
pub fn recolor_faces(
    grid: Res<CityGrid>,
    palette: Res<BiomePalette>,
    mut faces: Query<(&TileFace, &mut MeshMaterial3d<StandardMaterial>)>,
) {
    for (face, mut material) in &mut faces {
        let biome = grid.get(face.hex).and_then(|tile| tile.biome);
        let handle = palette.material(biome);
        if material.0 != handle {
            material.0 = handle;
        }
    }
}

/// Tile outlines: palace gold, quarters purple, rivers blue, plus the
/// city-limits boundary.
pub fn draw_outlines(mut gizmos: Gizmos, grid: Res<CityGrid>, layout: Res<BoardLayout>) {
    let grid_line = Color::srgba(1.0, 1.0, 1.0, 0.08);
    let palace = Color::srgb(1.0, 0.8, 0.2);
    let quarter = Color::srgb(0.7, 0.35, 0.95);
    let river = Color::srgb(0.3, 0.65, 1.0);
    let city_limit = Color::srgb(0.95, 0.95, 0.95);

    for (hex, tile) in grid.iter() {
        gizmos.linestrip(ring_points(&layout, hex, 1.0), grid_line);
        if hex == CENTER {
            gizmos.linestrip(ring_points(&layout, hex, 0.92), palace);
        } else if tile.is_quarter() {
            gizmos.linestrip(ring_points(&layout, hex, 0.92), quarter);
        }
        if tile.has_feature(Feature::River) {
            gizmos.linestrip(ring_points(&layout, hex, 0.8), river);
        }
    }

    for edge in topology::city_limit_edges() {
        let (a, b) = layout.shared_edge(edge.hex, edge.outer(), OUTLINE_Y);
        gizmos.line(a, b, city_limit);
    }
}

fn ring_points(layout: &BoardLayout, hex: Hex, scale: f32) -> impl Iterator<Item = Vec3> {
    let corners = layout.corners(hex, scale, OUTLINE_Y);
    corners.into_iter().chain(std::iter::once(corners[0]))
}

// ── Icons and badges ────────────────────────────────────────────────

/// Paints feature and building icons as screen-projected egui text. Visible
/// buildings with a positive bonus get a `+N` badge underneath.
pub fn draw_tile_icons(
    mut egui_ctx: Query<&mut EguiContext, With<PrimaryEguiContext>>,
    camera_q: Query<(&Camera, &GlobalTransform), With<BoardCamera>>,
    grid: Res<CityGrid>,
    adjacency: Res<Adjacency>,
    layout: Res<BoardLayout>,
    cfg: Res<BoardConfig>,
) {
    let Ok((camera, cam_gt)) = camera_q.single() else {
        return;
    };
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };
    let painter = ctx.get_mut().layer_painter(egui::LayerId::background());
    let icon_font = egui::FontId::proportional(cfg.icon_font_size);
    let badge_font = egui::FontId::proportional(cfg.badge_font_size);
    let slot_offset = cfg.hex_size * 0.35;

    for (hex, tile) in grid.iter() {
        let center = layout.hex_to_world(hex);
        let project = |world: Vec3| {
            camera
                .world_to_viewport(cam_gt, world)
                .ok()
                .map(|p| egui::pos2(p.x, p.y))
        };

        let features = feature_text(tile);
        if !features.is_empty()
            && let Some(pos) = project(center + Vec3::new(0.0, 0.0, -cfg.hex_size * 0.45))
        {
            painter.text(
                pos,
                egui::Align2::CENTER_CENTER,
                features,
                icon_font.clone(),
                egui::Color32::WHITE,
            );
        }

        let visible = tile.visible_buildings();
        for &(slot, building) in &visible {
            let dx = match (visible.len(), slot) {
                (1, _) => 0.0,
                (_, Slot::First) => -slot_offset,
                (_, Slot::Second) => slot_offset,
            };
            let Some(pos) = project(center + Vec3::new(dx, 0.0, 0.0)) else {
                continue;
            };
            painter.text(
                pos,
                egui::Align2::CENTER_CENTER,
                building_icon(building),
                icon_font.clone(),
                building_color(building),
            );
            if !cfg.show_badges {
                continue;
            }
            if let Some(bonus) = slot_bonus(&adjacency, hex, slot).filter(|&b| b > 0) {
                painter.text(
                    pos + egui::vec2(0.0, cfg.icon_font_size),
                    egui::Align2::CENTER_CENTER,
                    format!("+{bonus}"),
                    badge_font.clone(),
                    badge_color(building),
                );
            }
        }
    }
}

fn slot_bonus(adjacency: &AdjacencyMap, hex: Hex, slot: Slot) -> Option<u32> {
    adjacency.get(&hex).and_then(|b| b.get(slot))
}

fn feature_text(tile: &Tile) -> String {
    tile.features
        .features()
        .map(feature_icon)
        .collect::<Vec<_>>()
        .join(" ")
}

fn feature_icon(feature: Feature) -> &'static str {
    match feature {
        Feature::Mountain => "Mt",
        Feature::NaturalWonder => "NW",
        Feature::Resource => "Rs",
        Feature::River => "~",
    }
}

/// Short building icon. The palace gets a star.
pub fn building_icon(building: Building) -> &'static str {
    match building {
        Building::Culture => "Cu",
        Building::Happiness => "Ha",
        Building::Food => "Fo",
        Building::Gold => "Go",
        Building::Science => "Sc",
        Building::Production => "Pr",
        Building::Warehouse => "Wh",
        Building::Wonder => "Wo",
        Building::Palace => "★",
    }
}

fn badge_color(building: Building) -> egui::Color32 {
    if building.is_palace() {
        egui::Color32::from_rgb(248, 208, 96)
    } else {
        egui::Color32::from_rgb(120, 230, 120)
    }
}

fn building_color(building: Building) -> egui::Color32 {
    match building {
        Building::Culture => egui::Color32::from_rgb(230, 120, 200),
        Building::Happiness => egui::Color32::from_rgb(250, 210, 90),
        Building::Food => egui::Color32::from_rgb(140, 220, 110),
        Building::Gold => egui::Color32::from_rgb(255, 200, 40),
        Building::Science => egui::Color32::from_rgb(110, 190, 255),
        Building::Production => egui::Color32::from_rgb(240, 140, 70),
        Building::Warehouse => egui::Color32::from_rgb(180, 160, 140),
        Building::Wonder => egui::Color32::from_rgb(255, 255, 255),
        Building::Palace => egui::Color32::from_rgb(255, 215, 0),
    }
}
