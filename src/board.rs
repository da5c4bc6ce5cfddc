//! Board rendering and pointer capture.
//!
//! Draws the grid seen from above: one flat face per tile colored by biome,
//! gizmo outlines for the palace, quarters, rivers and the city limits, and
//! egui-painted icons with adjacency badges. Mouse input over the board is
//! turned into [`PlannerCommand`](crate::planner::PlannerCommand)s.

mod entities;
mod startup_systems;
mod systems;

pub use entities::{BoardCamera, BoardLayout, TileFace};

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::PlannerState;
use crate::planner::{CityGrid, PlannerSystems};

/// Board geometry and overlay settings.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct BoardConfig {
    /// Hex circumradius in world units.
    pub hex_size: f32,
    /// Face scale relative to the hex, leaving a gap between tiles.
    pub face_inset: f32,
    /// Height of the top-down camera above the board.
    pub camera_height: f32,
    /// Whether `+N` adjacency badges are drawn under buildings.
    pub show_badges: bool,
    /// Font size of feature and building icons.
    pub icon_font_size: f32,
    /// Font size of adjacency badges.
    pub badge_font_size: f32,
    /// Background clear color.
    pub clear_color: Color,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            hex_size: 1.0,
            face_inset: 0.94,
            camera_height: 20.0,
            show_badges: true,
            icon_font_size: 13.0,
            badge_font_size: 11.0,
            clear_color: Color::srgb(0.05, 0.05, 0.07),
        }
    }
}

/// Board plugin: spawns the faces and camera, keeps them in sync with
/// [`CityGrid`], and feeds pointer input to the planner.
pub struct BoardPlugin(pub BoardConfig);

impl Plugin for BoardPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<BoardConfig>()
            .register_type::<TileFace>()
            .register_type::<BoardCamera>()
            .insert_resource(self.0.clone())
            .insert_resource(BoardLayout::new(self.0.hex_size))
            .insert_resource(ClearColor(self.0.clear_color))
            .init_resource::<entities::PointerStroke>()
            .add_systems(Startup, startup_systems::spawn_board)
            .add_systems(
                Update,
                systems::capture_pointer
                    .before(PlannerSystems)
                    .run_if(in_state(PlannerState::Editing)),
            )
            .add_systems(OnExit(PlannerState::Editing), systems::end_stroke)
            .add_systems(
                Update,
                systems::recolor_faces
                    .after(PlannerSystems)
                    .run_if(resource_changed::<CityGrid>),
            )
            .add_systems(Update, systems::draw_outlines.after(PlannerSystems))
            .add_systems(EguiPrimaryContextPass, systems::draw_tile_icons);
    }
}
