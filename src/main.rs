#![warn(missing_docs)]
//! Hex city planner.
//!
//! Top-down hex board with a tool palette on the left and adjacency help on
//! the right. Left-drag paints, right-click erases, Tab opens the world
//! inspector and Esc quits.

use bevy::app::AppExit;
use bevy::prelude::*;
#[cfg(feature = "native")]
use bevy::remote::{RemotePlugin, http::RemoteHttpPlugin};
use bevy_inspector_egui::quick::WorldInspectorPlugin;
#[cfg(feature = "native")]
use clap::Parser;

use hex_city_planner::PlannerState;
use hex_city_planner::board::{BoardConfig, BoardPlugin};
use hex_city_planner::planner::PlannerPlugin;
use hex_city_planner::toolbar::ToolbarPlugin;

/// Command-line overrides for the board.
#[cfg(feature = "native")]
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Hex circumradius in world units.
    #[arg(long)]
    hex_size: Option<f32>,
    /// Height of the top-down camera.
    #[arg(long)]
    camera_height: Option<f32>,
    /// Do not draw `+N` adjacency badges.
    #[arg(long)]
    hide_badges: bool,
}

#[cfg(feature = "native")]
fn board_config() -> BoardConfig {
    let args = Args::parse();
    let defaults = BoardConfig::default();
    BoardConfig {
        hex_size: args.hex_size.unwrap_or(defaults.hex_size),
        camera_height: args.camera_height.unwrap_or(defaults.camera_height),
        show_badges: !args.hide_badges,
        ..defaults
    }
}

#[cfg(not(feature = "native"))]
fn board_config() -> BoardConfig {
    BoardConfig::default()
}

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hex City Planner".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<PlannerState>()
    .init_state::<PlannerState>()
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(PlannerPlugin)
    .add_plugins(BoardPlugin(board_config()))
    .add_plugins(ToolbarPlugin)
    .add_systems(Update, exit_on_esc.run_if(in_state(PlannerState::Editing)))
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(PlannerState::Inspecting)));

    #[cfg(feature = "native")]
    app.add_plugins(RemotePlugin::default())
        .add_plugins(RemoteHttpPlugin::default());

    app.run();
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<PlannerState>>,
    mut next: ResMut<NextState<PlannerState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        let new_state = match state.get() {
            PlannerState::Editing => PlannerState::Inspecting,
            PlannerState::Inspecting => PlannerState::Editing,
            PlannerState::Confirming => return,
        };
        info!("{:?} -> {new_state:?}", state.get());
        next.set(new_state);
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
