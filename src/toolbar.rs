//! Tool palette, help panel, bulk-clear confirmation and keyboard hotkeys.

mod entities;
mod systems;

pub use entities::{ConfirmAction, PendingConfirmation};
pub use systems::hotkey_tool;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::PlannerState;
use crate::planner::PlannerSystems;

/// Egui side panels and hotkeys that drive the planner.
pub struct ToolbarPlugin;

impl Plugin for ToolbarPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingConfirmation>()
            .add_systems(
                Update,
                systems::hotkeys
                    .before(PlannerSystems)
                    .run_if(in_state(PlannerState::Editing)),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    systems::tool_panel,
                    systems::help_panel,
                    systems::confirm_window.run_if(in_state(PlannerState::Confirming)),
                )
                    .chain(),
            );
    }
}
