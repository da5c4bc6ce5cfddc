//! Planner plugin: owns the current [`TileStore`](crate::store::TileStore)
//! snapshot, the adjacency result and the paint session.
//!
//! Every input reaches the grid as a [`PlannerCommand`] message. Commands are
//! applied in delivery order, then the adjacency map is recomputed once if the
//! grid changed.

mod entities;
mod systems;

pub use entities::{Adjacency, CityGrid, ClearSection, PaintSession, PlannerCommand};

use bevy::prelude::*;

/// Systems that apply commands and refresh derived data. Input systems run
/// before this set, rendering after it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlannerSystems;

/// Grid state and command processing. Has no rendering or input dependencies.
pub struct PlannerPlugin;

impl Plugin for PlannerPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ClearSection>()
            .add_message::<PlannerCommand>()
            .init_resource::<CityGrid>()
            .init_resource::<Adjacency>()
            .init_resource::<PaintSession>()
            .add_systems(
                Update,
                (
                    systems::apply_commands,
                    systems::refresh_adjacency.run_if(resource_changed::<CityGrid>),
                )
                    .chain()
                    .in_set(PlannerSystems),
            );
    }
}
