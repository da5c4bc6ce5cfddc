use bevy::prelude::*;

use super::entities::{Adjacency, CityGrid, PaintSession, PlannerCommand};
use crate::adjacency::compute_adjacency;
use crate::paint::PaintController;
use crate::store::{TileEdit, TileStore};

/// Folds this frame's commands into a new grid snapshot.
pub fn apply_commands(
    mut commands: MessageReader<PlannerCommand>,
    mut grid: ResMut<CityGrid>,
    mut session: ResMut<PaintSession>,
) {
    if commands.is_empty() {
        return;
    }
    let mut store = grid.0.clone();
    for &command in commands.read() {
        let Some(edit) = interpret(&mut session.0, &store, command) else {
            continue;
        };
        let next = store.apply(edit);
        if next == store {
            trace!("{edit:?} left the grid unchanged");
        } else {
            debug!("applied {edit:?}");
            store = next;
        }
    }
    grid.set_if_neq(CityGrid(store));
}

/// Recomputes adjacency from the committed grid.
pub fn refresh_adjacency(grid: Res<CityGrid>, mut adjacency: ResMut<Adjacency>) {
    adjacency.0 = compute_adjacency(&grid);
}

fn interpret(
    paint: &mut PaintController,
    store: &TileStore,
    command: PlannerCommand,
) -> Option<TileEdit> {
    let edit = match command {
        PlannerCommand::SelectTool(tool) => {
            paint.select(tool);
            debug!("tool {:?}", paint.tool());
            return None;
        }
        PlannerCommand::HotkeyTool(tool) => {
            paint.select_from_hotkey(tool);
            debug!("tool {tool:?} (hotkey)");
            return None;
        }
        PlannerCommand::PointerDown(hex) => paint.pointer_down(store, hex),
        PlannerCommand::PointerEnter(hex) => paint.pointer_enter(store, hex),
        PlannerCommand::PointerUp => {
            paint.pointer_up();
            return None;
        }
        PlannerCommand::EraseAt(hex) => Some(paint.erase_at(hex)),
        PlannerCommand::BulkClear(section) => {
            info!("clearing all {}", section.label());
            Some(section.edit())
        }
        PlannerCommand::Reset => {
            info!("resetting planner");
            Some(TileEdit::Reset)
        }
    };
    if edit.is_none() {
        trace!("{command:?} produced no edit");
    }
    edit
}
