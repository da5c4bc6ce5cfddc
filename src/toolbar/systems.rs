use bevy::prelude::*;
use bevy_egui::{EguiContext, PrimaryEguiContext, egui};

use super::entities::{ConfirmAction, PendingConfirmation};
use crate::PlannerState;
use crate::adjacency::RULES;
use crate::kinds::{Biome, Building, Feature, Kind};
use crate::paint::Tool;
use crate::planner::{ClearSection, PaintSession, PlannerCommand};

const MODIFIERS: [KeyCode; 6] = [
    KeyCode::ControlLeft,
    KeyCode::ControlRight,
    KeyCode::AltLeft,
    KeyCode::AltRight,
    KeyCode::SuperLeft,
    KeyCode::SuperRight,
];

const LETTERS: [(KeyCode, char); 26] = [
    (KeyCode::KeyA, 'a'),
    (KeyCode::KeyB, 'b'),
    (KeyCode::KeyC, 'c'),
    (KeyCode::KeyD, 'd'),
    (KeyCode::KeyE, 'e'),
    (KeyCode::KeyF, 'f'),
    (KeyCode::KeyG, 'g'),
    (KeyCode::KeyH, 'h'),
    (KeyCode::KeyI, 'i'),
    (KeyCode::KeyJ, 'j'),
    (KeyCode::KeyK, 'k'),
    (KeyCode::KeyL, 'l'),
    (KeyCode::KeyM, 'm'),
    (KeyCode::KeyN, 'n'),
    (KeyCode::KeyO, 'o'),
    (KeyCode::KeyP, 'p'),
    (KeyCode::KeyQ, 'q'),
    (KeyCode::KeyR, 'r'),
    (KeyCode::KeyS, 's'),
    (KeyCode::KeyT, 't'),
    (KeyCode::KeyU, 'u'),
    (KeyCode::KeyV, 'v'),
    (KeyCode::KeyW, 'w'),
    (KeyCode::KeyX, 'x'),
    (KeyCode::KeyY, 'y'),
    (KeyCode::KeyZ, 'z'),
];

/// Tool bound to a physical letter key.
pub fn hotkey_tool(code: KeyCode) -> Option<Tool> {
    LETTERS
        .iter()
        .find(|(key, _)| *key == code)
        .and_then(|&(_, letter)| Tool::from_hotkey(letter))
}

/// Selects tools from letter keys. Ignored while a modifier is held so
/// system shortcuts pass through.
pub fn hotkeys(keys: Res<ButtonInput<KeyCode>>, mut out: MessageWriter<PlannerCommand>) {
    if keys.any_pressed(MODIFIERS) {
        return;
    }
    for &code in keys.get_just_pressed() {
        if let Some(tool) = hotkey_tool(code) {
            out.write(PlannerCommand::HotkeyTool(tool));
        }
    }
}

// ── Panels ──────────────────────────────────────────────────────────

fn sections() -> [(&'static str, Vec<Tool>, ClearSection); 3] {
    [
        (
            "Buildings",
            Building::PLACEABLE.into_iter().map(Tool::Building).collect(),
            ClearSection::Buildings,
        ),
        (
            "Features",
            Feature::ALL.iter().copied().map(Tool::Feature).collect(),
            ClearSection::Features,
        ),
        (
            "Biomes",
            Biome::ALL.iter().copied().map(Tool::Biome).collect(),
            ClearSection::Biomes,
        ),
    ]
}

fn tool_text(tool: Tool) -> String {
    match tool.hotkey() {
        Some(key) => format!("{}  [{}]", tool.label(), key.to_ascii_uppercase()),
        None => tool.label().to_string(),
    }
}

/// Left panel: one button per tool, grouped by layer, plus the bulk actions.
pub fn tool_panel(
    mut egui_ctx: Query<&mut EguiContext, With<PrimaryEguiContext>>,
    session: Res<PaintSession>,
    state: Res<State<PlannerState>>,
    mut pending: ResMut<PendingConfirmation>,
    mut next: ResMut<NextState<PlannerState>>,
    mut out: MessageWriter<PlannerCommand>,
) {
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };
    let editing = *state.get() == PlannerState::Editing;
    let selected = session.tool();
    let mut request = None;

    egui::SidePanel::left("tool_panel")
        .resizable(false)
        .show(ctx.get_mut(), |ui| {
            ui.heading("City Planner");
            ui.add_enabled_ui(editing, |ui| {
                for (title, tools, clear) in sections() {
                    ui.separator();
                    ui.strong(title);
                    for tool in tools {
                        if ui
                            .selectable_label(selected == Some(tool), tool_text(tool))
                            .clicked()
                        {
                            out.write(PlannerCommand::SelectTool(tool));
                        }
                    }
                    if ui.small_button(format!("Clear all {}", clear.label())).clicked() {
                        request = Some(ConfirmAction::Clear(clear));
                    }
                }
                ui.separator();
                if ui.button("Reset planner").clicked() {
                    request = Some(ConfirmAction::Reset);
                }
            });
        });

    if let Some(action) = request {
        info!("awaiting confirmation: {}", action.prompt());
        pending.0 = Some(action);
        next.set(PlannerState::Confirming);
    }
}

/// Right panel: painting help, adjacency rules and the outline legend.
pub fn help_panel(
    mut egui_ctx: Query<&mut EguiContext, With<PrimaryEguiContext>>,
    session: Res<PaintSession>,
) {
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };
    egui::SidePanel::right("help_panel")
        .resizable(false)
        .show(ctx.get_mut(), |ui| {
            ui.heading("How to Paint");
            ui.label("Select a tool on the left, then click or drag across tiles to apply it.");
            ui.label("Left-click applies the tool. Right-click removes that tool's layer from a tile.");
            ui.label("Use the hotkeys shown on each button to quickly switch tools.");
            ui.label(match session.tool() {
                Some(tool) => format!("Selected: {}", tool.label()),
                None => "Selected: none".to_string(),
            });

            ui.separator();
            ui.heading("Adjacency Bonuses");
            for (buildings, rule) in RULES {
                ui.strong(buildings);
                ui.label(rule);
            }

            ui.separator();
            ui.heading("Tile Legend");
            ui.label("Gold ring: Palace");
            ui.label("Purple ring: Quarter (tile with 2 buildings)");
            ui.label("Blue inner ring: Navigable River");
            ui.label("White edge: city limits");
            ui.label("Buildings on Mountain, Natural Wonder or Resource tiles are hidden.");
        });
}

/// Modal prompt for the pending bulk action. Esc cancels.
pub fn confirm_window(
    mut egui_ctx: Query<&mut EguiContext, With<PrimaryEguiContext>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut pending: ResMut<PendingConfirmation>,
    mut next: ResMut<NextState<PlannerState>>,
    mut out: MessageWriter<PlannerCommand>,
) {
    let Some(action) = pending.0 else {
        next.set(PlannerState::Editing);
        return;
    };
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };

    let mut decision = None;
    egui::Window::new("Confirm")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx.get_mut(), |ui| {
            ui.label(action.prompt());
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    decision = Some(false);
                }
                if ui.button(action.confirm_label()).clicked() {
                    decision = Some(true);
                }
            });
        });
    if keys.just_pressed(KeyCode::Escape) {
        decision = Some(false);
    }

    let Some(confirmed) = decision else {
        return;
    };
    if confirmed {
        out.write(action.command());
    } else {
        info!("cancelled: {}", action.prompt());
    }
    pending.0 = None;
    next.set(PlannerState::Editing);
}
