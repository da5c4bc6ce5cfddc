use bevy::prelude::*;

use crate::planner::{ClearSection, PlannerCommand};

/// Destructive action awaiting confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Clear(ClearSection),
    Reset,
}

impl ConfirmAction {
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Clear(ClearSection::Biomes) => "Clear all biomes from every tile?",
            Self::Clear(ClearSection::Features) => "Clear all features from every tile?",
            Self::Clear(ClearSection::Buildings) => "Remove all buildings (except the Palace)?",
            Self::Reset => "Reset the entire planner? All terrain and buildings will be lost.",
        }
    }

    pub fn confirm_label(self) -> &'static str {
        match self {
            Self::Clear(_) => "Clear All",
            Self::Reset => "Reset",
        }
    }

    /// Command sent once the user confirms.
    pub fn command(self) -> PlannerCommand {
        match self {
            Self::Clear(section) => PlannerCommand::BulkClear(section),
            Self::Reset => PlannerCommand::Reset,
        }
    }
}

/// The action shown in the confirmation window, if any.
#[derive(Resource, Debug, Default)]
pub struct PendingConfirmation(pub Option<ConfirmAction>);
