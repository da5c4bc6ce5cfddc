//! Hex city planner.
//!
//! Paint biomes, terrain features and buildings onto a 61-tile hex grid and
//! read off per-building adjacency bonuses as the layout changes.
//!
//! The grid model ([`topology`], [`tiles`], [`store`], [`adjacency`],
//! [`paint`]) is plain Rust. [`planner`], [`board`] and [`toolbar`] wrap it in
//! Bevy plugins.

pub mod adjacency;
pub mod board;
pub mod kinds;
pub mod paint;
pub mod planner;
pub mod store;
pub mod tiles;
pub mod toolbar;
pub mod topology;

use bevy::prelude::*;

/// Application-wide interaction state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum PlannerState {
    /// Pointer painting and hotkeys active.
    #[default]
    Editing,
    /// A bulk clear or reset is waiting for confirmation.
    Confirming,
    /// World inspector open (Tab to toggle).
    Inspecting,
}
