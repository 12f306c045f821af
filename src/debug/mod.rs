//! Debug tooling for tuning the controller (dev-tools feature).
//!
//! - F1 or ` toggles the motor readout
//! - F2 kills the player through the fall-death path
//! - F3 spawns an enemy ahead of the player

mod systems;

use bevy::prelude::*;

use crate::debug::systems::{handle_debug_hotkeys, update_motor_readout};

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether the motor readout is visible
    pub show_info: bool,
}

/// Marker for the motor readout overlay
#[derive(Component, Debug)]
pub struct MotorReadout;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Update, (handle_debug_hotkeys, update_motor_readout).chain());
    }
}
