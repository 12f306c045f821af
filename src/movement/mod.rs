//! Movement domain: character motor plugin wiring and public exports.

mod body;
mod components;
mod events;
mod motor;
mod resources;
mod signals;
mod smoothing;
mod spawn;
mod systems;
mod timers;

#[cfg(test)]
mod tests;

pub use body::AvianBody;
pub use components::{CharacterRig, GameLayer, Ground, Player, Wall};
pub use events::{CharacterEvent, RespawnRequest};
pub use motor::{CharacterMotor, DamageOutcome, Facing, MotionState, MotorEvent, SurfaceContacts};
pub use resources::{ControllerTuning, MovementInput};
pub use signals::{AnimSignal, AnimationSignals};
pub use systems::BaseTint;
pub use timers::Effect;

use bevy::prelude::*;

use crate::movement::spawn::spawn_player;
use crate::movement::systems::{
    dispatch_motor_events, drive_motion, fade_dust, limit_wall_jump, probe_surfaces, read_input,
    respawn_characters, spawn_dust, sync_facing_visual, tick_motor_effects, tint_from_signals,
};
use crate::ui::spawn_respawn_panel;

/// Ordering of the per-step character update inside `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotorSet {
    /// Effect countdowns and surface probes
    Sense,
    /// Wall-jump limiter and player intent
    Resolve,
    /// Damage and other external interrupts
    Interrupt,
    /// Motor events forwarded as messages
    Dispatch,
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControllerTuning>()
            .init_resource::<MovementInput>()
            .add_message::<CharacterEvent>()
            .add_message::<RespawnRequest>()
            .configure_sets(
                FixedUpdate,
                (
                    MotorSet::Sense,
                    MotorSet::Resolve,
                    MotorSet::Interrupt,
                    MotorSet::Dispatch,
                )
                    .chain(),
            )
            .add_systems(Startup, spawn_player.after(spawn_respawn_panel))
            .add_systems(Update, (read_input, respawn_characters))
            .add_systems(
                FixedUpdate,
                (
                    (tick_motor_effects, probe_surfaces)
                        .chain()
                        .in_set(MotorSet::Sense),
                    (limit_wall_jump, drive_motion)
                        .chain()
                        .in_set(MotorSet::Resolve),
                    dispatch_motor_events.in_set(MotorSet::Dispatch),
                ),
            )
            .add_systems(
                PostUpdate,
                (sync_facing_visual, tint_from_signals, spawn_dust, fade_dust),
            );
    }
}
