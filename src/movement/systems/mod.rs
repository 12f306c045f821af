//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::probe_surfaces;
pub(crate) use input::read_input;
pub(crate) use movement::{
    dispatch_motor_events, drive_motion, fade_dust, limit_wall_jump, respawn_characters,
    spawn_dust, sync_facing_visual, tick_motor_effects, tint_from_signals,
};
pub use movement::BaseTint;
