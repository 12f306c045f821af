//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::motor::MoveInput;

/// Every constant the character motor uses. Loaded from
/// `assets/data/controller.ron`; missing fields fall back to these defaults.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ControllerTuning {
    pub max_life: f32,
    /// Target horizontal speed at full input
    pub run_speed: f32,
    /// Smoothing time toward the target velocity, in seconds
    pub movement_smoothing: f32,
    /// Whether horizontal input steers while airborne
    pub air_control: bool,
    pub limit_fall_speed: f32,
    pub jump_impulse: f32,
    /// Double jump impulse is `jump_impulse / double_jump_divisor`
    pub double_jump_divisor: f32,
    /// Horizontal wall jump impulse is `jump_impulse * wall_jump_horizontal_factor`
    pub wall_jump_horizontal_factor: f32,
    pub dash_speed: f32,
    pub dash_active_time: f32,
    /// Total time from dash start until another dash is allowed
    pub dash_cooldown: f32,
    pub wall_slide_speed: f32,
    /// Horizontal speed pressing the character into the wall while sliding
    pub wall_slide_grip: f32,
    /// Input beyond this, pointing away from the wall, releases the slide
    pub wall_release_deadzone: f32,
    pub wall_slide_release_delay: f32,
    pub wall_check_grace: f32,
    pub wall_jump_release_distance: f32,
    pub wall_jump_push_distance: f32,
    pub wall_jump_max_distance: f32,
    pub wall_jump_push_speed: f32,
    /// Recovery ends once vertical velocity drops below minus this
    pub wall_jump_fall_threshold: f32,
    pub stun_duration: f32,
    pub invincibility_duration: f32,
    pub death_freeze_delay: f32,
    pub death_hold_delay: f32,
    pub probe_radius: f32,
    pub ground_probe: Vec2,
    pub wall_probe: Vec2,
    pub gravity: f32,
}

impl Default for ControllerTuning {
    fn default() -> Self {
        Self {
            max_life: 4.0,
            run_speed: 10.0,
            movement_smoothing: 0.05,
            air_control: true,
            limit_fall_speed: 25.0,
            jump_impulse: 12.0,
            double_jump_divisor: 1.2,
            wall_jump_horizontal_factor: 1.2,
            dash_speed: 25.0,
            dash_active_time: 0.1,
            dash_cooldown: 0.6,
            wall_slide_speed: 5.0,
            wall_slide_grip: 2.0,
            wall_release_deadzone: 0.1,
            wall_slide_release_delay: 0.1,
            wall_check_grace: 0.1,
            wall_jump_release_distance: 0.5,
            wall_jump_push_distance: 1.0,
            wall_jump_max_distance: 2.0,
            wall_jump_push_speed: 10.0,
            wall_jump_fall_threshold: 0.5,
            stun_duration: 0.25,
            invincibility_duration: 2.0,
            death_freeze_delay: 0.4,
            death_hold_delay: 1.1,
            probe_radius: 0.2,
            ground_probe: Vec2::new(0.0, -0.8),
            wall_probe: Vec2::new(0.4, 0.0),
            gravity: 30.0,
        }
    }
}

/// Input latched between frames and consumed once per fixed step.
#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub horizontal: f32,
    pub jump_pressed: bool,
    pub dash_pressed: bool,
}

impl MovementInput {
    /// Read the latched input for one motor step and clear the presses.
    pub fn take_step(&mut self) -> MoveInput {
        let step = MoveInput {
            horizontal: self.horizontal,
            jump: self.jump_pressed,
            dash: self.dash_pressed,
        };
        self.jump_pressed = false;
        self.dash_pressed = false;
        step
    }

    /// Drop everything latched so far.
    pub fn release(&mut self) {
        *self = Self::default();
    }
}
