//! Movement domain: the rigid-body contract the motor drives.

use avian2d::prelude::*;
use bevy::prelude::*;

/// The slice of a rigid body the character motor reads and writes.
pub trait MotorBody {
    fn position(&self) -> Vec2;
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    /// Instantaneous change in momentum.
    fn apply_impulse(&mut self, impulse: Vec2);
}

/// [`MotorBody`] over an avian2d dynamic body.
pub struct AvianBody<'a> {
    position: Vec2,
    velocity: &'a mut LinearVelocity,
    inverse_mass: f32,
}

impl<'a> AvianBody<'a> {
    pub fn new(transform: &Transform, velocity: &'a mut LinearVelocity, mass: &ComputedMass) -> Self {
        Self {
            position: transform.translation.truncate(),
            velocity,
            inverse_mass: mass.inverse(),
        }
    }
}

impl MotorBody for AvianBody<'_> {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity.0
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity.0 = velocity;
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity.0 += impulse * self.inverse_mass;
    }
}
