//! Combat domain: attack capability, enemies and damaging geometry.

use bevy::prelude::*;

/// Whether a character may attack, and the time until its next swing.
/// The death sequence disables it; respawning re-enables it.
#[derive(Component, Debug, Clone)]
pub struct AttackCapability {
    pub enabled: bool,
    pub cooldown_timer: f32,
}

impl Default for AttackCapability {
    fn default() -> Self {
        Self {
            enabled: true,
            cooldown_timer: 0.0,
        }
    }
}

impl AttackCapability {
    pub fn is_ready(&self) -> bool {
        self.enabled && self.cooldown_timer <= 0.0
    }
}

#[derive(Component, Debug)]
pub struct Enemy;

/// Damage dealt to the player while touching this entity. Knockback is
/// relative to the player's facing: negative x pushes the player backwards.
#[derive(Component, Debug, Clone, Copy)]
pub struct ContactDamage {
    pub amount: f32,
    pub knockback: Vec2,
}

/// Touching this kills the player outright, ignoring invincibility
#[derive(Component, Debug)]
pub struct KillZone;

/// Back-and-forth walk around a fixed point
#[derive(Component, Debug, Clone)]
pub struct Patrol {
    pub origin_x: f32,
    pub range: f32,
    pub speed: f32,
    pub direction: f32,
}

impl Patrol {
    pub fn new(origin_x: f32, range: f32, speed: f32) -> Self {
        Self {
            origin_x,
            range,
            speed,
            direction: 1.0,
        }
    }

    /// Horizontal velocity for an enemy at `x`, turning around at either end
    /// of the patrol range.
    pub fn step(&mut self, x: f32) -> f32 {
        let offset = x - self.origin_x;
        if offset > self.range {
            self.direction = -1.0;
        } else if offset < -self.range {
            self.direction = 1.0;
        }
        self.direction * self.speed
    }
}

/// Short-lived visual of a player swing
#[derive(Component, Debug)]
pub struct SlashLifetime(pub f32);
