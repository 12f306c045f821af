//! Combat domain: tuning, input and the enemy roster.

use bevy::prelude::*;
use std::collections::HashSet;

#[derive(Resource, Debug, Clone)]
pub struct CombatTuning {
    /// Enemies closer than this, on the facing side, are hit by a swing
    pub attack_reach: f32,
    pub attack_cooldown: f32,
    pub slash_duration: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            attack_reach: 1.6,
            attack_cooldown: 0.3,
            slash_duration: 0.1,
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct CombatInput {
    pub attack: bool,
}

/// Anything that can report how many enemies are still alive.
pub trait EnemyCensus {
    fn remaining_enemies(&self) -> usize;

    fn all_defeated(&self) -> bool {
        self.remaining_enemies() == 0
    }
}

/// Live enemies in the level, kept in sync with the `Enemy` component.
#[derive(Resource, Debug, Default)]
pub struct EnemyRoster {
    alive: HashSet<Entity>,
}

impl EnemyRoster {
    pub fn register(&mut self, enemy: Entity) -> bool {
        self.alive.insert(enemy)
    }

    pub fn remove(&mut self, enemy: Entity) -> bool {
        self.alive.remove(&enemy)
    }
}

impl EnemyCensus for EnemyRoster {
    fn remaining_enemies(&self) -> usize {
        self.alive.len()
    }
}
