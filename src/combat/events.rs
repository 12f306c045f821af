//! Combat domain: combat-related messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

#[derive(Debug)]
pub struct DamageEvent {
    pub source: Entity,
    pub target: Entity,
    pub amount: f32,
    pub knockback: Vec2,
}

impl Message for DamageEvent {}

/// The target fell out of the level
#[derive(Debug)]
pub struct FallDeathEvent {
    pub entity: Entity,
}

impl Message for FallDeathEvent {}

#[derive(Debug)]
pub struct EnemyDefeatedEvent {
    pub enemy: Entity,
    pub by: Entity,
}

impl Message for EnemyDefeatedEvent {}
