//! Movement domain: messages published by character motors.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::movement::motor::MotorEvent;

/// A motor side effect, forwarded once per fixed step.
#[derive(Debug, Clone, Copy)]
pub struct CharacterEvent {
    pub entity: Entity,
    pub event: MotorEvent,
}

impl Message for CharacterEvent {}

/// Request to bring a dead character back at its spawn point
#[derive(Debug)]
pub struct RespawnRequest {
    pub entity: Entity,
}

impl Message for RespawnRequest {}
