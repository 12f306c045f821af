//! Dialogue domain: NPC proximity and the conversation trigger.

mod systems;


use avian2d::prelude::*;
use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::core::gameplay_active;
use crate::dialogue::systems::{log_conversations, track_npc_range, trigger_dialogue};
use crate::movement::GameLayer;

/// An NPC the player can talk to once the level is cleared
#[derive(Component, Debug, Clone)]
pub struct Npc {
    /// Identifier of the conversation handed to the dialogue runner
    pub conversation: String,
}

/// Whether the player is inside the NPC's interaction range
#[derive(Component, Debug, Default)]
pub struct NpcProximity {
    pub player_in_range: bool,
}

#[derive(Debug, Clone)]
pub struct ConversationStarted {
    pub npc: Entity,
    pub conversation: String,
}

impl Message for ConversationStarted {}

pub const NPC_SIZE: Vec2 = Vec2::new(0.8, 1.6);

/// A static NPC with a sensor collider covering its interaction range
#[derive(Bundle)]
pub struct NpcBundle {
    pub npc: Npc,
    pub proximity: NpcProximity,
    pub sprite: Sprite,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub sensor: Sensor,
    pub collision_events: CollisionEventsEnabled,
    pub collision_layers: CollisionLayers,
}

impl NpcBundle {
    pub fn new(position: Vec2, range: f32, conversation: impl Into<String>) -> Self {
        Self {
            npc: Npc {
                conversation: conversation.into(),
            },
            proximity: NpcProximity::default(),
            sprite: Sprite {
                color: Color::srgb(0.4, 0.7, 0.9),
                custom_size: Some(NPC_SIZE),
                ..default()
            },
            transform: Transform::from_xyz(position.x, position.y, 0.0),
            rigid_body: RigidBody::Static,
            collider: Collider::circle(range),
            sensor: Sensor,
            collision_events: CollisionEventsEnabled,
            collision_layers: CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
        }
    }
}

pub struct DialoguePlugin;

impl Plugin for DialoguePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ConversationStarted>().add_systems(
            Update,
            (
                track_npc_range,
                trigger_dialogue.run_if(gameplay_active),
                log_conversations,
            )
                .chain(),
        );
    }
}
