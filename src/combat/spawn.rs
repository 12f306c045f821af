//! Combat domain: enemy and hazard bundles.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::components::{ContactDamage, Enemy, KillZone, Patrol};
use crate::movement::GameLayer;

pub const ENEMY_SIZE: Vec2 = Vec2::new(0.9, 0.9);
const ENEMY_COLOR: Color = Color::srgb(0.8, 0.3, 0.3);
const ENEMY_SPEED: f32 = 2.0;

/// Knockback of enemy and spike contact, relative to the victim's facing
const CONTACT_KNOCKBACK: Vec2 = Vec2::new(-8.0, 6.0);

/// A patrolling enemy that hurts the player on contact
#[derive(Bundle)]
pub struct EnemyBundle {
    pub enemy: Enemy,
    pub contact: ContactDamage,
    pub patrol: Patrol,
    pub sprite: Sprite,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub collision_layers: CollisionLayers,
    pub velocity: LinearVelocity,
    pub locked_axes: LockedAxes,
}

impl EnemyBundle {
    pub fn new(position: Vec2, patrol_range: f32) -> Self {
        Self {
            enemy: Enemy,
            contact: ContactDamage {
                amount: 1.0,
                knockback: CONTACT_KNOCKBACK,
            },
            patrol: Patrol::new(position.x, patrol_range, ENEMY_SPEED),
            sprite: Sprite {
                color: ENEMY_COLOR,
                custom_size: Some(ENEMY_SIZE),
                ..default()
            },
            transform: Transform::from_xyz(position.x, position.y, 0.0),
            // Kinematic so the patrol fully owns its velocity
            rigid_body: RigidBody::Kinematic,
            collider: Collider::rectangle(ENEMY_SIZE.x, ENEMY_SIZE.y),
            collision_layers: CollisionLayers::new(
                GameLayer::Enemy,
                [GameLayer::Ground, GameLayer::Wall, GameLayer::Player],
            ),
            velocity: LinearVelocity::default(),
            locked_axes: LockedAxes::ROTATION_LOCKED,
        }
    }
}

/// Static spikes: solid, and damaging to touch
#[derive(Bundle)]
pub struct SpikeBundle {
    pub contact: ContactDamage,
    pub sprite: Sprite,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub collision_layers: CollisionLayers,
}

impl SpikeBundle {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            contact: ContactDamage {
                amount: 1.0,
                knockback: CONTACT_KNOCKBACK,
            },
            sprite: Sprite {
                color: Color::srgb(0.75, 0.2, 0.5),
                custom_size: Some(size),
                ..default()
            },
            transform: Transform::from_xyz(position.x, position.y, 0.0),
            rigid_body: RigidBody::Static,
            collider: Collider::rectangle(size.x, size.y),
            collision_layers: CollisionLayers::new(GameLayer::Hazard, [GameLayer::Player]),
        }
    }
}

/// Invisible sensor below the level that triggers a fall death
#[derive(Bundle)]
pub struct KillZoneBundle {
    pub kill_zone: KillZone,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub sensor: Sensor,
    pub collision_layers: CollisionLayers,
}

impl KillZoneBundle {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            kill_zone: KillZone,
            transform: Transform::from_xyz(position.x, position.y, 0.0),
            rigid_body: RigidBody::Static,
            collider: Collider::rectangle(size.x, size.y),
            sensor: Sensor,
            collision_layers: CollisionLayers::new(GameLayer::Hazard, [GameLayer::Player]),
        }
    }
}
