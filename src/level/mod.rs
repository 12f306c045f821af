//! Level domain: the playable test level.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{ENEMY_SIZE, EnemyBundle, KillZoneBundle, SpikeBundle};
use crate::dialogue::{NPC_SIZE, NpcBundle};
use crate::movement::{GameLayer, Ground, Wall};

/// Top of the main floor
const FLOOR_Y: f32 = -4.0;
const FLOOR_THICKNESS: f32 = 1.0;
const ROOM_HALF_WIDTH: f32 = 20.0;
const ROOM_HEIGHT: f32 = 20.0;

const WALL_COLOR: Color = Color::srgb(0.3, 0.3, 0.4);
const GROUND_COLOR: Color = Color::srgb(0.4, 0.5, 0.4);
const PLATFORM_COLOR: Color = Color::srgb(0.5, 0.4, 0.3);

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_test_level);
    }
}

fn spawn_ground(commands: &mut Commands, center: Vec2, size: Vec2, color: Color) {
    commands.spawn((
        Ground,
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(center.x, center.y, 0.0),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Player, GameLayer::Enemy]),
    ));
}

fn spawn_wall(commands: &mut Commands, center: Vec2, size: Vec2) {
    commands.spawn((
        Wall,
        Sprite {
            color: WALL_COLOR,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(center.x, center.y, 0.0),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        CollisionLayers::new(GameLayer::Wall, [GameLayer::Player, GameLayer::Enemy]),
    ));
}

/// A floor with a pit, walls for wall jumping, platforms, spikes, two
/// enemies and an NPC past the pit.
pub(crate) fn spawn_test_level(mut commands: Commands) {
    let floor_center_y = FLOOR_Y - FLOOR_THICKNESS / 2.0;
    let on_floor = |height: f32| FLOOR_Y + height / 2.0;

    // Floor, split by a pit between x = 4 and x = 8
    spawn_ground(
        &mut commands,
        Vec2::new(-8.0, floor_center_y),
        Vec2::new(24.0, FLOOR_THICKNESS),
        GROUND_COLOR,
    );
    spawn_ground(
        &mut commands,
        Vec2::new(14.0, floor_center_y),
        Vec2::new(12.0, FLOOR_THICKNESS),
        GROUND_COLOR,
    );
    commands.spawn(KillZoneBundle::new(
        Vec2::new(0.0, FLOOR_Y - 10.0),
        Vec2::new(ROOM_HALF_WIDTH * 4.0, 2.0),
    ));

    // Room walls
    let wall_center_y = FLOOR_Y + ROOM_HEIGHT / 2.0;
    spawn_wall(
        &mut commands,
        Vec2::new(-ROOM_HALF_WIDTH - 0.5, wall_center_y),
        Vec2::new(1.0, ROOM_HEIGHT),
    );
    spawn_wall(
        &mut commands,
        Vec2::new(ROOM_HALF_WIDTH + 0.5, wall_center_y),
        Vec2::new(1.0, ROOM_HEIGHT),
    );

    // Pillar for wall jumping practice
    spawn_wall(
        &mut commands,
        Vec2::new(-2.0, on_floor(6.0)),
        Vec2::new(1.0, 6.0),
    );

    // Platforms
    spawn_ground(
        &mut commands,
        Vec2::new(-12.0, 0.0),
        Vec2::new(5.0, 0.5),
        PLATFORM_COLOR,
    );
    spawn_ground(
        &mut commands,
        Vec2::new(12.0, 2.0),
        Vec2::new(5.0, 0.5),
        PLATFORM_COLOR,
    );
    spawn_ground(
        &mut commands,
        Vec2::new(0.0, 5.0),
        Vec2::new(4.0, 0.5),
        PLATFORM_COLOR,
    );

    // Hazards and enemies
    commands.spawn(SpikeBundle::new(
        Vec2::new(-16.0, on_floor(0.5)),
        Vec2::new(2.0, 0.5),
    ));
    commands.spawn(EnemyBundle::new(Vec2::new(-6.0, on_floor(ENEMY_SIZE.y)), 2.0));
    commands.spawn(EnemyBundle::new(Vec2::new(14.0, on_floor(ENEMY_SIZE.y)), 3.0));

    commands.spawn(NpcBundle::new(
        Vec2::new(18.0, on_floor(NPC_SIZE.y)),
        2.0,
        "level_1_elder",
    ));

    info!("Spawned test level");
}
