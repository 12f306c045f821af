//! Movement domain: player bootstrap from tuning data.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::AttackCapability;
use crate::movement::{
    AnimationSignals, BaseTint, CharacterMotor, CharacterRig, ControllerTuning, GameLayer, Player,
};
use crate::ui::RespawnPanel;

pub(crate) const PLAYER_SPAWN: Vec2 = Vec2::new(-10.0, 0.0);
pub(crate) const PLAYER_SIZE: Vec2 = Vec2::new(0.8, 1.6);

/// Spawn the player with a validated rig. A missing collaborator (such as the
/// respawn panel) stops the app here rather than inside a physics step.
pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<ControllerTuning>,
    panels: Query<Entity, With<RespawnPanel>>,
    existing_player: Query<Entity, With<Player>>,
) -> Result {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return Ok(());
    }

    let mut rig = CharacterRig::builder()
        .ground_probe(tuning.ground_probe)
        .wall_probe(tuning.wall_probe)
        .probe_radius(tuning.probe_radius)
        .spawn_point(PLAYER_SPAWN);
    if let Some(panel) = panels.iter().next() {
        rig = rig.respawn_panel(panel);
    }
    let rig = rig.build()?;

    let base_color = Color::srgb(0.9, 0.9, 0.9);

    info!(
        "Spawning player: life={}, run_speed={}, jump_impulse={}, dash_speed={}",
        tuning.max_life, tuning.run_speed, tuning.jump_impulse, tuning.dash_speed
    );

    commands.spawn((
        // Identity & Movement
        (
            Player,
            CharacterMotor::new(&tuning),
            rig,
            AnimationSignals::default(),
            AttackCapability::default(),
        ),
        // Rendering
        Sprite {
            color: base_color,
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        BaseTint(base_color),
        Transform::from_xyz(PLAYER_SPAWN.x, PLAYER_SPAWN.y, 0.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            Mass(1.0),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            Friction::new(0.0),
            CollidingEntities::default(),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Player,
                [
                    GameLayer::Ground,
                    GameLayer::Wall,
                    GameLayer::Enemy,
                    GameLayer::Hazard,
                    GameLayer::Sensor,
                ],
            ),
        ),
    ));

    Ok(())
}
