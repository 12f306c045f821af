//! Debug domain: hotkeys and the motor readout overlay.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::{EnemyBundle, EnemyCensus, EnemyRoster, FallDeathEvent};
use crate::debug::{DebugState, MotorReadout};
use crate::movement::{CharacterMotor, Effect, Player};

pub(crate) fn handle_debug_hotkeys(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    player_query: Query<(Entity, &Transform, &CharacterMotor), With<Player>>,
    mut fall_events: MessageWriter<FallDeathEvent>,
) {
    if keyboard.just_pressed(KeyCode::F1) || keyboard.just_pressed(KeyCode::Backquote) {
        debug_state.show_info = !debug_state.show_info;
        info!("[DEBUG] Motor readout {}", if debug_state.show_info { "ON" } else { "OFF" });
    }

    let Some((player, transform, motor)) = player_query.iter().next() else {
        return;
    };

    if keyboard.just_pressed(KeyCode::F2) {
        fall_events.write(FallDeathEvent { entity: player });
        info!("[DEBUG] Killing player");
    }

    if keyboard.just_pressed(KeyCode::F3) {
        let position = transform.translation.truncate() + Vec2::new(motor.facing().sign() * 4.0, 0.0);
        commands.spawn(EnemyBundle::new(position, 2.0));
        info!("[DEBUG] Spawned enemy at ({:.1}, {:.1})", position.x, position.y);
    }
}

pub(crate) fn update_motor_readout(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    roster: Res<EnemyRoster>,
    player_query: Query<(&Transform, &CharacterMotor), With<Player>>,
    mut overlay_query: Query<&mut Text, With<MotorReadout>>,
    existing_overlay: Query<Entity, With<MotorReadout>>,
) {
    if !debug_state.show_info {
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    if existing_overlay.is_empty() {
        spawn_motor_readout(&mut commands);
        return;
    }

    if let (Some((transform, motor)), Ok(mut text)) =
        (player_query.iter().next(), overlay_query.single_mut())
    {
        let pos = transform.translation;
        let dash_cooldown = motor
            .effects()
            .remaining(Effect::DashCooldown)
            .unwrap_or(0.0);
        **text = format!(
            "Pos: ({:.2}, {:.2})\nState: {:?}\nFacing: {:?}\nGrounded: {} Wall: {}\nLife: {}/{}\nDouble jump: {} Dash cd: {:.2}\nInvincible: {}\nEnemies: {}",
            pos.x,
            pos.y,
            motor.state(),
            motor.facing(),
            motor.is_grounded(),
            motor.is_touching_wall(),
            motor.life(),
            motor.max_life(),
            motor.can_double_jump(),
            dash_cooldown,
            motor.is_invincible(),
            roster.remaining_enemies()
        );
    }
}

fn spawn_motor_readout(commands: &mut Commands) {
    commands.spawn((
        MotorReadout,
        Text::new("Loading..."),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}
