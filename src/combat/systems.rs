//! Combat domain: combat systems for input, damage, attacks and cleanup.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{
    AttackCapability, ContactDamage, Enemy, KillZone, Patrol, SlashLifetime,
};
use crate::combat::events::{DamageEvent, EnemyDefeatedEvent, FallDeathEvent};
use crate::combat::resources::{CombatInput, CombatTuning, EnemyCensus, EnemyRoster};
use crate::movement::{
    AnimationSignals, AvianBody, CharacterEvent, CharacterMotor, ControllerTuning, DamageOutcome,
    Facing, MotorEvent, Player,
};

pub(crate) fn read_combat_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<CombatInput>,
) {
    input.attack = keyboard.just_pressed(KeyCode::KeyZ) || keyboard.just_pressed(KeyCode::KeyU);
}

pub(crate) fn tick_attack_cooldowns(time: Res<Time>, mut query: Query<&mut AttackCapability>) {
    let dt = time.delta_secs();
    for mut attack in &mut query {
        if attack.cooldown_timer > 0.0 {
            attack.cooldown_timer -= dt;
        }
    }
}

/// A swing reaches targets within `reach` on the side the attacker faces.
pub fn in_attack_reach(origin: Vec2, facing: Facing, target: Vec2, reach: f32) -> bool {
    let offset = target - origin;
    offset.x * facing.sign() >= 0.0 && offset.length() <= reach
}

pub(crate) fn process_player_attacks(
    mut commands: Commands,
    input: Res<CombatInput>,
    tuning: Res<CombatTuning>,
    mut players: Query<
        (Entity, &Transform, &CharacterMotor, &mut AttackCapability),
        With<Player>,
    >,
    enemies: Query<(Entity, &Transform), With<Enemy>>,
    mut defeated: MessageWriter<EnemyDefeatedEvent>,
) {
    if !input.attack {
        return;
    }

    for (entity, transform, motor, mut attack) in &mut players {
        if !attack.is_ready() || !motor.can_move() {
            continue;
        }
        attack.cooldown_timer = tuning.attack_cooldown;

        let origin = transform.translation.truncate();
        let facing = motor.facing();
        let slash_center = origin + Vec2::new(facing.sign() * tuning.attack_reach * 0.5, 0.0);
        commands.spawn((
            SlashLifetime(tuning.slash_duration),
            Sprite {
                color: Color::srgba(1.0, 1.0, 0.0, 0.5),
                custom_size: Some(Vec2::new(tuning.attack_reach, 1.0)),
                ..default()
            },
            Transform::from_xyz(slash_center.x, slash_center.y, 1.0),
        ));

        let mut hits = 0;
        for (enemy, enemy_transform) in &enemies {
            let target = enemy_transform.translation.truncate();
            if in_attack_reach(origin, facing, target, tuning.attack_reach) {
                defeated.write(EnemyDefeatedEvent { enemy, by: entity });
                hits += 1;
            }
        }

        debug!("Player attack facing {:?}, {} enemies in reach", facing, hits);
    }
}

pub(crate) fn cleanup_expired_slashes(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut SlashLifetime)>,
) {
    let dt = time.delta_secs();
    for (entity, mut lifetime) in &mut query {
        lifetime.0 -= dt;
        if lifetime.0 <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

pub(crate) fn track_enemy_roster(
    added: Query<Entity, Added<Enemy>>,
    mut removed: RemovedComponents<Enemy>,
    mut roster: ResMut<EnemyRoster>,
) {
    for enemy in &added {
        roster.register(enemy);
    }
    for enemy in removed.read() {
        roster.remove(enemy);
    }
}

pub(crate) fn process_enemy_defeats(
    mut commands: Commands,
    mut events: MessageReader<EnemyDefeatedEvent>,
    mut roster: ResMut<EnemyRoster>,
) {
    for event in events.read() {
        // Two swings in one frame can report the same enemy
        if !roster.remove(event.enemy) {
            continue;
        }
        commands.entity(event.enemy).despawn();
        info!(
            "Enemy {:?} defeated by {:?}, {} remaining",
            event.enemy,
            event.by,
            roster.remaining_enemies()
        );
    }
}

pub(crate) fn patrol_enemies(
    mut query: Query<(&Transform, &mut Patrol, &mut LinearVelocity), With<Enemy>>,
) {
    for (transform, mut patrol, mut velocity) in &mut query {
        velocity.x = patrol.step(transform.translation.x);
    }
}

/// Turn the player's current contacts into damage and fall-death messages.
/// Contact damage is re-sent every step while touching; the motor's
/// invincibility window decides whether it lands.
pub(crate) fn detect_contact_damage(
    players: Query<(Entity, &CollidingEntities), With<Player>>,
    sources: Query<&ContactDamage>,
    kill_zones: Query<(), With<KillZone>>,
    mut damage_events: MessageWriter<DamageEvent>,
    mut fall_events: MessageWriter<FallDeathEvent>,
) {
    for (player, colliding) in &players {
        for &other in colliding.iter() {
            if kill_zones.contains(other) {
                fall_events.write(FallDeathEvent { entity: player });
                break;
            }
            if let Ok(contact) = sources.get(other) {
                damage_events.write(DamageEvent {
                    source: other,
                    target: player,
                    amount: contact.amount,
                    knockback: contact.knockback,
                });
            }
        }
    }
}

pub(crate) fn apply_damage_events(
    tuning: Res<ControllerTuning>,
    mut damage_events: MessageReader<DamageEvent>,
    mut query: Query<(
        &Transform,
        &ComputedMass,
        &mut CharacterMotor,
        &mut LinearVelocity,
        &mut AnimationSignals,
    )>,
) {
    for event in damage_events.read() {
        let Ok((transform, mass, mut motor, mut velocity, mut signals)) =
            query.get_mut(event.target)
        else {
            continue;
        };

        let mut body = AvianBody::new(transform, &mut velocity, mass);
        match motor.apply_damage(
            event.amount,
            event.knockback,
            &tuning,
            &mut body,
            &mut *signals,
        ) {
            DamageOutcome::Ignored => {}
            DamageOutcome::Stunned => info!(
                "{:?} hit by {:?} for {}, life {}/{}",
                event.target,
                event.source,
                event.amount,
                motor.life(),
                motor.max_life()
            ),
            DamageOutcome::Killed => info!("{:?} killed by {:?}", event.target, event.source),
        }
    }
}

pub(crate) fn apply_fall_deaths(
    tuning: Res<ControllerTuning>,
    mut fall_events: MessageReader<FallDeathEvent>,
    mut query: Query<(
        &Transform,
        &ComputedMass,
        &mut CharacterMotor,
        &mut LinearVelocity,
        &mut AnimationSignals,
    )>,
) {
    for event in fall_events.read() {
        let Ok((transform, mass, mut motor, mut velocity, mut signals)) =
            query.get_mut(event.entity)
        else {
            continue;
        };

        let mut body = AvianBody::new(transform, &mut velocity, mass);
        if motor.fall_death(&tuning, &mut body, &mut *signals) {
            info!("{:?} fell out of the level", event.entity);
        }
    }
}

/// Death takes the attack away; respawning gives it back.
pub(crate) fn toggle_attack_on_death(
    mut events: MessageReader<CharacterEvent>,
    mut query: Query<&mut AttackCapability>,
) {
    for event in events.read() {
        let Ok(mut attack) = query.get_mut(event.entity) else {
            continue;
        };
        match event.event {
            MotorEvent::DeathStarted => {
                attack.enabled = false;
                debug!("Attack disabled for {:?}", event.entity);
            }
            MotorEvent::Respawned => {
                attack.enabled = true;
                attack.cooldown_timer = 0.0;
            }
            _ => {}
        }
    }
}
