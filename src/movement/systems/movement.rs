//! Movement domain: fixed-step motor systems, event dispatch and respawn.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::movement::{
    AnimSignal, AnimationSignals, AvianBody, CharacterEvent, CharacterMotor, CharacterRig,
    ControllerTuning, Facing, MotionState, MotorEvent, MovementInput, Player, RespawnRequest,
};

const DUST_LIFETIME: f32 = 0.25;
const DUST_SIZE: Vec2 = Vec2::new(0.7, 0.2);
const DUST_COLOR: Color = Color::srgba(0.8, 0.75, 0.65, 0.8);

type MotorQueryData = (
    &'static Transform,
    &'static ComputedMass,
    &'static mut CharacterMotor,
    &'static mut LinearVelocity,
    &'static mut AnimationSignals,
);

pub(crate) fn tick_motor_effects(
    time: Res<Time>,
    tuning: Res<ControllerTuning>,
    mut query: Query<MotorQueryData>,
) {
    let dt = time.delta_secs();

    for (transform, mass, mut motor, mut velocity, mut signals) in &mut query {
        let mut body = AvianBody::new(transform, &mut velocity, mass);
        motor.tick_effects(dt, &tuning, &mut body, &mut *signals);
    }
}

pub(crate) fn limit_wall_jump(
    tuning: Res<ControllerTuning>,
    mut query: Query<(
        &Transform,
        &ComputedMass,
        &mut CharacterMotor,
        &mut LinearVelocity,
    )>,
) {
    for (transform, mass, mut motor, mut velocity) in &mut query {
        if !motor.in_wall_jump_recovery() {
            continue;
        }
        let mut body = AvianBody::new(transform, &mut velocity, mass);
        motor.limit_wall_jump(&tuning, &mut body);
    }
}

/// Feed the latched player input to the player's motor.
pub(crate) fn drive_motion(
    time: Res<Time>,
    tuning: Res<ControllerTuning>,
    mut input: ResMut<MovementInput>,
    mut query: Query<MotorQueryData, With<Player>>,
) {
    let dt = time.delta_secs();
    let step = input.take_step();

    for (transform, mass, mut motor, mut velocity, mut signals) in &mut query {
        let before = motor.state();
        let mut body = AvianBody::new(transform, &mut velocity, mass);
        motor.move_character(step, dt, &tuning, &mut body, &mut *signals);

        if motor.state() != before {
            debug!("Motion state: {:?} -> {:?}", before, motor.state());
        }
    }
}

/// Forward queued motor side effects as messages.
pub(crate) fn dispatch_motor_events(
    mut query: Query<(Entity, &mut CharacterMotor)>,
    mut events: MessageWriter<CharacterEvent>,
) {
    for (entity, mut motor) in &mut query {
        if motor.pending_events().is_empty() {
            continue;
        }
        for event in motor.drain_events() {
            events.write(CharacterEvent { entity, event });
        }
    }
}

/// Reset characters at their spawn point. Runs in `Update` because the
/// fixed schedule is frozen while the respawn panel is up.
pub(crate) fn respawn_characters(
    mut requests: MessageReader<RespawnRequest>,
    mut events: MessageWriter<CharacterEvent>,
    mut query: Query<(
        &CharacterRig,
        &ComputedMass,
        &mut Transform,
        &mut Position,
        &mut CharacterMotor,
        &mut LinearVelocity,
        &mut AnimationSignals,
    )>,
) {
    for request in requests.read() {
        let Ok((rig, mass, mut transform, mut position, mut motor, mut velocity, mut signals)) =
            query.get_mut(request.entity)
        else {
            warn!("Respawn requested for unknown character {:?}", request.entity);
            continue;
        };

        transform.translation.x = rig.spawn_point.x;
        transform.translation.y = rig.spawn_point.y;
        position.0 = rig.spawn_point;

        let mut body = AvianBody::new(&transform, &mut velocity, mass);
        motor.respawn(&mut body, &mut *signals);
        for event in motor.drain_events() {
            events.write(CharacterEvent {
                entity: request.entity,
                event,
            });
        }

        info!(
            "Respawned {:?} at ({:.1}, {:.1}) with life {}",
            request.entity,
            rig.spawn_point.x,
            rig.spawn_point.y,
            motor.life()
        );
    }
}

pub(crate) fn sync_facing_visual(
    mut query: Query<(&CharacterMotor, &mut Sprite), Changed<CharacterMotor>>,
) {
    for (motor, mut sprite) in &mut query {
        sprite.flip_x = motor.facing() == Facing::Left;
    }
}

/// Base tint of a character sprite before signal overlays
#[derive(Component, Debug, Clone, Copy)]
pub struct BaseTint(pub Color);

/// Stand-in for an animation graph: tint the sprite from the motor's signals.
pub(crate) fn tint_from_signals(
    time: Res<Time<Real>>,
    mut query: Query<(&CharacterMotor, &BaseTint, &mut AnimationSignals, &mut Sprite)>,
) {
    for (motor, base, mut signals, mut sprite) in &mut query {
        let hit = signals.consume_trigger(AnimSignal::Hit);

        let mut color = if signals.is_set(AnimSignal::IsDead) {
            Color::srgb(0.35, 0.35, 0.35)
        } else if hit {
            Color::srgb(1.0, 0.4, 0.4)
        } else if signals.is_set(AnimSignal::IsDashing) {
            Color::srgb(0.5, 0.9, 1.0)
        } else if signals.is_set(AnimSignal::IsWallSliding) {
            Color::srgb(0.95, 0.75, 0.35)
        } else if motor.state() == MotionState::Stunned {
            Color::srgb(0.9, 0.55, 0.55)
        } else {
            base.0
        };

        // Blink while invincible
        if motor.is_invincible() && !motor.is_dead() {
            let phase = (time.elapsed_secs() * 12.0).sin();
            color.set_alpha(if phase > 0.0 { 1.0 } else { 0.35 });
        }

        sprite.color = color;
    }
}

/// Puff of dust kicked up at a character's feet. Holds the seconds left.
#[derive(Component, Debug)]
pub struct DustPuff(pub f32);

/// Jumps and clean landings kick up dust. Landing against a wall or out of
/// a dash does not.
pub(crate) fn spawn_dust(
    mut commands: Commands,
    mut events: MessageReader<CharacterEvent>,
    query: Query<(&Transform, &CharacterRig)>,
) {
    for event in events.read() {
        if !matches!(
            event.event,
            MotorEvent::Landed { dust: true } | MotorEvent::Jumped
        ) {
            continue;
        }
        let Ok((transform, rig)) = query.get(event.entity) else {
            continue;
        };

        let feet = transform.translation.truncate() + rig.ground_probe;
        commands.spawn((
            DustPuff(DUST_LIFETIME),
            Sprite {
                color: DUST_COLOR,
                custom_size: Some(DUST_SIZE),
                ..default()
            },
            Transform::from_xyz(feet.x, feet.y, -0.5),
        ));
    }
}

pub(crate) fn fade_dust(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut DustPuff, &mut Sprite)>,
) {
    let dt = time.delta_secs();
    for (entity, mut puff, mut sprite) in &mut query {
        puff.0 -= dt;
        if puff.0 <= 0.0 {
            commands.entity(entity).despawn();
            continue;
        }
        sprite
            .color
            .set_alpha(DUST_COLOR.alpha() * puff.0 / DUST_LIFETIME);
    }
}
