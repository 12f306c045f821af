//! Movement domain: unit tests for the motor, its timers and the rig.

use std::time::Duration;

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use super::body::MotorBody;
use super::components::RigError;
use super::motor::MoveInput;
use super::smoothing::smooth_damp;
use super::systems::movement::DustPuff;
use super::systems::{probe_surfaces, read_input, respawn_characters, spawn_dust};
use super::timers::EffectTimers;
use super::{
    AnimSignal, AnimationSignals, AvianBody, CharacterEvent, CharacterMotor, CharacterRig,
    ControllerTuning, DamageOutcome, Effect, Facing, GameLayer, MotionState, MotorEvent,
    MovementInput, RespawnRequest, SurfaceContacts,
};

const DT: f32 = 0.02;

#[derive(Debug, Default)]
struct TestBody {
    position: Vec2,
    velocity: Vec2,
}

impl MotorBody for TestBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        // Unit mass
        self.velocity += impulse;
    }
}

struct Rig {
    tuning: ControllerTuning,
    motor: CharacterMotor,
    body: TestBody,
    signals: AnimationSignals,
}

impl Rig {
    fn new() -> Self {
        let tuning = ControllerTuning::default();
        Self {
            motor: CharacterMotor::new(&tuning),
            tuning,
            body: TestBody::default(),
            signals: AnimationSignals::default(),
        }
    }

    fn grounded() -> Self {
        let mut rig = Self::new();
        rig.sense(true, false);
        rig.motor.drain_events();
        rig
    }

    fn airborne(velocity: Vec2) -> Self {
        let mut rig = Self::new();
        rig.body.velocity = velocity;
        rig.sense(false, false);
        rig
    }

    /// Airborne against a wall on the right, sliding and facing left.
    fn sliding_on_right_wall() -> Self {
        let mut rig = Self::airborne(Vec2::new(0.0, -2.0));
        rig.sense(false, true);
        rig.move_with(MoveInput::default());
        assert_eq!(rig.motor.state(), MotionState::WallSliding);
        rig
    }

    fn sense(&mut self, ground: bool, wall: bool) {
        self.motor.sense(
            SurfaceContacts { ground, wall },
            &mut self.body,
            &mut self.signals,
        );
    }

    fn tick(&mut self) {
        self.motor
            .tick_effects(DT, &self.tuning, &mut self.body, &mut self.signals);
    }

    fn limit(&mut self) {
        self.motor.limit_wall_jump(&self.tuning, &mut self.body);
    }

    fn move_with(&mut self, input: MoveInput) {
        self.motor
            .move_character(input, DT, &self.tuning, &mut self.body, &mut self.signals);
    }

    fn damage(&mut self, amount: f32, knockback: Vec2) -> DamageOutcome {
        self.motor.apply_damage(
            amount,
            knockback,
            &self.tuning,
            &mut self.body,
            &mut self.signals,
        )
    }

    fn count_events(&self, event: MotorEvent) -> usize {
        self.motor
            .pending_events()
            .iter()
            .filter(|e| **e == event)
            .count()
    }
}

fn jump() -> MoveInput {
    MoveInput {
        jump: true,
        ..default()
    }
}

fn dash() -> MoveInput {
    MoveInput {
        dash: true,
        ..default()
    }
}

fn horizontal(value: f32) -> MoveInput {
    MoveInput {
        horizontal: value,
        ..default()
    }
}

// -----------------------------------------------------------------------------
// EffectTimers tests
// -----------------------------------------------------------------------------

#[test]
fn test_effect_restart_replaces_pending_countdown() {
    let mut timers = EffectTimers::default();
    timers.restart(Effect::DashCooldown, 0.5);
    assert!(timers.tick(0.3).is_empty());

    timers.restart(Effect::DashCooldown, 0.5);
    assert!(timers.tick(0.3).is_empty());
    assert_eq!(timers.tick(0.2), vec![Effect::DashCooldown]);
    assert!(!timers.is_pending(Effect::DashCooldown));
}

#[test]
fn test_effect_start_if_idle_does_not_postpone() {
    let mut timers = EffectTimers::default();
    assert!(timers.start_if_idle(Effect::WallSlideRelease, 0.1));
    timers.tick(0.06);
    assert!(!timers.start_if_idle(Effect::WallSlideRelease, 0.1));
    assert_eq!(timers.tick(0.04), vec![Effect::WallSlideRelease]);
}

#[test]
fn test_effects_finish_in_schedule_order() {
    let mut timers = EffectTimers::default();
    timers.restart(Effect::Stun, 0.1);
    timers.restart(Effect::Invincibility, 0.1);
    timers.restart(Effect::DashActive, 0.5);

    assert_eq!(timers.tick(0.1), vec![Effect::Stun, Effect::Invincibility]);
    assert!(timers.is_pending(Effect::DashActive));
    assert!(timers.cancel(Effect::DashActive));
    assert!(timers.is_empty());
}

// -----------------------------------------------------------------------------
// smooth_damp tests
// -----------------------------------------------------------------------------

#[test]
fn test_smooth_damp_converges_without_overshoot() {
    let target = Vec2::new(10.0, 0.0);
    let mut rate = Vec2::ZERO;
    let mut current = Vec2::ZERO;

    for _ in 0..60 {
        current = smooth_damp(current, target, &mut rate, 0.05, DT);
        assert!(current.x <= target.x);
    }
    assert!((current.x - target.x).abs() < 0.01);
}

#[test]
fn test_smooth_damp_is_not_instantaneous() {
    let mut rate = Vec2::ZERO;
    let next = smooth_damp(Vec2::ZERO, Vec2::new(10.0, 0.0), &mut rate, 0.05, DT);
    assert!(next.x > 0.0 && next.x < 10.0);
    assert_eq!(
        smooth_damp(Vec2::ONE, Vec2::ZERO, &mut rate, 0.05, 0.0),
        Vec2::ONE
    );
}

// -----------------------------------------------------------------------------
// Sensor tests
// -----------------------------------------------------------------------------

#[test]
fn test_grounded_and_touching_wall_are_exclusive() {
    let mut rig = Rig::new();
    rig.sense(true, true);
    assert!(rig.motor.is_grounded());
    assert!(!rig.motor.is_touching_wall());

    rig.sense(false, true);
    assert!(!rig.motor.is_grounded());
    assert!(rig.motor.is_touching_wall());
}

#[test]
fn test_landing_edge_restores_double_jump() {
    let mut rig = Rig::airborne(Vec2::new(0.0, -3.0));
    rig.move_with(jump());
    assert!(!rig.motor.can_double_jump());

    rig.motor.drain_events();
    rig.sense(true, false);
    assert!(rig.motor.can_double_jump());
    assert_eq!(rig.motor.state(), MotionState::Idle);
    assert_eq!(rig.count_events(MotorEvent::Landed { dust: true }), 1);
    assert!(!rig.signals.is_set(AnimSignal::IsJumping));
}

#[test]
fn test_airborne_sets_jumping_signal() {
    let rig = Rig::airborne(Vec2::new(0.0, -1.0));
    assert!(rig.signals.is_set(AnimSignal::IsJumping));
    assert_eq!(rig.motor.state(), MotionState::Falling);
}

// -----------------------------------------------------------------------------
// Jump tests
// -----------------------------------------------------------------------------

#[test]
fn test_ground_jump_from_rest() {
    let mut rig = Rig::grounded();
    rig.move_with(jump());

    assert!(rig.body.velocity.y > 0.0);
    assert!(rig.signals.is_set(AnimSignal::IsJumping));
    assert!(rig.signals.is_set(AnimSignal::JumpUp));
    assert!(rig.motor.can_double_jump());
    assert_eq!(rig.motor.state(), MotionState::Jumping);
    assert_eq!(rig.count_events(MotorEvent::Jumped), 1);
}

#[test]
fn test_double_jump_is_weaker_and_consumed() {
    let mut rig = Rig::airborne(Vec2::new(0.0, -3.0));
    rig.move_with(jump());

    let expected = rig.tuning.jump_impulse / rig.tuning.double_jump_divisor;
    assert!((rig.body.velocity.y - expected).abs() < 1e-4);
    assert!(expected < rig.tuning.jump_impulse);
    assert!(!rig.motor.can_double_jump());
    assert!(rig.signals.is_set(AnimSignal::IsDoubleJumping));

    rig.body.velocity.y = -1.0;
    rig.move_with(jump());
    assert!(rig.body.velocity.y < 0.0);
}

#[test]
fn test_fall_speed_is_clamped() {
    let mut rig = Rig::airborne(Vec2::new(0.0, -40.0));
    rig.move_with(MoveInput::default());
    assert!(rig.body.velocity.y >= -rig.tuning.limit_fall_speed - 1e-3);
}

#[test]
fn test_facing_follows_input() {
    let mut rig = Rig::grounded();
    rig.move_with(horizontal(-1.0));
    assert_eq!(rig.motor.facing(), Facing::Left);
    assert!(rig.body.velocity.x < 0.0);

    rig.move_with(horizontal(1.0));
    assert_eq!(rig.motor.facing(), Facing::Right);
}

// -----------------------------------------------------------------------------
// Dash tests
// -----------------------------------------------------------------------------

#[test]
fn test_dash_window_and_cooldown_are_fixed() {
    let mut rig = Rig::grounded();
    rig.move_with(dash());
    assert!(rig.motor.is_dashing());
    assert!(!rig.motor.can_dash());
    assert_eq!(rig.body.velocity, Vec2::new(rig.tuning.dash_speed, 0.0));

    // 0.1s active window, 0.6s total cooldown at 50 steps per second
    for step in 1..=30 {
        rig.tick();
        assert_eq!(rig.motor.is_dashing(), step < 5, "dashing at step {}", step);
        assert_eq!(rig.motor.can_dash(), step == 30, "can_dash at step {}", step);

        rig.sense(true, false);
        if step < 30 {
            // Pressing again mid-cooldown never extends or restarts it
            for _ in 0..3 {
                rig.move_with(dash());
            }
        }
    }
}

#[test]
fn test_dash_into_wall_starts_wall_slide() {
    let mut rig = Rig::airborne(Vec2::ZERO);
    rig.move_with(dash());
    assert!(rig.motor.is_dashing());

    rig.tick();
    rig.sense(false, true);
    assert!(!rig.motor.is_dashing());

    rig.move_with(MoveInput::default());
    assert_eq!(rig.motor.state(), MotionState::WallSliding);
}

// -----------------------------------------------------------------------------
// Wall slide tests
// -----------------------------------------------------------------------------

#[test]
fn test_wall_slide_entry_flips_and_relocates_probe() {
    let mut rig = Rig::airborne(Vec2::new(0.0, -2.0));
    let probe = rig.tuning.wall_probe;
    assert_eq!(rig.motor.wall_anchor(Vec2::ZERO, probe).x, probe.x);

    rig.sense(false, true);
    rig.move_with(MoveInput::default());

    assert_eq!(rig.motor.state(), MotionState::WallSliding);
    assert_eq!(rig.motor.facing(), Facing::Left);
    assert!(rig.motor.wall_probe_behind());
    // Still probing the wall on the right after the flip
    assert_eq!(rig.motor.wall_anchor(Vec2::ZERO, probe).x, probe.x);
    assert!(rig.signals.is_set(AnimSignal::IsWallSliding));
    assert_eq!(
        rig.body.velocity,
        Vec2::new(rig.tuning.wall_slide_grip, -rig.tuning.wall_slide_speed)
    );
}

#[test]
fn test_wall_slide_ignores_facing_input() {
    let mut rig = Rig::sliding_on_right_wall();
    rig.move_with(horizontal(1.0));
    assert_eq!(rig.motor.facing(), Facing::Left);
}

#[test]
fn test_rising_wall_contact_does_not_slide() {
    let mut rig = Rig::airborne(Vec2::new(0.0, 4.0));
    rig.sense(false, true);
    rig.move_with(MoveInput::default());
    assert_eq!(rig.motor.state(), MotionState::Jumping);
}

#[test]
fn test_steering_away_releases_after_delay() {
    let mut rig = Rig::sliding_on_right_wall();

    // The release is scheduled on the first step and fires 0.1s later
    for step in 1..=6 {
        rig.tick();
        assert_eq!(
            rig.motor.is_wall_sliding(),
            step < 6,
            "sliding at step {}",
            step
        );
        if !rig.motor.is_wall_sliding() {
            break;
        }
        rig.sense(false, true);
        rig.move_with(horizontal(-1.0));
    }

    assert!(!rig.motor.wall_probe_behind());
    assert!(rig.motor.can_double_jump());
    assert!(!rig.signals.is_set(AnimSignal::IsWallSliding));
}

#[test]
fn test_leaving_wall_exits_after_grace() {
    let mut rig = Rig::sliding_on_right_wall();

    // Inside the grace window a missing wall contact is ignored
    rig.tick();
    rig.sense(false, false);
    rig.move_with(MoveInput::default());
    assert!(rig.motor.is_wall_sliding());

    for _ in 0..5 {
        rig.tick();
    }
    rig.sense(false, false);
    rig.move_with(MoveInput::default());
    assert!(!rig.motor.is_wall_sliding());
    assert!(!rig.motor.wall_probe_behind());
    assert!(rig.motor.can_double_jump());
}

#[test]
fn test_dash_detaches_from_wall() {
    let mut rig = Rig::sliding_on_right_wall();
    rig.sense(false, true);
    rig.move_with(dash());

    assert!(rig.motor.is_dashing());
    assert!(!rig.motor.wall_probe_behind());
    assert!(rig.motor.can_double_jump());
    assert_eq!(rig.body.velocity, Vec2::new(-rig.tuning.dash_speed, 0.0));
}

// -----------------------------------------------------------------------------
// Wall jump tests
// -----------------------------------------------------------------------------

/// Wall jump off a wall on the left, leaving the character facing right
/// with the launch point at x = 0.
fn wall_jump_off_left_wall() -> Rig {
    let mut rig = Rig::airborne(Vec2::new(0.0, -2.0));
    rig.move_with(horizontal(-1.0));
    assert_eq!(rig.motor.facing(), Facing::Left);

    rig.body.velocity = Vec2::new(0.0, -2.0);
    rig.sense(false, true);
    rig.move_with(MoveInput::default());
    assert_eq!(rig.motor.facing(), Facing::Right);

    rig.sense(false, true);
    rig.move_with(jump());
    assert!(rig.motor.in_wall_jump_recovery());
    rig
}

#[test]
fn test_wall_jump_launches_outward_and_locks_control() {
    let rig = wall_jump_off_left_wall();

    assert!(rig.body.velocity.x > 0.0);
    assert!(rig.body.velocity.y > 0.0);
    assert!(!rig.motor.can_move());
    assert!(!rig.motor.can_double_jump());
    assert!(!rig.motor.is_wall_sliding());
    assert!(!rig.motor.wall_probe_behind());
    assert_eq!(rig.count_events(MotorEvent::WallJumped), 1);
}

#[test]
fn test_wall_jump_push_band_forces_outward_speed() {
    let mut rig = wall_jump_off_left_wall();
    rig.body.position.x = 1.5;
    rig.body.velocity = Vec2::new(3.0, 2.0);
    rig.limit();

    assert_eq!(rig.body.velocity.x, rig.tuning.wall_jump_push_speed);
    assert_eq!(rig.body.velocity.y, 2.0);
    assert!(rig.motor.can_move());
    assert!(rig.motor.in_wall_jump_recovery());
}

#[test]
fn test_wall_jump_push_band_facing_left() {
    let mut rig = Rig::sliding_on_right_wall();
    rig.sense(false, true);
    rig.move_with(jump());
    assert_eq!(rig.motor.facing(), Facing::Left);

    rig.body.position.x = -1.5;
    rig.body.velocity = Vec2::new(-3.0, 2.0);
    rig.limit();
    assert_eq!(rig.body.velocity.x, -rig.tuning.wall_jump_push_speed);
}

#[test]
fn test_wall_jump_release_band_restores_control_only() {
    let mut rig = wall_jump_off_left_wall();
    rig.body.position.x = 0.7;
    rig.body.velocity = Vec2::new(3.0, 2.0);
    rig.limit();

    assert!(rig.motor.can_move());
    assert_eq!(rig.body.velocity, Vec2::new(3.0, 2.0));
}

#[test]
fn test_wall_jump_recovery_ends_past_max_distance() {
    let mut rig = wall_jump_off_left_wall();
    rig.body.position.x = 2.5;
    rig.body.velocity = Vec2::new(8.0, 1.0);
    rig.limit();

    assert!(!rig.motor.in_wall_jump_recovery());
    assert_eq!(rig.body.velocity.x, 0.0);
    assert!(rig.motor.can_move());
}

#[test]
fn test_wall_jump_overshoot_guard() {
    let mut rig = wall_jump_off_left_wall();
    rig.body.position.x = -0.3;
    rig.body.velocity = Vec2::new(-2.0, 1.0);
    rig.limit();

    assert!(!rig.motor.in_wall_jump_recovery());
    assert_eq!(rig.body.velocity.x, 0.0);
}

#[test]
fn test_wall_jump_recovery_ends_when_falling() {
    let mut rig = wall_jump_off_left_wall();
    rig.body.position.x = 0.2;
    rig.body.velocity = Vec2::new(5.0, -1.0);
    rig.limit();

    assert_eq!(rig.motor.state(), MotionState::Falling);
    assert!(rig.motor.can_move());
    assert_eq!(rig.body.velocity, Vec2::new(5.0, -1.0));
}

// -----------------------------------------------------------------------------
// Damage tests
// -----------------------------------------------------------------------------

#[test]
fn test_damage_stuns_and_knocks_back_by_facing() {
    let mut rig = Rig::grounded();
    rig.move_with(horizontal(-1.0));
    assert_eq!(rig.motor.facing(), Facing::Left);

    let outcome = rig.damage(1.0, Vec2::new(-6.0, 8.0));
    assert_eq!(outcome, DamageOutcome::Stunned);
    assert_eq!(rig.motor.life(), 3.0);
    assert_eq!(rig.body.velocity, Vec2::new(6.0, 8.0));
    assert!(rig.motor.is_invincible());
    assert!(!rig.motor.can_move());
    assert!(rig.signals.is_triggered(AnimSignal::Hit));
}

#[test]
fn test_damage_while_invincible_is_ignored() {
    let mut rig = Rig::grounded();
    rig.damage(1.0, Vec2::new(-6.0, 8.0));

    rig.body.velocity = Vec2::new(1.0, 1.0);
    let outcome = rig.damage(1.0, Vec2::new(-6.0, 8.0));
    assert_eq!(outcome, DamageOutcome::Ignored);
    assert_eq!(rig.motor.life(), 3.0);
    assert_eq!(rig.body.velocity, Vec2::new(1.0, 1.0));
}

#[test]
fn test_stun_and_invincibility_windows() {
    let mut rig = Rig::grounded();
    rig.damage(1.0, Vec2::ZERO);

    rig.body.velocity = Vec2::new(1.0, 1.0);
    rig.move_with(MoveInput {
        horizontal: 1.0,
        jump: true,
        dash: true,
    });
    assert_eq!(rig.body.velocity, Vec2::new(1.0, 1.0));

    // 0.25s stun ends on the 13th step
    for _ in 0..12 {
        rig.tick();
    }
    assert!(!rig.motor.can_move());
    rig.tick();
    assert!(rig.motor.can_move());
    assert_eq!(rig.motor.state(), MotionState::Idle);
    assert!(!rig.signals.is_triggered(AnimSignal::Hit));

    // 2s invincibility ends on the 100th step
    for _ in 13..99 {
        rig.tick();
    }
    assert!(rig.motor.is_invincible());
    rig.tick();
    assert!(!rig.motor.is_invincible());
}

#[test]
fn test_lethal_damage_starts_death_once() {
    let mut rig = Rig::grounded();
    assert_eq!(rig.damage(4.0, Vec2::ZERO), DamageOutcome::Killed);
    assert_eq!(rig.damage(4.0, Vec2::ZERO), DamageOutcome::Ignored);

    assert_eq!(rig.count_events(MotorEvent::DeathStarted), 1);
    assert!(rig.motor.is_dead());
    assert!(rig.signals.is_set(AnimSignal::IsDead));
    assert!(!rig.motor.can_move());
}

#[test]
fn test_fall_death_bypasses_invincibility() {
    let mut rig = Rig::grounded();
    rig.damage(1.0, Vec2::ZERO);
    assert!(rig.motor.is_invincible());

    assert!(
        rig.motor
            .fall_death(&rig.tuning, &mut rig.body, &mut rig.signals)
    );
    assert!(rig.motor.is_dead());
    assert_eq!(rig.motor.life(), 0.0);
    assert!(
        !rig.motor
            .fall_death(&rig.tuning, &mut rig.body, &mut rig.signals)
    );
    assert_eq!(rig.count_events(MotorEvent::DeathStarted), 1);
}

#[test]
fn test_death_sequence_freezes_then_holds() {
    let mut rig = Rig::grounded();
    rig.body.velocity = Vec2::new(3.0, -1.0);
    rig.damage(10.0, Vec2::ZERO);
    rig.motor.drain_events();

    // 0.4s before the freeze
    for _ in 0..19 {
        rig.tick();
    }
    assert_eq!(rig.count_events(MotorEvent::FreezeTime), 0);
    rig.tick();
    assert_eq!(rig.count_events(MotorEvent::FreezeTime), 1);
    assert_eq!(rig.count_events(MotorEvent::ShowRespawnPanel), 1);
    assert_eq!(rig.body.velocity.x, 0.0);
    rig.motor.drain_events();

    // 1.1s hold
    for _ in 0..54 {
        rig.tick();
    }
    assert_eq!(rig.count_events(MotorEvent::RespawnReady), 0);
    rig.tick();
    assert_eq!(rig.count_events(MotorEvent::RespawnReady), 1);
}

#[test]
fn test_respawn_restores_character() {
    let mut rig = Rig::grounded();
    rig.body.velocity = Vec2::new(2.0, 2.0);
    rig.damage(10.0, Vec2::ZERO);
    rig.motor.drain_events();

    rig.motor.respawn(&mut rig.body, &mut rig.signals);
    assert_eq!(rig.motor.life(), rig.tuning.max_life);
    assert_eq!(rig.motor.state(), MotionState::Falling);
    assert!(!rig.motor.is_invincible());
    assert!(rig.motor.can_move());
    assert!(rig.motor.effects().is_empty());
    assert!(!rig.signals.is_set(AnimSignal::IsDead));
    assert_eq!(rig.body.velocity, Vec2::ZERO);
    assert_eq!(rig.count_events(MotorEvent::Respawned), 1);
}

// -----------------------------------------------------------------------------
// Rig and input tests
// -----------------------------------------------------------------------------

#[test]
fn test_rig_requires_respawn_panel() {
    let result = CharacterRig::builder()
        .ground_probe(Vec2::new(0.0, -0.8))
        .wall_probe(Vec2::new(0.4, 0.0))
        .probe_radius(0.2)
        .build();
    assert_eq!(result.unwrap_err(), RigError::Missing("respawn panel"));
}

#[test]
fn test_rig_rejects_bad_probes() {
    let base = || {
        CharacterRig::builder()
            .ground_probe(Vec2::new(0.0, -0.8))
            .respawn_panel(Entity::PLACEHOLDER)
    };

    let err = base()
        .wall_probe(Vec2::new(0.4, 0.0))
        .probe_radius(0.0)
        .build()
        .unwrap_err();
    assert_eq!(err, RigError::InvalidProbeRadius(0.0));

    let err = base()
        .wall_probe(Vec2::new(-0.4, 0.0))
        .probe_radius(0.2)
        .build()
        .unwrap_err();
    assert_eq!(err, RigError::WallProbeBehind(-0.4));

    let rig = base()
        .wall_probe(Vec2::new(0.4, 0.0))
        .probe_radius(0.2)
        .spawn_point(Vec2::new(3.0, 1.0))
        .build()
        .unwrap();
    assert_eq!(rig.spawn_point, Vec2::new(3.0, 1.0));
    assert_eq!(rig.respawn_panel, Entity::PLACEHOLDER);
}

#[test]
fn test_movement_input_take_step_clears_presses() {
    let mut input = MovementInput {
        horizontal: -1.0,
        jump_pressed: true,
        dash_pressed: true,
    };

    let step = input.take_step();
    assert_eq!(
        step,
        MoveInput {
            horizontal: -1.0,
            jump: true,
            dash: true,
        }
    );

    let step = input.take_step();
    assert!(!step.jump && !step.dash);
    assert_eq!(step.horizontal, -1.0);
}

#[test]
fn test_release_drops_latched_presses() {
    let mut input = MovementInput {
        horizontal: 1.0,
        jump_pressed: true,
        dash_pressed: true,
    };
    input.release();
    assert_eq!(input.take_step(), MoveInput::default());
}

// -----------------------------------------------------------------------------
// Headless app tests
// -----------------------------------------------------------------------------

fn test_rig(spawn_point: Vec2) -> CharacterRig {
    let tuning = ControllerTuning::default();
    CharacterRig::builder()
        .ground_probe(tuning.ground_probe)
        .wall_probe(tuning.wall_probe)
        .probe_radius(tuning.probe_radius)
        .spawn_point(spawn_point)
        .respawn_panel(Entity::PLACEHOLDER)
        .build()
        .unwrap()
}

fn input_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<MovementInput>()
        .add_systems(Update, read_input);
    app
}

#[test]
fn test_presses_are_latched_while_running() {
    let mut app = input_app();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::Space);
    app.update();

    assert!(app.world().resource::<MovementInput>().jump_pressed);
}

#[test]
fn test_presses_are_not_latched_while_paused() {
    let mut app = input_app();
    app.world_mut().resource_mut::<Time<Virtual>>().pause();
    {
        let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.press(KeyCode::Space);
        keyboard.press(KeyCode::ShiftLeft);
    }
    app.update();

    let input = app.world().resource::<MovementInput>();
    assert!(!input.jump_pressed);
    assert!(!input.dash_pressed);
}

#[test]
fn test_pause_drops_presses_latched_before_it() {
    let mut app = input_app();
    app.world_mut().resource_mut::<MovementInput>().jump_pressed = true;
    app.world_mut().resource_mut::<Time<Virtual>>().pause();
    app.update();

    assert!(!app.world().resource::<MovementInput>().jump_pressed);
}

fn count_dust(app: &mut App) -> usize {
    app.world_mut()
        .query::<&DustPuff>()
        .iter(app.world())
        .count()
}

fn dust_app() -> (App, Entity) {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_message::<CharacterEvent>()
        .add_systems(Update, spawn_dust);
    let player = app
        .world_mut()
        .spawn((Transform::from_xyz(2.0, 0.8, 0.0), test_rig(Vec2::ZERO)))
        .id();
    (app, player)
}

#[test]
fn test_clean_landing_kicks_up_dust_at_feet() {
    let (mut app, player) = dust_app();
    app.world_mut().write_message(CharacterEvent {
        entity: player,
        event: MotorEvent::Landed { dust: true },
    });
    app.update();

    let feet: Vec<Vec3> = app
        .world_mut()
        .query_filtered::<&Transform, With<DustPuff>>()
        .iter(app.world())
        .map(|transform| transform.translation)
        .collect();
    assert_eq!(feet.len(), 1);
    assert_eq!(feet[0].truncate(), Vec2::new(2.0, 0.0));
}

#[test]
fn test_wall_or_dash_landing_has_no_dust() {
    let (mut app, player) = dust_app();
    app.world_mut().write_message(CharacterEvent {
        entity: player,
        event: MotorEvent::Landed { dust: false },
    });
    app.update();

    assert_eq!(count_dust(&mut app), 0);
}

#[test]
fn test_jump_kicks_up_dust() {
    let (mut app, player) = dust_app();
    app.world_mut().write_message(CharacterEvent {
        entity: player,
        event: MotorEvent::Jumped,
    });
    app.world_mut().write_message(CharacterEvent {
        entity: player,
        event: MotorEvent::WallJumped,
    });
    app.update();

    assert_eq!(count_dust(&mut app), 1);
}

#[test]
fn test_respawn_request_resets_body_at_spawn_point() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_message::<RespawnRequest>()
        .add_message::<CharacterEvent>()
        .add_systems(Update, respawn_characters);

    let tuning = ControllerTuning::default();
    let mut motor = CharacterMotor::new(&tuning);
    let transform = Transform::from_xyz(10.0, -20.0, 0.0);
    let mut velocity = LinearVelocity(Vec2::new(5.0, -9.0));
    let mass = ComputedMass::new(1.0);
    let mut signals = AnimationSignals::default();
    {
        let mut body = AvianBody::new(&transform, &mut velocity, &mass);
        assert!(motor.fall_death(&tuning, &mut body, &mut signals));
    }
    motor.drain_events();

    let spawn_point = Vec2::new(3.0, 4.0);
    let player = app
        .world_mut()
        .spawn((
            test_rig(spawn_point),
            motor,
            transform,
            Position(Vec2::new(10.0, -20.0)),
            velocity,
            mass,
            signals,
        ))
        .id();

    app.world_mut().write_message(RespawnRequest { entity: player });
    app.update();

    let world = app.world();
    let transform = world.get::<Transform>(player).unwrap();
    assert_eq!(transform.translation.truncate(), spawn_point);
    assert_eq!(world.get::<Position>(player).unwrap().0, spawn_point);
    assert_eq!(world.get::<LinearVelocity>(player).unwrap().0, Vec2::ZERO);

    let motor = world.get::<CharacterMotor>(player).unwrap();
    assert_eq!(motor.state(), MotionState::Falling);
    assert_eq!(motor.facing(), Facing::Right);
    assert_eq!(motor.life(), motor.max_life());
    assert!(!world.get::<AnimationSignals>(player).unwrap().is_set(AnimSignal::IsDead));
}

#[derive(Resource, Debug, Default)]
struct RespawnedEvents(usize);

fn count_respawned(mut events: MessageReader<CharacterEvent>, mut seen: ResMut<RespawnedEvents>) {
    seen.0 += events
        .read()
        .filter(|event| event.event == MotorEvent::Respawned)
        .count();
}

#[test]
fn test_respawn_of_unknown_entity_is_skipped() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .init_resource::<RespawnedEvents>()
        .add_message::<RespawnRequest>()
        .add_message::<CharacterEvent>()
        .add_systems(Update, (respawn_characters, count_respawned).chain());

    let stranger = app.world_mut().spawn_empty().id();
    app.world_mut().write_message(RespawnRequest { entity: stranger });
    app.update();

    assert_eq!(app.world().resource::<RespawnedEvents>().0, 0);
}

// Surface checks against real avian colliders.

fn physics_app() -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        AssetPlugin::default(),
        bevy::scene::ScenePlugin,
        PhysicsPlugins::default(),
    ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / 64.0,
        )));
    app.finish();
    app.cleanup();
    app
}

fn spawn_block(app: &mut App, center: Vec2, size: Vec2, layer: GameLayer) {
    app.world_mut().spawn((
        Transform::from_xyz(center.x, center.y, 0.0),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        CollisionLayers::new(layer, LayerMask::ALL),
    ));
}

/// A character at the origin whose own collider carries `layer`.
fn spawn_sensing_character(app: &mut App, layer: GameLayer) -> Entity {
    let tuning = ControllerTuning::default();
    app.world_mut()
        .spawn((
            CharacterMotor::new(&tuning),
            test_rig(Vec2::ZERO),
            AnimationSignals::default(),
            Transform::default(),
            RigidBody::Kinematic,
            Collider::rectangle(0.8, 1.6),
            CollisionLayers::new(layer, LayerMask::ALL),
            ComputedMass::new(1.0),
            LinearVelocity::default(),
        ))
        .id()
}

/// Let the physics schedule index the colliders, then sense once.
fn run_surface_checks(app: &mut App, character: Entity) -> SurfaceContacts {
    for _ in 0..4 {
        app.update();
    }
    app.world_mut().run_system_once(probe_surfaces).unwrap();

    let motor = app.world().get::<CharacterMotor>(character).unwrap();
    SurfaceContacts {
        ground: motor.is_grounded(),
        wall: motor.is_touching_wall(),
    }
}

const FLOOR_CENTER: Vec2 = Vec2::new(0.0, -1.3);
const FLOOR_SIZE: Vec2 = Vec2::new(10.0, 1.0);
const RIGHT_WALL_CENTER: Vec2 = Vec2::new(0.8, 0.0);
const WALL_SIZE: Vec2 = Vec2::new(1.0, 10.0);

#[test]
fn test_surface_checks_ignore_own_collider() {
    let mut app = physics_app();
    // Even a character on a surface layer must not stand on itself
    let player = spawn_sensing_character(&mut app, GameLayer::Ground);

    let contacts = run_surface_checks(&mut app, player);
    assert_eq!(contacts, SurfaceContacts::default());
}

#[test]
fn test_surface_checks_only_see_surface_layers() {
    let mut app = physics_app();
    let player = spawn_sensing_character(&mut app, GameLayer::Player);
    spawn_block(&mut app, FLOOR_CENTER, FLOOR_SIZE, GameLayer::Hazard);
    spawn_block(&mut app, RIGHT_WALL_CENTER, WALL_SIZE, GameLayer::Sensor);

    let contacts = run_surface_checks(&mut app, player);
    assert_eq!(contacts, SurfaceContacts::default());
}

#[test]
fn test_ground_check_finds_floor() {
    let mut app = physics_app();
    let player = spawn_sensing_character(&mut app, GameLayer::Player);
    spawn_block(&mut app, FLOOR_CENTER, FLOOR_SIZE, GameLayer::Ground);

    let contacts = run_surface_checks(&mut app, player);
    assert_eq!(
        contacts,
        SurfaceContacts {
            ground: true,
            wall: false
        }
    );
}

#[test]
fn test_wall_check_stays_on_wall_after_slide_flip() {
    let mut app = physics_app();
    let player = spawn_sensing_character(&mut app, GameLayer::Player);
    spawn_block(&mut app, RIGHT_WALL_CENTER, WALL_SIZE, GameLayer::Wall);

    let contacts = run_surface_checks(&mut app, player);
    assert_eq!(
        contacts,
        SurfaceContacts {
            ground: false,
            wall: true
        }
    );

    // Start sliding: facing flips away from the wall
    {
        let tuning = ControllerTuning::default();
        let world = app.world_mut();
        let mut query = world.query::<(&mut CharacterMotor, &mut AnimationSignals)>();
        let (mut motor, mut signals) = query.get_mut(world, player).unwrap();
        let mut body = TestBody {
            position: Vec2::ZERO,
            velocity: Vec2::new(0.0, -2.0),
        };
        motor.move_character(MoveInput::default(), DT, &tuning, &mut body, &mut *signals);
        assert_eq!(motor.state(), MotionState::WallSliding);
        assert_eq!(motor.facing(), Facing::Left);
    }

    app.world_mut().run_system_once(probe_surfaces).unwrap();
    let motor = app.world().get::<CharacterMotor>(player).unwrap();
    assert!(motor.is_touching_wall());
    assert_eq!(motor.state(), MotionState::WallSliding);
}
