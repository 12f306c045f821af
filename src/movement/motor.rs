//! Movement domain: the character motor state machine.
//!
//! The motor is engine-agnostic. Each fixed step the systems call, in order,
//! [`CharacterMotor::tick_effects`], [`CharacterMotor::sense`],
//! [`CharacterMotor::limit_wall_jump`] and [`CharacterMotor::move_character`].
//! Damage can interrupt at any point through [`CharacterMotor::apply_damage`]
//! and [`CharacterMotor::fall_death`]. Side effects the rest of the game cares
//! about are queued as [`MotorEvent`]s and drained once per step.

use bevy::prelude::*;

use crate::movement::body::MotorBody;
use crate::movement::resources::ControllerTuning;
use crate::movement::signals::{AnimSignal, AnimationSink};
use crate::movement::smoothing::smooth_damp;
use crate::movement::timers::{Effect, EffectTimers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}

/// The exclusive motion mode of a character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionState {
    Idle,
    Jumping,
    Falling,
    Dashing,
    WallSliding,
    /// Horizontal control is overridden by the distance policy until the
    /// character has travelled far enough from `launch_x`.
    WallJumpRecovery {
        launch_x: f32,
        control_restored: bool,
    },
    Stunned,
    Dead,
}

impl MotionState {
    /// States the sensor is free to re-derive from contacts and velocity.
    fn is_free(self) -> bool {
        matches!(
            self,
            MotionState::Idle | MotionState::Jumping | MotionState::Falling
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorEvent {
    /// `dust` is false when landing against a wall or out of a dash
    Landed { dust: bool },
    Jumped,
    DoubleJumped,
    WallSlideStarted,
    WallSlideEnded,
    WallJumped,
    DashStarted,
    DashEnded,
    Damaged,
    StunEnded,
    InvincibilityEnded,
    DeathStarted,
    FreezeTime,
    ShowRespawnPanel,
    RespawnReady,
    Respawned,
}

/// One step of player intent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveInput {
    pub horizontal: f32,
    pub jump: bool,
    pub dash: bool,
}

/// Results of the two surface probes for one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceContacts {
    pub ground: bool,
    pub wall: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Ignored,
    Stunned,
    Killed,
}

#[derive(Component, Debug, Clone)]
pub struct CharacterMotor {
    state: MotionState,
    grounded: bool,
    touching_wall: bool,
    facing: Facing,
    life: f32,
    max_life: f32,
    can_double_jump: bool,
    /// Wall probe sits behind the character while wall sliding
    probe_behind: bool,
    /// Set by the sensor when a wall contact cut a dash short this step
    dash_hit_wall: bool,
    smoothing_rate: Vec2,
    effects: EffectTimers,
    events: Vec<MotorEvent>,
}

impl CharacterMotor {
    pub fn new(tuning: &ControllerTuning) -> Self {
        Self {
            state: MotionState::Falling,
            grounded: false,
            touching_wall: false,
            facing: Facing::Right,
            life: tuning.max_life,
            max_life: tuning.max_life,
            can_double_jump: true,
            probe_behind: false,
            dash_hit_wall: false,
            smoothing_rate: Vec2::ZERO,
            effects: EffectTimers::default(),
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> MotionState {
        self.state
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_touching_wall(&self) -> bool {
        self.touching_wall
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn life(&self) -> f32 {
        self.life
    }

    pub fn max_life(&self) -> f32 {
        self.max_life
    }

    pub fn can_double_jump(&self) -> bool {
        self.can_double_jump
    }

    pub fn can_dash(&self) -> bool {
        !self.effects.is_pending(Effect::DashCooldown) && self.state != MotionState::Dead
    }

    pub fn is_dashing(&self) -> bool {
        self.state == MotionState::Dashing
    }

    pub fn is_wall_sliding(&self) -> bool {
        self.state == MotionState::WallSliding
    }

    pub fn is_dead(&self) -> bool {
        self.state == MotionState::Dead
    }

    pub fn in_wall_jump_recovery(&self) -> bool {
        matches!(self.state, MotionState::WallJumpRecovery { .. })
    }

    pub fn is_invincible(&self) -> bool {
        self.state == MotionState::Dead || self.effects.is_pending(Effect::Invincibility)
    }

    pub fn can_move(&self) -> bool {
        match self.state {
            MotionState::Stunned | MotionState::Dead => false,
            MotionState::WallJumpRecovery {
                control_restored, ..
            } => control_restored,
            _ => true,
        }
    }

    pub fn effects(&self) -> &EffectTimers {
        &self.effects
    }

    /// World position of the ground probe.
    pub fn ground_anchor(&self, position: Vec2, offset: Vec2) -> Vec2 {
        position + offset
    }

    /// World position of the wall probe. The probe sits in front of the
    /// character, or behind it while wall sliding since the slide flips facing.
    pub fn wall_anchor(&self, position: Vec2, offset: Vec2) -> Vec2 {
        let side = if self.probe_behind { -1.0 } else { 1.0 };
        position + Vec2::new(offset.x * self.facing.sign() * side, offset.y)
    }

    #[cfg(test)]
    pub fn wall_probe_behind(&self) -> bool {
        self.probe_behind
    }

    pub fn drain_events(&mut self) -> Vec<MotorEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[MotorEvent] {
        &self.events
    }

    /// Advance owned effect countdowns and resolve the ones that finished.
    pub fn tick_effects(
        &mut self,
        dt: f32,
        tuning: &ControllerTuning,
        body: &mut impl MotorBody,
        signals: &mut impl AnimationSink,
    ) {
        for effect in self.effects.tick(dt) {
            self.resolve_effect(effect, tuning, body, signals);
        }
    }

    fn resolve_effect(
        &mut self,
        effect: Effect,
        tuning: &ControllerTuning,
        body: &mut impl MotorBody,
        signals: &mut impl AnimationSink,
    ) {
        match effect {
            Effect::DashActive => {
                if self.is_dashing() {
                    self.end_dash(body.velocity().y, signals);
                }
            }
            Effect::DashCooldown | Effect::WallCheckGrace => {}
            Effect::Stun => {
                signals.reset_trigger(AnimSignal::Hit);
                if self.state == MotionState::Stunned {
                    self.state = self.free_state(body.velocity().y);
                }
                self.events.push(MotorEvent::StunEnded);
            }
            Effect::Invincibility => {
                self.events.push(MotorEvent::InvincibilityEnded);
            }
            Effect::WallSlideRelease => {
                if self.is_wall_sliding() {
                    self.can_double_jump = true;
                    self.exit_wall_slide(body.velocity().y, signals);
                }
            }
            Effect::DeathFreeze => {
                self.events.push(MotorEvent::FreezeTime);
                self.events.push(MotorEvent::ShowRespawnPanel);
                let velocity = body.velocity();
                body.set_velocity(Vec2::new(0.0, velocity.y));
                self.effects
                    .restart(Effect::DeathHold, tuning.death_hold_delay);
            }
            Effect::DeathHold => {
                self.events.push(MotorEvent::RespawnReady);
            }
        }
    }

    /// Apply this step's probe results.
    pub fn sense(
        &mut self,
        contacts: SurfaceContacts,
        body: &mut impl MotorBody,
        signals: &mut impl AnimationSink,
    ) {
        let was_grounded = self.grounded;
        let velocity = body.velocity();
        self.grounded = contacts.ground;
        self.dash_hit_wall = false;

        if self.grounded && !was_grounded {
            signals.set_bool(AnimSignal::IsJumping, false);
            signals.set_bool(AnimSignal::JumpUp, false);
            signals.set_bool(AnimSignal::IsDoubleJumping, false);
            let dust = !self.touching_wall && !self.is_dashing();
            self.can_double_jump = true;
            self.events.push(MotorEvent::Landed { dust });
            if self.in_wall_jump_recovery() && velocity.y < 0.0 {
                self.end_wall_jump_recovery(velocity.y);
            }
        }

        if self.grounded {
            self.touching_wall = false;
        } else {
            signals.set_bool(AnimSignal::IsJumping, true);
            self.touching_wall = contacts.wall;
            if self.touching_wall && self.is_dashing() {
                self.end_dash(velocity.y, signals);
                self.dash_hit_wall = true;
            }
        }

        if self.state.is_free() {
            self.state = self.free_state(velocity.y);
        }
    }

    /// Distance policy applied while recovering from a wall jump.
    pub fn limit_wall_jump(&mut self, tuning: &ControllerTuning, body: &mut impl MotorBody) {
        let MotionState::WallJumpRecovery { launch_x, .. } = self.state else {
            return;
        };

        let velocity = body.velocity();
        if velocity.y < -tuning.wall_jump_fall_threshold {
            self.end_wall_jump_recovery(velocity.y);
            return;
        }

        let distance = (launch_x - body.position().x) * self.facing.sign();
        let release = -tuning.wall_jump_release_distance;
        let push = -tuning.wall_jump_push_distance;
        let max = -tuning.wall_jump_max_distance;

        if distance < release && distance > push {
            self.restore_wall_jump_control();
        } else if distance < push && distance >= max {
            self.restore_wall_jump_control();
            body.set_velocity(Vec2::new(
                tuning.wall_jump_push_speed * self.facing.sign(),
                velocity.y,
            ));
        } else if distance < max || distance > 0.0 {
            self.end_wall_jump_recovery(velocity.y);
            body.set_velocity(Vec2::new(0.0, velocity.y));
        }
    }

    /// Resolve one step of player intent. Does nothing while movement is locked.
    pub fn move_character(
        &mut self,
        input: MoveInput,
        dt: f32,
        tuning: &ControllerTuning,
        body: &mut impl MotorBody,
        signals: &mut impl AnimationSink,
    ) {
        if !self.can_move() {
            return;
        }
        let dash_hit_wall = std::mem::take(&mut self.dash_hit_wall);

        // Dash wins over every other input, including an active wall slide
        if input.dash && self.can_dash() {
            if self.is_wall_sliding() {
                self.can_double_jump = true;
                self.exit_wall_slide(body.velocity().y, signals);
            }
            self.start_dash(tuning, signals);
        }

        if self.is_dashing() {
            body.set_velocity(Vec2::new(self.facing.sign() * tuning.dash_speed, 0.0));
        } else if self.grounded || tuning.air_control {
            let mut velocity = body.velocity();
            velocity.y = velocity.y.max(-tuning.limit_fall_speed);
            let target = Vec2::new(input.horizontal * tuning.run_speed, velocity.y);
            let smoothed = smooth_damp(
                velocity,
                target,
                &mut self.smoothing_rate,
                tuning.movement_smoothing,
                dt,
            );
            body.set_velocity(smoothed);

            let wants_right = input.horizontal > 0.0 && self.facing == Facing::Left;
            let wants_left = input.horizontal < 0.0 && self.facing == Facing::Right;
            if (wants_right || wants_left) && !self.is_wall_sliding() {
                self.facing = self.facing.flipped();
            }
        }

        if self.grounded && input.jump {
            self.ground_jump(tuning, body, signals);
        } else if !self.grounded
            && input.jump
            && self.can_double_jump
            && !self.is_wall_sliding()
        {
            self.double_jump(tuning, body, signals);
        } else if self.touching_wall && !self.grounded && !self.is_dashing() {
            self.wall_contact(input, dash_hit_wall, tuning, body, signals);
        } else if self.is_wall_sliding()
            && !self.touching_wall
            && !self.effects.is_pending(Effect::WallCheckGrace)
        {
            self.can_double_jump = true;
            self.exit_wall_slide(body.velocity().y, signals);
        }
    }

    /// Apply a hit. Ignored while invincible, which includes being dead.
    pub fn apply_damage(
        &mut self,
        amount: f32,
        knockback: Vec2,
        tuning: &ControllerTuning,
        body: &mut impl MotorBody,
        signals: &mut impl AnimationSink,
    ) -> DamageOutcome {
        if self.is_invincible() {
            return DamageOutcome::Ignored;
        }

        self.life -= amount;
        signals.set_trigger(AnimSignal::Hit);
        self.events.push(MotorEvent::Damaged);

        if self.life <= 0.0 {
            self.begin_death(tuning, body, signals);
            return DamageOutcome::Killed;
        }

        let vy = body.velocity().y;
        if self.is_wall_sliding() {
            self.exit_wall_slide(vy, signals);
        } else if self.is_dashing() {
            self.end_dash(vy, signals);
        }
        self.state = MotionState::Stunned;
        self.effects.restart(Effect::Stun, tuning.stun_duration);
        self.effects
            .restart(Effect::Invincibility, tuning.invincibility_duration);

        body.set_velocity(Vec2::ZERO);
        body.apply_impulse(Vec2::new(knockback.x * self.facing.sign(), knockback.y));
        DamageOutcome::Stunned
    }

    /// Kill the character regardless of invincibility. Runs the death
    /// sequence at most once.
    pub fn fall_death(
        &mut self,
        tuning: &ControllerTuning,
        body: &mut impl MotorBody,
        signals: &mut impl AnimationSink,
    ) -> bool {
        if self.is_dead() {
            return false;
        }
        self.life = 0.0;
        self.begin_death(tuning, body, signals);
        true
    }

    /// Bring the character back with full life. Position is left to the caller.
    pub fn respawn(&mut self, body: &mut impl MotorBody, signals: &mut impl AnimationSink) {
        self.state = MotionState::Falling;
        self.grounded = false;
        self.touching_wall = false;
        self.facing = Facing::Right;
        self.life = self.max_life;
        self.can_double_jump = true;
        self.probe_behind = false;
        self.dash_hit_wall = false;
        self.smoothing_rate = Vec2::ZERO;
        self.effects.clear();
        for signal in AnimSignal::ALL {
            signals.set_bool(signal, false);
            signals.reset_trigger(signal);
        }
        body.set_velocity(Vec2::ZERO);
        self.events.push(MotorEvent::Respawned);
    }

    fn begin_death(
        &mut self,
        tuning: &ControllerTuning,
        body: &mut impl MotorBody,
        signals: &mut impl AnimationSink,
    ) {
        if self.is_wall_sliding() {
            self.exit_wall_slide(body.velocity().y, signals);
        }
        signals.set_bool(AnimSignal::IsDashing, false);
        signals.set_bool(AnimSignal::IsDead, true);
        self.state = MotionState::Dead;
        self.effects.clear();
        self.effects
            .restart(Effect::DeathFreeze, tuning.death_freeze_delay);
        self.events.push(MotorEvent::DeathStarted);
    }

    fn ground_jump(
        &mut self,
        tuning: &ControllerTuning,
        body: &mut impl MotorBody,
        signals: &mut impl AnimationSink,
    ) {
        signals.set_bool(AnimSignal::IsJumping, true);
        signals.set_bool(AnimSignal::JumpUp, true);
        self.grounded = false;
        body.apply_impulse(Vec2::new(0.0, tuning.jump_impulse));
        self.can_double_jump = true;
        if self.is_wall_sliding() {
            self.exit_wall_slide(body.velocity().y, signals);
        }
        if self.state.is_free() {
            self.state = MotionState::Jumping;
        }
        self.events.push(MotorEvent::Jumped);
    }

    fn double_jump(
        &mut self,
        tuning: &ControllerTuning,
        body: &mut impl MotorBody,
        signals: &mut impl AnimationSink,
    ) {
        self.can_double_jump = false;
        let velocity = body.velocity();
        body.set_velocity(Vec2::new(velocity.x, 0.0));
        body.apply_impulse(Vec2::new(
            0.0,
            tuning.jump_impulse / tuning.double_jump_divisor,
        ));
        signals.set_bool(AnimSignal::IsDoubleJumping, true);
        if self.state.is_free() {
            self.state = MotionState::Jumping;
        }
        self.events.push(MotorEvent::DoubleJumped);
    }

    fn wall_contact(
        &mut self,
        input: MoveInput,
        dash_hit_wall: bool,
        tuning: &ControllerTuning,
        body: &mut impl MotorBody,
        signals: &mut impl AnimationSink,
    ) {
        if !self.is_wall_sliding() && (body.velocity().y < 0.0 || dash_hit_wall) {
            self.state = MotionState::WallSliding;
            self.probe_behind = true;
            self.facing = self.facing.flipped();
            self.effects
                .restart(Effect::WallCheckGrace, tuning.wall_check_grace);
            self.can_double_jump = true;
            signals.set_bool(AnimSignal::IsWallSliding, true);
            self.events.push(MotorEvent::WallSlideStarted);
        }

        if !self.is_wall_sliding() {
            return;
        }

        if input.jump {
            self.wall_jump(tuning, body, signals);
            return;
        }

        if input.horizontal * self.facing.sign() > tuning.wall_release_deadzone {
            self.effects
                .start_if_idle(Effect::WallSlideRelease, tuning.wall_slide_release_delay);
        } else {
            body.set_velocity(Vec2::new(
                -self.facing.sign() * tuning.wall_slide_grip,
                -tuning.wall_slide_speed,
            ));
        }
    }

    fn wall_jump(
        &mut self,
        tuning: &ControllerTuning,
        body: &mut impl MotorBody,
        signals: &mut impl AnimationSink,
    ) {
        signals.set_bool(AnimSignal::IsJumping, true);
        signals.set_bool(AnimSignal::JumpUp, true);
        body.set_velocity(Vec2::ZERO);
        body.apply_impulse(Vec2::new(
            self.facing.sign() * tuning.jump_impulse * tuning.wall_jump_horizontal_factor,
            tuning.jump_impulse,
        ));
        let launch_x = body.position().x;
        self.can_double_jump = false;
        self.exit_wall_slide(body.velocity().y, signals);
        self.state = MotionState::WallJumpRecovery {
            launch_x,
            control_restored: false,
        };
        self.events.push(MotorEvent::WallJumped);
    }

    fn start_dash(&mut self, tuning: &ControllerTuning, signals: &mut impl AnimationSink) {
        signals.set_bool(AnimSignal::IsDashing, true);
        self.state = MotionState::Dashing;
        self.effects
            .restart(Effect::DashActive, tuning.dash_active_time);
        self.effects.restart(Effect::DashCooldown, tuning.dash_cooldown);
        self.events.push(MotorEvent::DashStarted);
    }

    fn end_dash(&mut self, vy: f32, signals: &mut impl AnimationSink) {
        signals.set_bool(AnimSignal::IsDashing, false);
        self.effects.cancel(Effect::DashActive);
        self.state = self.free_state(vy);
        self.events.push(MotorEvent::DashEnded);
    }

    fn exit_wall_slide(&mut self, vy: f32, signals: &mut impl AnimationSink) {
        self.probe_behind = false;
        signals.set_bool(AnimSignal::IsWallSliding, false);
        self.effects.cancel(Effect::WallSlideRelease);
        self.effects.cancel(Effect::WallCheckGrace);
        if self.is_wall_sliding() {
            self.state = self.free_state(vy);
        }
        self.events.push(MotorEvent::WallSlideEnded);
    }

    fn restore_wall_jump_control(&mut self) {
        if let MotionState::WallJumpRecovery {
            control_restored, ..
        } = &mut self.state
        {
            *control_restored = true;
        }
    }

    fn end_wall_jump_recovery(&mut self, vy: f32) {
        if self.in_wall_jump_recovery() {
            self.state = self.free_state(vy);
        }
    }

    fn free_state(&self, vy: f32) -> MotionState {
        if self.grounded {
            MotionState::Idle
        } else if vy > 0.0 {
            MotionState::Jumping
        } else {
            MotionState::Falling
        }
    }
}
