//! Movement domain: owned countdowns for timed ability effects.

/// Countdowns closer to zero than this are treated as finished, so that a
/// window of N fixed steps ends on the Nth step despite float drift.
const FINISH_EPSILON: f32 = 1e-4;

/// A timed effect owned by a character motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Dash velocity is held while pending
    DashActive,
    /// Dash cannot be started again while pending
    DashCooldown,
    /// Movement is locked while pending
    Stun,
    /// Damage is ignored while pending
    Invincibility,
    /// Wall detach checks are ignored while pending
    WallCheckGrace,
    /// Delayed wall-slide exit after steering away from the wall
    WallSlideRelease,
    /// Delay between the death animation and the time freeze
    DeathFreeze,
    /// Hold after the freeze, reserved for the respawn handoff
    DeathHold,
}

/// Pending effects, at most one countdown per [`Effect`] kind.
#[derive(Debug, Clone, Default)]
pub struct EffectTimers {
    pending: Vec<(Effect, f32)>,
}

impl EffectTimers {
    /// Schedule `effect`, replacing any pending countdown of the same kind.
    pub fn restart(&mut self, effect: Effect, seconds: f32) {
        self.cancel(effect);
        self.pending.push((effect, seconds.max(0.0)));
    }

    /// Schedule `effect` only if no countdown of that kind is pending.
    /// Returns true if a new countdown was started.
    pub fn start_if_idle(&mut self, effect: Effect, seconds: f32) -> bool {
        if self.is_pending(effect) {
            return false;
        }
        self.pending.push((effect, seconds.max(0.0)));
        true
    }

    pub fn cancel(&mut self, effect: Effect) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(kind, _)| *kind != effect);
        self.pending.len() != before
    }

    pub fn is_pending(&self, effect: Effect) -> bool {
        self.pending.iter().any(|(kind, _)| *kind == effect)
    }

    pub fn remaining(&self, effect: Effect) -> Option<f32> {
        self.pending
            .iter()
            .find(|(kind, _)| *kind == effect)
            .map(|(_, remaining)| *remaining)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advance every countdown by `dt` seconds and return the effects that
    /// finished, in the order they were scheduled.
    pub fn tick(&mut self, dt: f32) -> Vec<Effect> {
        let mut finished = Vec::new();
        self.pending.retain_mut(|(kind, remaining)| {
            *remaining -= dt;
            if *remaining <= FINISH_EPSILON {
                finished.push(*kind);
                false
            } else {
                true
            }
        });
        finished
    }
}
