//! Movement domain: named animation signals emitted by the motor.

use bevy::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimSignal {
    IsJumping,
    JumpUp,
    IsDoubleJumping,
    IsWallSliding,
    IsDashing,
    Hit,
    IsDead,
}

impl AnimSignal {
    pub const ALL: [AnimSignal; 7] = [
        AnimSignal::IsJumping,
        AnimSignal::JumpUp,
        AnimSignal::IsDoubleJumping,
        AnimSignal::IsWallSliding,
        AnimSignal::IsDashing,
        AnimSignal::Hit,
        AnimSignal::IsDead,
    ];
}

/// Fire-and-forget sink for animation signals.
pub trait AnimationSink {
    fn set_bool(&mut self, signal: AnimSignal, value: bool);
    fn set_trigger(&mut self, signal: AnimSignal);
    fn reset_trigger(&mut self, signal: AnimSignal);
}

/// Current animation parameters of a character, read by the visual systems.
#[derive(Component, Debug, Clone, Default)]
pub struct AnimationSignals {
    bools: HashSet<AnimSignal>,
    triggers: HashSet<AnimSignal>,
}

impl AnimationSignals {
    pub fn is_set(&self, signal: AnimSignal) -> bool {
        self.bools.contains(&signal)
    }

    #[cfg(test)]
    pub fn is_triggered(&self, signal: AnimSignal) -> bool {
        self.triggers.contains(&signal)
    }

    /// Read and clear a trigger, as an animation graph does when it fires.
    pub fn consume_trigger(&mut self, signal: AnimSignal) -> bool {
        self.triggers.remove(&signal)
    }
}

impl AnimationSink for AnimationSignals {
    fn set_bool(&mut self, signal: AnimSignal, value: bool) {
        if value {
            self.bools.insert(signal);
        } else {
            self.bools.remove(&signal);
        }
    }

    fn set_trigger(&mut self, signal: AnimSignal) {
        self.triggers.insert(signal);
    }

    fn reset_trigger(&mut self, signal: AnimSignal) {
        self.triggers.remove(&signal);
    }
}
