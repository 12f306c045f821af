//! Core domain: global time control messages.

use bevy::ecs::message::Message;

/// Request a new game time scale. `0` freezes virtual time, anything above
/// resumes it at that relative speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScaleRequest {
    pub scale: f32,
}

impl TimeScaleRequest {
    pub const FREEZE: Self = Self { scale: 0.0 };
    pub const NORMAL: Self = Self { scale: 1.0 };
}

impl Message for TimeScaleRequest {}
