//! Movement domain: critically damped velocity smoothing.

use bevy::prelude::*;

/// Move `current` toward `target` with a critically damped spring.
///
/// `rate` carries the spring's own velocity between calls and must persist
/// per character. `smooth_time` is roughly the time to reach the target.
/// The result never overshoots `target`.
pub fn smooth_damp(current: Vec2, target: Vec2, rate: &mut Vec2, smooth_time: f32, dt: f32) -> Vec2 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*rate + omega * change) * dt;
    *rate = (*rate - omega * temp) * decay;
    let output = target + (change + temp) * decay;

    // Clamp to the target once we would pass it
    if (target - current).dot(output - target) > 0.0 {
        *rate = Vec2::ZERO;
        return target;
    }

    output
}
