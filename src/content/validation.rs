//! Validation for controller tuning values.

use crate::movement::ControllerTuning;

/// A tuning value that would break the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningError {
    pub field: &'static str,
    pub value: f32,
    pub reason: &'static str,
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "tuning field '{}' = {} {}",
            self.field, self.value, self.reason
        )
    }
}

/// Helper macro for recording a failed check
macro_rules! check {
    ($errors:expr, $cond:expr, $field:expr, $value:expr, $reason:expr) => {
        if !$cond {
            $errors.push(TuningError {
                field: $field,
                value: $value,
                reason: $reason,
            });
        }
    };
}

/// Validate tuning values and their relative ordering.
/// Returns a list of errors, empty if the tuning is usable.
pub fn validate_tuning(tuning: &ControllerTuning) -> Vec<TuningError> {
    let mut errors = Vec::new();

    let positive = [
        ("max_life", tuning.max_life),
        ("run_speed", tuning.run_speed),
        ("movement_smoothing", tuning.movement_smoothing),
        ("limit_fall_speed", tuning.limit_fall_speed),
        ("jump_impulse", tuning.jump_impulse),
        ("double_jump_divisor", tuning.double_jump_divisor),
        ("dash_speed", tuning.dash_speed),
        ("dash_active_time", tuning.dash_active_time),
        ("wall_slide_speed", tuning.wall_slide_speed),
        ("wall_jump_push_speed", tuning.wall_jump_push_speed),
        ("stun_duration", tuning.stun_duration),
        ("probe_radius", tuning.probe_radius),
        ("gravity", tuning.gravity),
    ];
    for (field, value) in positive {
        check!(errors, value > 0.0, field, value, "must be positive");
    }

    let non_negative = [
        ("wall_jump_horizontal_factor", tuning.wall_jump_horizontal_factor),
        ("wall_slide_grip", tuning.wall_slide_grip),
        ("wall_release_deadzone", tuning.wall_release_deadzone),
        ("wall_slide_release_delay", tuning.wall_slide_release_delay),
        ("wall_check_grace", tuning.wall_check_grace),
        ("wall_jump_fall_threshold", tuning.wall_jump_fall_threshold),
        ("invincibility_duration", tuning.invincibility_duration),
        ("death_freeze_delay", tuning.death_freeze_delay),
        ("death_hold_delay", tuning.death_hold_delay),
    ];
    for (field, value) in non_negative {
        check!(errors, value >= 0.0, field, value, "must not be negative");
    }

    check!(
        errors,
        tuning.dash_cooldown >= tuning.dash_active_time,
        "dash_cooldown",
        tuning.dash_cooldown,
        "must cover dash_active_time"
    );
    check!(
        errors,
        tuning.wall_jump_release_distance > 0.0,
        "wall_jump_release_distance",
        tuning.wall_jump_release_distance,
        "must be positive"
    );
    check!(
        errors,
        tuning.wall_jump_push_distance > tuning.wall_jump_release_distance,
        "wall_jump_push_distance",
        tuning.wall_jump_push_distance,
        "must exceed wall_jump_release_distance"
    );
    check!(
        errors,
        tuning.wall_jump_max_distance > tuning.wall_jump_push_distance,
        "wall_jump_max_distance",
        tuning.wall_jump_max_distance,
        "must exceed wall_jump_push_distance"
    );
    check!(
        errors,
        tuning.wall_probe.x > 0.0,
        "wall_probe.x",
        tuning.wall_probe.x,
        "must point in front of the character"
    );

    errors
}
