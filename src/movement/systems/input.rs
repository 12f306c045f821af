//! Movement domain: input sampling for locomotion.

use bevy::prelude::*;

use crate::movement::MovementInput;

/// Sample the keyboard every frame. Presses are latched until the next fixed
/// step consumes them, so a tap between two physics steps is never lost.
/// Nothing is latched while virtual time is paused, since no step would
/// consume it until play resumes.
pub(crate) fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time<Virtual>>,
    mut input: ResMut<MovementInput>,
) {
    if time.is_paused() {
        input.release();
        return;
    }

    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    input.horizontal = x;
    input.jump_pressed |= keyboard.just_pressed(KeyCode::Space)
        || keyboard.just_pressed(KeyCode::KeyK)
        || keyboard.just_pressed(KeyCode::KeyW)
        || keyboard.just_pressed(KeyCode::ArrowUp);
    input.dash_pressed |=
        keyboard.just_pressed(KeyCode::ShiftLeft) || keyboard.just_pressed(KeyCode::KeyJ);
}
