//! Core domain: time scale, camera and world physics setup.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::core::events::TimeScaleRequest;
use crate::movement::{CharacterEvent, ControllerTuning, MotorEvent, Player};

/// World units per screen pixel
const CAMERA_SCALE: f32 = 1.0 / 32.0;
const CAMERA_FOLLOW_RATE: f32 = 6.0;

/// Run condition: true while virtual time is running
pub fn gameplay_active(time: Res<Time<Virtual>>) -> bool {
    !time.is_paused()
}

/// Apply the most recent time scale request to virtual time. Fixed-step
/// systems stop entirely while it is paused.
pub(crate) fn apply_time_scale(
    mut requests: MessageReader<TimeScaleRequest>,
    mut time: ResMut<Time<Virtual>>,
) {
    let Some(request) = requests.read().last().copied() else {
        return;
    };

    if request.scale <= 0.0 {
        time.pause();
        info!("Time frozen");
    } else {
        time.set_relative_speed(request.scale);
        time.unpause();
        info!("Time scale set to {}", request.scale);
    }
}

pub(crate) fn freeze_time_on_death(
    mut events: MessageReader<CharacterEvent>,
    mut requests: MessageWriter<TimeScaleRequest>,
) {
    for event in events.read() {
        if event.event == MotorEvent::FreezeTime {
            requests.write(TimeScaleRequest::FREEZE);
        }
    }
}

/// Keep avian's gravity in step with the controller tuning.
pub(crate) fn sync_gravity(tuning: Res<ControllerTuning>, mut gravity: ResMut<Gravity>) {
    if !tuning.is_changed() {
        return;
    }
    gravity.0 = Vec2::new(0.0, -tuning.gravity);
    debug!("Gravity set to {}", tuning.gravity);
}

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: CAMERA_SCALE,
            ..OrthographicProjection::default_2d()
        }),
    ));
}

pub(crate) fn follow_player(
    time: Res<Time<Real>>,
    player: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut camera: Query<&mut Transform, With<Camera2d>>,
) {
    let Some(target) = player.iter().next() else {
        return;
    };
    let t = (CAMERA_FOLLOW_RATE * time.delta_secs()).min(1.0);
    for mut transform in &mut camera {
        let z = transform.translation.z;
        transform.translation = transform
            .translation
            .lerp(target.translation.with_z(z), t);
    }
}
