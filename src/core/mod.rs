//! Core domain: time control, camera and global physics settings.

mod events;
mod systems;


pub use events::TimeScaleRequest;
pub use systems::gameplay_active;

use bevy::prelude::*;

use crate::core::systems::{
    apply_time_scale, follow_player, freeze_time_on_death, setup_camera, sync_gravity,
};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<TimeScaleRequest>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (
                    (freeze_time_on_death, apply_time_scale).chain(),
                    follow_player,
                    sync_gravity,
                ),
            );
    }
}
