//! Content domain: controller tuning loaded from `assets/data/controller.ron`.

mod loader;
mod validation;


pub use loader::load_tuning;
pub use validation::validate_tuning;

use bevy::prelude::*;
use std::path::Path;

use crate::movement::ControllerTuning;

pub const TUNING_PATH: &str = "assets/data/controller.ron";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_controller_tuning);
    }
}

/// Read and validate the tuning file. Any failure keeps the built-in
/// defaults so the game still starts.
fn load_controller_tuning(mut commands: Commands) {
    let tuning = match load_tuning(Path::new(TUNING_PATH)) {
        Ok(tuning) => tuning,
        Err(e) => {
            warn!("{}; using default tuning", e);
            commands.insert_resource(ControllerTuning::default());
            return;
        }
    };

    let errors = validate_tuning(&tuning);
    if !errors.is_empty() {
        for error in &errors {
            error!("{}", error);
        }
        warn!(
            "{} invalid tuning values in {}; using default tuning",
            errors.len(),
            TUNING_PATH
        );
        commands.insert_resource(ControllerTuning::default());
        return;
    }

    info!(
        "Loaded controller tuning from {}: run_speed={}, jump_impulse={}, dash_speed={}",
        TUNING_PATH, tuning.run_speed, tuning.jump_impulse, tuning.dash_speed
    );
    commands.insert_resource(tuning);
}
