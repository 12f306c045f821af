//! UI domain: life HUD, respawn panel and pause overlay.

mod hud_life;
mod pause;
mod respawn;


pub use respawn::RespawnPanel;

pub(crate) use respawn::spawn_respawn_panel;

use bevy::prelude::*;

use crate::ui::hud_life::{spawn_life_bar_ui, update_life_bar};
use crate::ui::pause::{handle_resume_button, toggle_pause};
use crate::ui::respawn::{handle_respawn_button, show_respawn_panel};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_respawn_panel, spawn_life_bar_ui))
            .add_systems(
                Update,
                (
                    update_life_bar,
                    show_respawn_panel,
                    handle_respawn_button,
                    (toggle_pause, handle_resume_button).chain(),
                ),
            );
    }
}
