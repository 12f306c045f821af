//! Combat domain: player attacks, contact damage, kill zones and the enemy roster.

mod components;
mod events;
mod resources;
mod spawn;
mod systems;


pub use components::AttackCapability;
pub use events::{DamageEvent, EnemyDefeatedEvent, FallDeathEvent};
pub use resources::{CombatInput, CombatTuning, EnemyCensus, EnemyRoster};
pub use spawn::{ENEMY_SIZE, EnemyBundle, KillZoneBundle, SpikeBundle};

use bevy::prelude::*;

use crate::combat::systems::{
    apply_damage_events, apply_fall_deaths, cleanup_expired_slashes, detect_contact_damage,
    patrol_enemies, process_enemy_defeats, process_player_attacks, read_combat_input,
    tick_attack_cooldowns, toggle_attack_on_death, track_enemy_roster,
};
use crate::core::gameplay_active;
use crate::movement::MotorSet;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatTuning>()
            .init_resource::<CombatInput>()
            .init_resource::<EnemyRoster>()
            .add_message::<DamageEvent>()
            .add_message::<FallDeathEvent>()
            .add_message::<EnemyDefeatedEvent>()
            .add_systems(
                Update,
                (read_combat_input, tick_attack_cooldowns, process_player_attacks)
                    .chain()
                    .run_if(gameplay_active),
            )
            .add_systems(
                Update,
                (
                    (track_enemy_roster, process_enemy_defeats)
                        .chain()
                        .after(process_player_attacks),
                    toggle_attack_on_death,
                    cleanup_expired_slashes,
                ),
            )
            .add_systems(
                FixedUpdate,
                (
                    patrol_enemies.in_set(MotorSet::Resolve),
                    (detect_contact_damage, apply_damage_events, apply_fall_deaths)
                        .chain()
                        .in_set(MotorSet::Interrupt),
                ),
            );
    }
}
