//! Dialogue domain: range tracking and interaction.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::{EnemyCensus, EnemyRoster};
use crate::dialogue::{ConversationStarted, Npc, NpcProximity};
use crate::movement::Player;

/// A conversation starts on interact, in range, once no enemies remain.
pub fn should_start_conversation(
    in_range: bool,
    interact_pressed: bool,
    census: &impl EnemyCensus,
) -> bool {
    in_range && interact_pressed && census.all_defeated()
}

pub(crate) fn track_npc_range(
    mut started: MessageReader<CollisionStart>,
    mut ended: MessageReader<CollisionEnd>,
    players: Query<(), With<Player>>,
    mut npcs: Query<&mut NpcProximity>,
) {
    for event in started.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];
        for (npc, other) in pairs {
            if !players.contains(other) {
                continue;
            }
            if let Ok(mut proximity) = npcs.get_mut(npc) {
                proximity.player_in_range = true;
                debug!("Player entered range of NPC {:?}", npc);
            }
        }
    }

    for event in ended.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];
        for (npc, other) in pairs {
            if !players.contains(other) {
                continue;
            }
            if let Ok(mut proximity) = npcs.get_mut(npc) {
                proximity.player_in_range = false;
                debug!("Player left range of NPC {:?}", npc);
            }
        }
    }
}

pub(crate) fn trigger_dialogue(
    keyboard: Res<ButtonInput<KeyCode>>,
    roster: Res<EnemyRoster>,
    npcs: Query<(Entity, &Npc, &NpcProximity)>,
    mut conversations: MessageWriter<ConversationStarted>,
) {
    let interact = keyboard.just_pressed(KeyCode::KeyE);
    if !interact {
        return;
    }

    for (entity, npc, proximity) in &npcs {
        if should_start_conversation(proximity.player_in_range, interact, &*roster) {
            conversations.write(ConversationStarted {
                npc: entity,
                conversation: npc.conversation.clone(),
            });
        } else if proximity.player_in_range {
            debug!(
                "NPC {:?} is waiting, {} enemies remain",
                entity,
                roster.remaining_enemies()
            );
        }
    }
}

pub(crate) fn log_conversations(mut conversations: MessageReader<ConversationStarted>) {
    for event in conversations.read() {
        info!(
            "Starting conversation '{}' with {:?}",
            event.conversation, event.npc
        );
    }
}
