//! UI domain: respawn panel presentation and respawn flow.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::core::TimeScaleRequest;
use crate::movement::{CharacterEvent, CharacterMotor, CharacterRig, MotorEvent, RespawnRequest};

/// Marker for the respawn overlay. Spawned hidden at startup and referenced
/// by each character rig.
#[derive(Component)]
pub struct RespawnPanel;

/// Marker for the respawn button on the panel
#[derive(Component)]
pub struct RespawnButton;

pub(crate) fn spawn_respawn_panel(mut commands: Commands) {
    // Full screen dark overlay
    commands
        .spawn((
            RespawnPanel,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.85)),
            Visibility::Hidden,
            ZIndex(100),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("YOU DIED"),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.15, 0.15)),
                Node {
                    margin: UiRect::bottom(Val::Px(60.0)),
                    ..default()
                },
            ));

            parent
                .spawn((
                    RespawnButton,
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(40.0), Val::Px(16.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.2, 0.2, 0.25)),
                    BorderColor::all(Color::srgb(0.5, 0.5, 0.6)),
                ))
                .with_child((
                    Text::new("RESPAWN"),
                    TextFont {
                        font_size: 28.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.9, 0.9, 0.9)),
                ));

            parent.spawn((
                Text::new("Press [Enter] or click to respawn"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.4, 0.4, 0.45)),
                Node {
                    margin: UiRect::top(Val::Px(20.0)),
                    ..default()
                },
            ));
        });
}

/// Reveal the panel referenced by the dying character's rig.
pub(crate) fn show_respawn_panel(
    mut events: MessageReader<CharacterEvent>,
    rigs: Query<&CharacterRig>,
    mut panels: Query<&mut Visibility, With<RespawnPanel>>,
) {
    for event in events.read() {
        match event.event {
            MotorEvent::ShowRespawnPanel => {
                let Ok(rig) = rigs.get(event.entity) else {
                    continue;
                };
                if let Ok(mut visibility) = panels.get_mut(rig.respawn_panel) {
                    *visibility = Visibility::Visible;
                    info!("Showing respawn panel for {:?}", event.entity);
                }
            }
            MotorEvent::RespawnReady => {
                debug!("{:?} death hold finished", event.entity);
            }
            _ => {}
        }
    }
}

pub(crate) fn handle_respawn_button(
    keyboard: Res<ButtonInput<KeyCode>>,
    button_query: Query<&Interaction, (With<RespawnButton>, Changed<Interaction>)>,
    characters: Query<(Entity, &CharacterRig, &CharacterMotor)>,
    mut panels: Query<&mut Visibility, With<RespawnPanel>>,
    mut respawns: MessageWriter<RespawnRequest>,
    mut time_scale: MessageWriter<TimeScaleRequest>,
) {
    let should_respawn = keyboard.just_pressed(KeyCode::Enter)
        || keyboard.just_pressed(KeyCode::NumpadEnter)
        || button_query
            .iter()
            .any(|interaction| *interaction == Interaction::Pressed);

    if !should_respawn {
        return;
    }

    for (entity, rig, motor) in &characters {
        if !motor.is_dead() {
            continue;
        }
        let Ok(mut visibility) = panels.get_mut(rig.respawn_panel) else {
            continue;
        };
        if *visibility != Visibility::Visible {
            continue;
        }

        *visibility = Visibility::Hidden;
        time_scale.write(TimeScaleRequest::NORMAL);
        respawns.write(RespawnRequest { entity });
    }
}
