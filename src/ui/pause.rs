//! UI domain: pause overlay.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::core::TimeScaleRequest;
use crate::movement::CharacterMotor;

/// Marker for the pause overlay
#[derive(Component)]
pub struct PauseOverlay;

/// Marker for the resume button on the pause overlay
#[derive(Component)]
pub struct ResumeButton;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PauseAction {
    Open,
    Close,
}

/// Escape toggles the overlay. It never opens over time that is already
/// frozen, nor while a character is dead: the death freeze may land in the
/// same frame, and closing the overlay would then unfreeze it.
pub(crate) fn pause_action(
    escape: bool,
    overlay_open: bool,
    time_paused: bool,
    character_dead: bool,
) -> Option<PauseAction> {
    match (escape, overlay_open) {
        (false, _) => None,
        (true, true) => Some(PauseAction::Close),
        (true, false) if !time_paused && !character_dead => Some(PauseAction::Open),
        (true, false) => None,
    }
}

pub(crate) fn toggle_pause(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time<Virtual>>,
    overlays: Query<Entity, With<PauseOverlay>>,
    motors: Query<&CharacterMotor>,
    mut time_scale: MessageWriter<TimeScaleRequest>,
) {
    let escape = keyboard.just_pressed(KeyCode::Escape);
    let character_dead = motors.iter().any(CharacterMotor::is_dead);
    match pause_action(escape, !overlays.is_empty(), time.is_paused(), character_dead) {
        Some(PauseAction::Open) => {
            spawn_pause_overlay(&mut commands);
            time_scale.write(TimeScaleRequest::FREEZE);
            info!("Game paused");
        }
        Some(PauseAction::Close) => close_pause_overlay(&mut commands, &overlays, &mut time_scale),
        None => {}
    }
}

pub(crate) fn handle_resume_button(
    mut commands: Commands,
    button_query: Query<&Interaction, (With<ResumeButton>, Changed<Interaction>)>,
    overlays: Query<Entity, With<PauseOverlay>>,
    mut time_scale: MessageWriter<TimeScaleRequest>,
) {
    if button_query
        .iter()
        .any(|interaction| *interaction == Interaction::Pressed)
    {
        close_pause_overlay(&mut commands, &overlays, &mut time_scale);
    }
}

/// Unload the overlay and put time back to normal speed.
fn close_pause_overlay(
    commands: &mut Commands,
    overlays: &Query<Entity, With<PauseOverlay>>,
    time_scale: &mut MessageWriter<TimeScaleRequest>,
) {
    for entity in overlays.iter() {
        commands.entity(entity).despawn();
    }
    time_scale.write(TimeScaleRequest::NORMAL);
    info!("Game resumed");
}

fn spawn_pause_overlay(commands: &mut Commands) {
    commands
        .spawn((
            PauseOverlay,
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
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            ZIndex(90),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("PAUSED"),
                TextFont {
                    font_size: 56.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));

            parent
                .spawn((
                    ResumeButton,
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
                    Text::new("RESUME"),
                    TextFont {
                        font_size: 28.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.9, 0.9, 0.9)),
                ));
        });
}
