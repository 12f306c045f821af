//! UI domain: player HUD life bar.

use bevy::prelude::*;

use crate::movement::{CharacterMotor, Player};

pub(crate) const LIFE_BAR_WIDTH: f32 = 200.0;
pub(crate) const LIFE_BAR_HEIGHT: f32 = 20.0;
pub(crate) const LIFE_BAR_PADDING: f32 = 16.0;

/// Marker for the player's HUD life bar container
#[derive(Component)]
pub struct LifeBarUI;

/// Marker for the life bar fill element
#[derive(Component)]
pub struct LifeBarFill;

pub(crate) fn spawn_life_bar_ui(mut commands: Commands) {
    commands
        .spawn((
            LifeBarUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(LIFE_BAR_PADDING),
                top: Val::Px(LIFE_BAR_PADDING),
                width: Val::Px(LIFE_BAR_WIDTH),
                height: Val::Px(LIFE_BAR_HEIGHT),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.8)),
            BorderColor::all(Color::srgb(0.3, 0.3, 0.3)),
        ))
        .with_children(|parent| {
            parent.spawn((
                LifeBarFill,
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.2, 0.8, 0.3)),
            ));
        });
}

/// Fill fraction of the life bar, clamped to the bar.
pub(crate) fn life_fraction(life: f32, max_life: f32) -> f32 {
    if max_life <= 0.0 {
        return 0.0;
    }
    (life / max_life).clamp(0.0, 1.0)
}

pub(crate) fn update_life_bar(
    player_query: Query<&CharacterMotor, (With<Player>, Changed<CharacterMotor>)>,
    mut fill_query: Query<(&mut Node, &mut BackgroundColor), With<LifeBarFill>>,
) {
    let Ok(motor) = player_query.single() else {
        return;
    };

    let percent = life_fraction(motor.life(), motor.max_life());
    for (mut node, mut bg_color) in &mut fill_query {
        node.width = Val::Percent(percent * 100.0);

        // Color gradient: green -> yellow -> red
        let color = if percent > 0.5 {
            let t = (percent - 0.5) * 2.0;
            Color::srgb(1.0 - t * 0.8, 0.8, 0.3 * (1.0 - t))
        } else {
            let t = percent * 2.0;
            Color::srgb(0.9, 0.2 + t * 0.6, 0.2)
        };
        bg_color.0 = color;
    }
}
