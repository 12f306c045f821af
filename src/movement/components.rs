//! Movement domain: components, physics layers and the character rig.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// Enemy characters
    Enemy,
    /// Damaging level geometry (spikes, kill zones)
    Hazard,
    /// Sensors (NPC ranges, triggers) - should not block movement
    Sensor,
}

impl GameLayer {
    /// Layers the surface probes treat as solid.
    pub fn surfaces() -> LayerMask {
        LayerMask::from([GameLayer::Ground, GameLayer::Wall])
    }
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Probe layout and collaborator references of a controllable character.
/// Built through [`CharacterRig::builder`] so an incomplete rig fails at
/// spawn time instead of inside a physics step.
#[derive(Component, Debug, Clone)]
pub struct CharacterRig {
    pub ground_probe: Vec2,
    pub wall_probe: Vec2,
    pub probe_radius: f32,
    pub spawn_point: Vec2,
    pub respawn_panel: Entity,
}

impl CharacterRig {
    pub fn builder() -> CharacterRigBuilder {
        CharacterRigBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct CharacterRigBuilder {
    ground_probe: Option<Vec2>,
    wall_probe: Option<Vec2>,
    probe_radius: Option<f32>,
    spawn_point: Option<Vec2>,
    respawn_panel: Option<Entity>,
}

impl CharacterRigBuilder {
    pub fn ground_probe(mut self, offset: Vec2) -> Self {
        self.ground_probe = Some(offset);
        self
    }

    pub fn wall_probe(mut self, offset: Vec2) -> Self {
        self.wall_probe = Some(offset);
        self
    }

    pub fn probe_radius(mut self, radius: f32) -> Self {
        self.probe_radius = Some(radius);
        self
    }

    pub fn spawn_point(mut self, point: Vec2) -> Self {
        self.spawn_point = Some(point);
        self
    }

    pub fn respawn_panel(mut self, panel: Entity) -> Self {
        self.respawn_panel = Some(panel);
        self
    }

    pub fn build(self) -> Result<CharacterRig, RigError> {
        let ground_probe = self.ground_probe.ok_or(RigError::Missing("ground probe"))?;
        let wall_probe = self.wall_probe.ok_or(RigError::Missing("wall probe"))?;
        let probe_radius = self.probe_radius.ok_or(RigError::Missing("probe radius"))?;
        let respawn_panel = self
            .respawn_panel
            .ok_or(RigError::Missing("respawn panel"))?;

        if !probe_radius.is_finite() || probe_radius <= 0.0 {
            return Err(RigError::InvalidProbeRadius(probe_radius));
        }
        if wall_probe.x <= 0.0 {
            return Err(RigError::WallProbeBehind(wall_probe.x));
        }

        Ok(CharacterRig {
            ground_probe,
            wall_probe,
            probe_radius,
            spawn_point: self.spawn_point.unwrap_or_default(),
            respawn_panel,
        })
    }
}

/// Error raised when a character rig is assembled without a required part.
#[derive(Debug, Clone, PartialEq)]
pub enum RigError {
    Missing(&'static str),
    InvalidProbeRadius(f32),
    /// The wall probe must start in front of the character
    WallProbeBehind(f32),
}

impl std::fmt::Display for RigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RigError::Missing(part) => write!(f, "character rig is missing its {}", part),
            RigError::InvalidProbeRadius(radius) => {
                write!(f, "probe radius must be positive, got {}", radius)
            }
            RigError::WallProbeBehind(x) => {
                write!(f, "wall probe must sit in front of the character, got x={}", x)
            }
        }
    }
}

impl std::error::Error for RigError {}
