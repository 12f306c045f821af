//! Movement domain: ground and wall probes.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    AnimationSignals, AvianBody, CharacterMotor, CharacterRig, GameLayer, SurfaceContacts,
};

/// Overlap the ground and wall probes against solid surfaces and feed the
/// results to each motor.
pub(crate) fn probe_surfaces(
    spatial_query: SpatialQuery,
    mut query: Query<(
        Entity,
        &Transform,
        &CharacterRig,
        &ComputedMass,
        &mut CharacterMotor,
        &mut LinearVelocity,
        &mut AnimationSignals,
    )>,
) {
    for (entity, transform, rig, mass, mut motor, mut velocity, mut signals) in &mut query {
        let filter =
            SpatialQueryFilter::from_mask(GameLayer::surfaces()).with_excluded_entities([entity]);
        let probe = Collider::circle(rig.probe_radius);
        let position = transform.translation.truncate();

        let ground_anchor = motor.ground_anchor(position, rig.ground_probe);
        let ground = !spatial_query
            .shape_intersections(&probe, ground_anchor, 0.0, &filter)
            .is_empty();

        let wall_anchor = motor.wall_anchor(position, rig.wall_probe);
        let wall = !spatial_query
            .shape_intersections(&probe, wall_anchor, 0.0, &filter)
            .is_empty();

        let was_grounded = motor.is_grounded();
        let mut body = AvianBody::new(transform, &mut velocity, mass);
        motor.sense(SurfaceContacts { ground, wall }, &mut body, &mut *signals);

        if motor.is_grounded() != was_grounded {
            debug!(
                "Ground contact changed: grounded={}, state={:?}",
                motor.is_grounded(),
                motor.state()
            );
        }
    }
}
