//! Avian2D physics backend.
//!
//! Enable with the `avian2d` feature. Besides reading and writing
//! [`LinearVelocity`], this backend can detect ground and walls itself:
//! characters carrying a [`JumpProbe`] get their [`JumpSensors`] filled by
//! shapecasts every frame.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::ChargeJumpSet;
use crate::backend::JumpPhysicsBackend;
use crate::config::ProbeConfig;
use crate::detection::JumpSensors;
use crate::machine::ChargeJump;

/// Avian2D physics backend for the jump machine.
pub struct Avian2dBackend;

impl JumpPhysicsBackend for Avian2dBackend {
    type VelocityComponent = LinearVelocity;

    fn plugin() -> impl Plugin {
        Avian2dBackendPlugin
    }

    fn read_velocity(velocity: &LinearVelocity) -> Vec2 {
        velocity.0
    }

    fn write_velocity(velocity: &mut LinearVelocity, value: Vec2) {
        velocity.0 = value;
    }
}

/// Shapecast surface detection for a character.
///
/// Characters without a probe keep whatever [`JumpSensors`] the game
/// writes.
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq)]
#[reflect(Component)]
#[require(JumpSensors)]
pub struct JumpProbe(pub ProbeConfig);

/// Plugin that sets up Avian2D-specific systems for the jump machine.
pub struct Avian2dBackendPlugin;

impl Plugin for Avian2dBackendPlugin {
    fn build(&self, app: &mut App) {
        app.register_required_components::<ChargeJump, RigidBody>();
        app.register_required_components::<ChargeJump, LinearVelocity>();
        app.register_type::<JumpProbe>();

        app.add_systems(Update, probe_surfaces.in_set(ChargeJumpSet::Sensors));
    }
}

/// Cast a segment from `origin` and return the hit distance.
fn cast_segment(
    spatial_query: &SpatialQuery,
    origin: Vec2,
    direction: Dir2,
    max_distance: f32,
    segment_half: Vec2,
    exclude_entity: Entity,
    collision_layers: Option<&CollisionLayers>,
) -> Option<f32> {
    let shape = Collider::segment(-segment_half, segment_half);

    let filter = match collision_layers {
        Some(layers) => {
            SpatialQueryFilter::from_mask(layers.filters).with_excluded_entities([exclude_entity])
        }
        None => SpatialQueryFilter::default().with_excluded_entities([exclude_entity]),
    };

    spatial_query
        .cast_shape(
            &shape,
            origin,
            0.0,
            direction,
            &ShapeCastConfig::from_max_distance(max_distance),
            &filter,
        )
        .map(|hit| hit.distance)
}

/// Ground and wall detection for characters with a [`JumpProbe`].
fn probe_surfaces(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    mut q_probes: Query<(
        Entity,
        &GlobalTransform,
        &JumpProbe,
        &mut JumpSensors,
        Option<&CollisionLayers>,
    )>,
) {
    let dt = time.delta_secs();

    for (entity, transform, probe, mut sensors, layers) in &mut q_probes {
        let config = &probe.0;
        let position = transform.translation().xy();

        let ground_half = Vec2::new(config.ground_cast_width / 2.0, 0.0);
        sensors.grounded = cast_segment(
            &spatial_query,
            position,
            Dir2::NEG_Y,
            config.ground_distance,
            ground_half,
            entity,
            layers,
        )
        .is_some();

        let wall_half = Vec2::new(0.0, config.wall_cast_height / 2.0);
        let [left, right] = [Dir2::NEG_X, Dir2::X].map(|direction| {
            cast_segment(
                &spatial_query,
                position,
                direction,
                config.wall_distance,
                wall_half,
                entity,
                layers,
            )
            .is_some()
        });
        sensors.update_wall_contacts(left, right, dt);
    }
}
