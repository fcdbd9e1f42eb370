//! Physics backend abstraction.
//!
//! The jump machine only needs to read and overwrite a character's linear
//! velocity. This trait exposes exactly that for a physics engine, so the
//! plugin can be wired to Avian, Rapier or a custom integrator.

use bevy::ecs::component::Mutable;
use bevy::prelude::*;

/// Trait for physics backend implementations.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use msg_charge_jump::prelude::*;
///
/// #[derive(Component, Default)]
/// struct Velocity(Vec2);
///
/// struct MyBackend;
///
/// impl JumpPhysicsBackend for MyBackend {
///     type VelocityComponent = Velocity;
///
///     fn plugin() -> impl Plugin {
///         NoOpBackendPlugin
///     }
///
///     fn read_velocity(velocity: &Velocity) -> Vec2 {
///         velocity.0
///     }
///
///     fn write_velocity(velocity: &mut Velocity, value: Vec2) {
///         velocity.0 = value;
///     }
/// }
/// ```
pub trait JumpPhysicsBackend: 'static + Send + Sync {
    /// The velocity component type used by this backend.
    type VelocityComponent: Component<Mutability = Mutable>;

    /// Returns the plugin that sets up this backend.
    fn plugin() -> impl Plugin;

    /// Linear velocity stored in the backend's component.
    fn read_velocity(velocity: &Self::VelocityComponent) -> Vec2;

    /// Overwrite the linear velocity stored in the backend's component.
    fn write_velocity(velocity: &mut Self::VelocityComponent, value: Vec2);

    /// Get the current velocity of an entity.
    fn get_velocity(world: &World, entity: Entity) -> Vec2 {
        world
            .get::<Self::VelocityComponent>(entity)
            .map(Self::read_velocity)
            .unwrap_or(Vec2::ZERO)
    }

    /// Set the velocity of an entity.
    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec2) {
        if let Some(mut component) = world.get_mut::<Self::VelocityComponent>(entity) {
            Self::write_velocity(&mut component, velocity);
        }
    }
}

/// Backend plugin for velocity components that need no extra systems, such
/// as custom integrators and test doubles.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpBackendPlugin;

impl Plugin for NoOpBackendPlugin {
    fn build(&self, _app: &mut App) {}
}
