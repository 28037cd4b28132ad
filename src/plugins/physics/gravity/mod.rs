use avian3d::{
    math::{Scalar, Vector},
    prelude::*,
};
use bevy::{
    ecs::{component::ComponentId, world::DeferredWorld},
    prelude::*,
};
use bevy_inspector_egui::inspector_options::{InspectorOptions, ReflectInspectorOptions};

pub mod center_check;
pub mod compute;

use crate::constants::physics::EARTH_GRAVITATIONAL_ACCELERATION;
use center_check::ValidGravityCenterCheckPlugin;
use compute::apply_radial_gravities;

#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub struct GravitySet;

pub struct RadialGravityPlugin;

impl Plugin for RadialGravityPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<RadialGravityField>()
            .add_plugins(ValidGravityCenterCheckPlugin)
            .add_systems(FixedUpdate, apply_radial_gravities.in_set(GravitySet));
    }
}

/// Pulls its entity toward a single attractor with an inverse-square falloff.
///
/// Every fixed tick the body's [`LinearVelocity`] is accelerated by
/// `strength / r²` along the direction to `center`, where `r` is the distance
/// between the two. The acceleration is independent of the body's mass.
///
/// Adding this component sets the body's [`GravityScale`] to zero so the
/// global avian gravity is not applied on top of it.
///
/// # Usage
/// ```no_run
/// use bevy::prelude::*;
/// use planetoid::plugins::physics::RadialGravityField;
///
/// fn spawn_crate(mut commands: Commands, planet: Entity) {
///     commands.spawn((
///         Transform::from_xyz(0.0, 30.0, 0.0),
///         RadialGravityField::new(9.81).with_center(planet),
///     ));
/// }
/// ```
///
/// While `center` is unset, or points at an entity without a
/// [`GlobalTransform`], the body is not pulled at all.
#[derive(Component, Reflect, Debug, Copy, Clone, PartialEq, InspectorOptions)]
#[reflect(Component, InspectorOptions)]
#[require(Transform)]
#[component(on_add = on_add_radial_gravity_field)]
pub struct RadialGravityField {
    /// Acceleration at unit distance from the center.
    #[inspector(min = 0.0)]
    pub strength: Scalar,
    pub center: Option<Entity>,
}

impl Default for RadialGravityField {
    fn default() -> Self {
        Self::new(EARTH_GRAVITATIONAL_ACCELERATION)
    }
}

impl RadialGravityField {
    pub fn new(strength: Scalar) -> Self {
        Self {
            strength,
            center: None,
        }
    }

    pub fn with_center(mut self, center: Entity) -> Self {
        self.center = Some(center);
        self
    }

    pub fn acceleration(&self, center: Vector, position: Vector) -> Vector {
        radial_acceleration(center, position, self.strength)
    }
}

fn on_add_radial_gravity_field(mut world: DeferredWorld, entity: Entity, _id: ComponentId) {
    world.commands().entity(entity).insert(GravityScale(0.0));
}

/// Inverse-square acceleration pulling `position` toward `center`.
///
/// The magnitude is `strength / distance²`. A body sitting exactly on the
/// center has no defined direction and yields a non-finite vector.
pub fn radial_acceleration(center: Vector, position: Vector, strength: Scalar) -> Vector {
    let to_center = center - position;
    let distance = to_center.length();
    to_center.normalize() * (strength / (distance * distance))
}

/// The surface-local up direction at `position`: radially away from `center`.
pub fn surface_up(center: Vector, position: Vector) -> Vector {
    -(center - position).normalize()
}
