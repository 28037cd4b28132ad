use avian3d::PhysicsPlugins;
use bevy::app::{App, Plugin};
use bevy::prelude::{Fixed, Time};

pub mod gravity;
pub mod sweep;

pub use gravity::{radial_acceleration, surface_up, GravitySet, RadialGravityField, RadialGravityPlugin};

use crate::constants::physics::FIXED_UPDATE_HZ;

/// Physics backend plus radial gravity.
///
/// Gravity and controller logic run in `FixedUpdate`, avian steps in
/// `FixedPostUpdate`, both at [`FIXED_UPDATE_HZ`].
#[derive(Default)]
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PhysicsPlugins::default())
            .insert_resource(Time::<Fixed>::from_hz(FIXED_UPDATE_HZ))
            .add_plugins(RadialGravityPlugin);
    }
}
