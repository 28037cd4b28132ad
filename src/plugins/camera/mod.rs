use avian3d::math::{Scalar, Vector};
use bevy::prelude::*;
use bevy::transform::TransformSystem;

use crate::keybinds::{CAMERA_YAW_LEFT, CAMERA_YAW_RIGHT};
use crate::plugins::player::surface_controller::movement::{normalize_above, project_on_plane};
use crate::constants::physics::MOVE_EPSILON_SQUARED;

/// The camera movement input is relative to.
///
/// Exactly one entity should carry this marker. With none, or more than one,
/// surface controllers treat the camera as missing.
#[derive(Component, Default, Debug)]
pub struct MainCamera;

/// Trails `target` from behind and above, in the target's own up frame.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
#[require(MainCamera, Camera3d)]
pub struct FollowCamera {
    pub target: Entity,
    pub distance: Scalar,
    pub height: Scalar,
    /// Radians per second turned while a yaw key is held.
    pub yaw_speed: Scalar,
    /// Fraction of the remaining offset closed per second.
    pub smoothing: Scalar,
}

impl FollowCamera {
    pub fn new(target: Entity) -> Self {
        Self {
            target,
            distance: 10.0,
            height: 4.0,
            yaw_speed: 2.0,
            smoothing: 8.0,
        }
    }
}

pub struct FollowCameraPlugin;

impl Plugin for FollowCameraPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<FollowCamera>().add_systems(
            PostUpdate,
            follow_target.before(TransformSystem::TransformPropagate),
        );
    }
}

/// The forward a follow camera should look along, flattened onto the plane of `up`.
///
/// Keeps the camera's current heading where possible and falls back to the
/// target's forward when the camera looks straight along `up`.
pub fn follow_heading(camera_forward: Vector, target_forward: Vector, up: Vector) -> Vector {
    let heading = normalize_above(project_on_plane(camera_forward, up), MOVE_EPSILON_SQUARED);
    if heading != Vector::ZERO {
        return heading;
    }
    normalize_above(project_on_plane(target_forward, up), MOVE_EPSILON_SQUARED)
}

pub fn follow_target(
    time: Res<Time>,
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    target_query: Query<&Transform, Without<FollowCamera>>,
    mut camera_query: Query<(&FollowCamera, &mut Transform)>,
) {
    let delta_seconds = time.delta_secs();
    let yaw_input = keyboard.map_or(0.0, |keyboard| {
        keyboard.pressed(CAMERA_YAW_LEFT) as i8 as Scalar
            - keyboard.pressed(CAMERA_YAW_RIGHT) as i8 as Scalar
    });

    for (follow, mut camera) in camera_query.iter_mut() {
        let Ok(target) = target_query.get(follow.target) else {
            continue;
        };
        let up = target.up();
        let yaw = Quat::from_axis_angle(*up, yaw_input * follow.yaw_speed * delta_seconds);
        let heading = follow_heading(yaw * *camera.forward(), *target.forward(), *up);
        if heading == Vector::ZERO {
            continue;
        }

        let desired = target.translation - heading * follow.distance + up * follow.height;
        let blend = (follow.smoothing * delta_seconds).clamp(0.0, 1.0);
        camera.translation = camera.translation.lerp(desired, blend);
        camera.look_at(target.translation, up);
    }
}
