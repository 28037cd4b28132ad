use avian3d::math::{Scalar, Vector, Vector2};
use bevy::prelude::*;

use crate::constants::physics::{FACING_EPSILON_SQUARED, MOVE_EPSILON_SQUARED};

/// World space forward and right of the camera movement is relative to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub forward: Vector,
    pub right: Vector,
}

impl CameraBasis {
    pub fn new(forward: Vector, right: Vector) -> Self {
        Self { forward, right }
    }

    pub fn from_transform(transform: &GlobalTransform) -> Self {
        Self {
            forward: *transform.forward(),
            right: *transform.right(),
        }
    }
}

/// Removes the component of `vector` along the unit `normal`.
pub fn project_on_plane(vector: Vector, normal: Vector) -> Vector {
    vector.reject_from_normalized(normal)
}

/// Normalizes `vector` unless its squared length is at or below `epsilon_squared`,
/// in which case it is treated as zero.
pub fn normalize_above(vector: Vector, epsilon_squared: Scalar) -> Vector {
    if vector.length_squared() > epsilon_squared {
        vector.normalize()
    } else {
        Vector::ZERO
    }
}

/// Unit direction on the tangent plane of `up` that `input` asks for, or zero.
///
/// `input.y` walks along the camera's forward, `input.x` strafes along its
/// right, both flattened onto the plane perpendicular to `up`. Any non-zero
/// result is full length, the input only picks the direction.
pub fn move_direction(input: Vector2, camera: &CameraBasis, up: Vector) -> Vector {
    let forward = normalize_above(project_on_plane(camera.forward, up), MOVE_EPSILON_SQUARED);
    let right = normalize_above(project_on_plane(camera.right, up), MOVE_EPSILON_SQUARED);
    normalize_above(forward * input.y + right * input.x, MOVE_EPSILON_SQUARED)
}

/// What a controller does with one tick of movement input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceStep {
    pub direction: Vector,
    pub displacement: Vector,
}

impl SurfaceStep {
    pub const IDLE: Self = Self {
        direction: Vector::ZERO,
        displacement: Vector::ZERO,
    };

    /// Whether the direction is long enough for the body to turn toward it.
    pub fn faces_direction(&self) -> bool {
        self.direction.length_squared() > FACING_EPSILON_SQUARED
    }
}

pub fn plan_step(
    input: Vector2,
    camera: &CameraBasis,
    up: Vector,
    move_speed: Scalar,
    delta_seconds: Scalar,
) -> SurfaceStep {
    let direction = move_direction(input, camera, up);
    SurfaceStep {
        direction,
        displacement: direction * move_speed * delta_seconds,
    }
}
