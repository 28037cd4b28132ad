use avian3d::math::{Quaternion, Scalar, Vector};
use bevy::prelude::*;

/// Rotates `rotation` part of the way toward having its local +Y on `up`.
///
/// The target is the shortest arc taking the current up onto `up`, applied on
/// top of `rotation`, so the heading around the up axis is kept. `t` is the
/// slerp factor and is clamped to `[0, 1]`.
pub fn align_up(rotation: Quaternion, up: Vector, t: Scalar) -> Quaternion {
    let current_up = rotation * Vector::Y;
    let target = Quaternion::from_rotation_arc(current_up, up) * rotation;
    rotation.slerp(target, t.clamp(0.0, 1.0))
}

/// Rotation whose forward (-Z) faces `forward` with its +Y as close to `up` as possible.
///
/// Returns `None` for a zero `forward`.
pub fn look_rotation(forward: Vector, up: Vector) -> Option<Quaternion> {
    let forward = Dir3::new(forward).ok()?;
    let up = Dir3::new(up).unwrap_or(Dir3::Y);
    Some(Transform::IDENTITY.looking_to(forward, up).rotation)
}

/// Slerps `rotation` toward facing `forward` around `up`.
pub fn turn_toward(rotation: Quaternion, forward: Vector, up: Vector, t: Scalar) -> Quaternion {
    match look_rotation(forward, up) {
        Some(target) => rotation.slerp(target, t.clamp(0.0, 1.0)),
        None => rotation,
    }
}
