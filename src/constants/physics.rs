use avian3d::math::Scalar;

pub const EARTH_GRAVITATIONAL_ACCELERATION: Scalar = 9.81;

/// Rate of the fixed simulation tick that gravity and movement run in.
pub const FIXED_UPDATE_HZ: f64 = 60.0;

/// Squared length below which a direction is treated as zero instead of normalized.
pub const MOVE_EPSILON_SQUARED: Scalar = 1e-6;

/// Squared length a move direction needs before the body turns to face it.
pub const FACING_EPSILON_SQUARED: Scalar = 0.01;

/// How fast a body's up axis catches up with the radial direction, per second.
pub const UP_ALIGNMENT_RATE: Scalar = 10.0;
