use avian3d::math::Scalar;

pub const MOVE_SPEED: Scalar = 6.0;
pub const ROTATION_SPEED: Scalar = 10.0;
pub const GRAVITY_MULTIPLIER: Scalar = 25.0;
pub const GROUND_CHECK_OFFSET: Scalar = 0.2;
pub const VERBOSE_LOGS: bool = true;

pub const CAPSULE_RADIUS: Scalar = 0.5;
pub const CAPSULE_LENGTH: Scalar = 1.0;
