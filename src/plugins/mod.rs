pub mod camera;
pub mod physics;
pub mod player;

pub use {
    camera::FollowCameraPlugin, physics::PhysicsPlugin, player::PlayerPlugin,
    player::surface_controller::SurfaceMotionPlugin,
};
