#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use avian3d::prelude::{Collider, RigidBody};
use bevy::{
    app::{App, AppExit, PluginGroup, Startup},
    color::Color,
    math::Vec3,
    pbr::{AmbientLight, DirectionalLight, MeshMaterial3d, StandardMaterial},
    prelude::{
        Assets, ClearColor, Commands, Cuboid, Mesh, Mesh3d, Meshable, Name, ResMut, Sphere,
        Transform,
    },
    window::{Window, WindowPlugin},
    DefaultPlugins,
};

use planetoid::constants::physics::EARTH_GRAVITATIONAL_ACCELERATION;
use planetoid::plugins::camera::FollowCamera;
use planetoid::plugins::physics::RadialGravityField;
use planetoid::plugins::player::surface_controller::SurfaceMotionController;
use planetoid::plugins::player::Player;
use planetoid::PlanetoidPlugin;

const PLANET_RADIUS: f32 = 20.0;
const CRATE_SIZE: f32 = 1.0;
/// Pull felt on the planet's surface.
const SURFACE_GRAVITY: f32 = EARTH_GRAVITATIONAL_ACCELERATION;

fn main() -> AppExit {
    App::new()
        .add_plugins(DefaultPlugins::set(
            DefaultPlugins,
            WindowPlugin {
                primary_window: Some(Window {
                    title: "Planetoid".into(),
                    ..Default::default()
                }),
                ..Default::default()
            },
        ))
        .insert_resource(ClearColor(Color::linear_rgb(0.02, 0.02, 0.05)))
        .insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: 300.0,
        })
        .add_plugins(PlanetoidPlugin)
        .add_systems(Startup, setup)
        .run()
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let planet = commands
        .spawn((
            Name::new("Planet"),
            RigidBody::Static,
            Collider::sphere(PLANET_RADIUS),
            Mesh3d(meshes.add(Sphere::new(PLANET_RADIUS).mesh().uv(64, 32))),
            MeshMaterial3d(materials.add(StandardMaterial::from_color(Color::srgb(0.3, 0.5, 0.3)))),
            Transform::default(),
        ))
        .id();

    let player = commands
        .spawn((
            Player,
            SurfaceMotionController {
                gravity_multiplier: SURFACE_GRAVITY * PLANET_RADIUS * PLANET_RADIUS,
                ..SurfaceMotionController::new(planet)
            },
            Transform::from_translation(Vec3::Y * (PLANET_RADIUS + 2.0)),
        ))
        .id();

    let crate_mesh = meshes.add(Cuboid::from_length(CRATE_SIZE));
    let crate_material = materials.add(Color::srgb(0.7, 0.4, 0.2));
    for direction in [Vec3::X, Vec3::NEG_X, Vec3::Z, Vec3::new(1.0, 1.0, 1.0).normalize()] {
        commands.spawn((
            Name::new("Crate"),
            RigidBody::Dynamic,
            Collider::cuboid(CRATE_SIZE, CRATE_SIZE, CRATE_SIZE),
            RadialGravityField::new(SURFACE_GRAVITY * PLANET_RADIUS * PLANET_RADIUS).with_center(planet),
            Mesh3d(crate_mesh.clone()),
            MeshMaterial3d(crate_material.clone()),
            Transform::from_translation(direction * (PLANET_RADIUS + 6.0)),
        ));
    }

    commands.spawn((
        Name::new("Camera"),
        FollowCamera::new(player),
        Transform::from_translation(Vec3::new(0.0, PLANET_RADIUS + 6.0, 10.0))
            .looking_at(Vec3::Y * PLANET_RADIUS, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..Default::default()
        },
        Transform::from_xyz(50.0, 80.0, 30.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
