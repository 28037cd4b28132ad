pub mod surface_controller;

use avian3d::prelude::{Collider, LockedAxes, RigidBody};
use bevy::ecs::component::ComponentId;
use bevy::ecs::world::DeferredWorld;
use bevy::prelude::{
    App, Assets, ButtonInput, Capsule3d, Color, Component, Entity, IntoSystemConfigs, KeyCode,
    Mesh, Mesh3d, MeshMaterial3d, Name, Plugin, Query, Res, StandardMaterial, Transform, Update,
    With, resource_exists,
};

use crate::keybinds::TOGGLE_CONTROLLER;
use crate::plugins::camera::FollowCameraPlugin;
use surface_controller::config::{CAPSULE_LENGTH, CAPSULE_RADIUS};
use surface_controller::{SurfaceControllerToggle, SurfaceMotionController, SurfaceMotionPlugin, SurfaceMotionSet};

#[derive(Component, Default)]
#[require(
    Transform,
    SurfaceMotionController,
    RigidBody(|| RigidBody::Dynamic),
    LockedAxes(|| LockedAxes::ROTATION_LOCKED),
    Collider(|| Collider::capsule(CAPSULE_RADIUS, CAPSULE_LENGTH)),
    Name(|| Name::new("Player"))
)]
#[component(on_add = on_add_player)]
pub struct Player;

fn on_add_player(mut world: DeferredWorld, entity: Entity, _id: ComponentId) {
    let Some(mesh_handle) = world
        .get_resource_mut::<Assets<Mesh>>()
        .map(|mut meshes| meshes.add(Capsule3d::new(CAPSULE_RADIUS, CAPSULE_LENGTH)))
    else {
        return;
    };
    let Some(material_handle) = world
        .get_resource_mut::<Assets<StandardMaterial>>()
        .map(|mut materials| materials.add(Color::srgb(0.8, 0.7, 0.6)))
    else {
        return;
    };

    world
        .commands()
        .entity(entity)
        .insert((Mesh3d(mesh_handle), MeshMaterial3d(material_handle)));
}

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((SurfaceMotionPlugin, FollowCameraPlugin))
            .add_systems(
                Update,
                toggle_player_controller
                    .before(SurfaceMotionSet::Input)
                    .run_if(resource_exists::<ButtonInput<KeyCode>>),
            );
    }
}

fn toggle_player_controller(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut query: Query<&mut SurfaceControllerToggle, With<Player>>,
) {
    if !keyboard.just_pressed(TOGGLE_CONTROLLER) {
        return;
    }
    for mut toggle in query.iter_mut() {
        *toggle = toggle.toggled();
    }
}
