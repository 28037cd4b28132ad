use avian3d::prelude::PhysicsDebugPlugin;
use bevy::{
    diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin},
    pbr::wireframe::{WireframeConfig, WireframePlugin},
    prelude::*,
};
use bevy_inspector_egui::quick::WorldInspectorPlugin;

use crate::keybinds::{TOGGLE_CONTROLLER_GIZMOS, TOGGLE_WIREFRAME};
use crate::plugins::physics::surface_up;
use crate::plugins::player::surface_controller::SurfaceMotionController;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(WireframeConfig {
            global: false,
            default_color: Color::WHITE.darker(0.4),
        })
        .init_resource::<ControllerGizmos>()
        .add_plugins((
            FrameTimeDiagnosticsPlugin,
            LogDiagnosticsPlugin::default(),
            WireframePlugin,
            WorldInspectorPlugin::default(),
            PhysicsDebugPlugin::default(),
        ))
        .add_systems(
            Update,
            (
                toggle_wireframe,
                toggle_controller_gizmos,
            )
                .run_if(resource_changed::<ButtonInput<KeyCode>>),
        )
        .add_systems(
            PostUpdate,
            draw_controller_gizmos.run_if(|gizmos: Res<ControllerGizmos>| gizmos.0),
        );
    }
}

#[derive(Resource)]
struct ControllerGizmos(bool);

impl Default for ControllerGizmos {
    fn default() -> Self {
        Self(true)
    }
}

fn toggle_wireframe(
    mut wireframe_config: ResMut<WireframeConfig>,
    keyboard: Res<ButtonInput<KeyCode>>,
) {
    if keyboard.just_pressed(TOGGLE_WIREFRAME) {
        wireframe_config.global = !wireframe_config.global;
    }
}

fn toggle_controller_gizmos(
    mut controller_gizmos: ResMut<ControllerGizmos>,
    keyboard: Res<ButtonInput<KeyCode>>,
) {
    if keyboard.just_pressed(TOGGLE_CONTROLLER_GIZMOS) {
        controller_gizmos.0 = !controller_gizmos.0;
    }
}

/// Radial up in green, current body up in blue, facing in red.
fn draw_controller_gizmos(
    mut gizmos: Gizmos,
    center_query: Query<&GlobalTransform>,
    controller_query: Query<(&SurfaceMotionController, &Transform)>,
) {
    for (controller, transform) in &controller_query {
        let Some(center) = controller
            .planet_center
            .and_then(|center| center_query.get(center).ok())
        else {
            continue;
        };
        let origin = transform.translation;
        let radial_up = surface_up(center.translation(), origin);
        gizmos.arrow(origin, origin + radial_up * 2.0, Color::srgb(0.2, 0.9, 0.2));
        gizmos.arrow(origin, origin + transform.up() * 1.5, Color::srgb(0.2, 0.4, 1.0));
        gizmos.arrow(origin, origin + transform.forward() * 1.5, Color::srgb(1.0, 0.2, 0.2));
    }
}
