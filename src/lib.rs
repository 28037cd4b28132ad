pub mod constants;
pub mod keybinds;
pub mod plugins;

#[cfg(debug_assertions)]
pub mod debug;

use bevy::app::{App, Plugin};

use crate::plugins::{PhysicsPlugin, PlayerPlugin};

/// Radial gravity, the surface controller and the demo player in one plugin.
pub struct PlanetoidPlugin;

impl Plugin for PlanetoidPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((PhysicsPlugin, PlayerPlugin));

        #[cfg(debug_assertions)]
        {
            use debug::DebugPlugin;
            app.add_plugins(DebugPlugin);
        }
    }
}
