use avian3d::math::{Scalar, Vector2};
use bevy::input::ButtonInput;
use bevy::prelude::{Component, Gamepad, GamepadAxis, KeyCode, Query, Reflect, Res, ReflectComponent};

use crate::keybinds::{MOVE_BACK, MOVE_FORWARD, MOVE_LEFT, MOVE_RIGHT};

/// Stick deflection below which the gamepad is ignored.
pub const GAMEPAD_DEADZONE: Scalar = 0.1;

/// Per-entity binding of the 2D "move" axis.
///
/// Device samplers write into the binding every frame while it is enabled.
/// Controllers [`read`](Self::read) it once per tick. A released binding
/// reads as `None` and ignores writes, so a stopped controller neither
/// consumes device input nor carries a stale value.
#[derive(Component, Reflect, Debug, Default, Clone, PartialEq)]
#[reflect(Component)]
pub struct MoveAction {
    enabled: bool,
    value: Vector2,
}

impl MoveAction {
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Releases the binding and forgets the last value.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.value = Vector2::ZERO;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Stores the current axis value, clamped to unit length.
    pub fn write(&mut self, value: Vector2) {
        if self.enabled {
            self.value = value.clamp_length_max(1.0);
        }
    }

    pub fn read(&self) -> Option<Vector2> {
        self.enabled.then_some(self.value)
    }
}

/// Writes WASD / arrow keys into every enabled [`MoveAction`].
pub fn sample_keyboard_move(keyboard: Res<ButtonInput<KeyCode>>, mut query: Query<&mut MoveAction>) {
    let up = keyboard.any_pressed(MOVE_FORWARD);
    let down = keyboard.any_pressed(MOVE_BACK);
    let left = keyboard.any_pressed(MOVE_LEFT);
    let right = keyboard.any_pressed(MOVE_RIGHT);

    let horizontal = right as i8 - left as i8;
    let vertical = up as i8 - down as i8;
    let direction = Vector2::new(horizontal as Scalar, vertical as Scalar);

    for mut action in query.iter_mut() {
        action.write(direction);
    }
}

/// Overrides the keyboard with the left stick of the first gamepad that is deflected.
pub fn sample_gamepad_move(gamepads: Query<&Gamepad>, mut query: Query<&mut MoveAction>) {
    let Some(stick) = gamepads.iter().find_map(|gamepad| {
        let stick = Vector2::new(
            gamepad.get(GamepadAxis::LeftStickX)?,
            gamepad.get(GamepadAxis::LeftStickY)?,
        );
        (stick.length() > GAMEPAD_DEADZONE).then_some(stick)
    }) else {
        return;
    };

    for mut action in query.iter_mut() {
        action.write(stick);
    }
}
