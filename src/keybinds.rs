use bevy::prelude::KeyCode;

pub const MOVE_FORWARD: [KeyCode; 2] = [KeyCode::KeyW, KeyCode::ArrowUp];
pub const MOVE_BACK: [KeyCode; 2] = [KeyCode::KeyS, KeyCode::ArrowDown];
pub const MOVE_LEFT: [KeyCode; 2] = [KeyCode::KeyA, KeyCode::ArrowLeft];
pub const MOVE_RIGHT: [KeyCode; 2] = [KeyCode::KeyD, KeyCode::ArrowRight];

pub const CAMERA_YAW_LEFT: KeyCode = KeyCode::KeyQ;
pub const CAMERA_YAW_RIGHT: KeyCode = KeyCode::KeyE;

pub const TOGGLE_CONTROLLER: KeyCode = KeyCode::Tab;

#[cfg(debug_assertions)]
pub const TOGGLE_WIREFRAME: KeyCode = KeyCode::F1;
#[cfg(debug_assertions)]
pub const TOGGLE_CONTROLLER_GIZMOS: KeyCode = KeyCode::F2;
