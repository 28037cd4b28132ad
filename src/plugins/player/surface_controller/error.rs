use bevy::prelude::Entity;

/// Reasons a controller skips (part of) a tick.
///
/// None of these are fatal. The step is skipped, the error is logged and
/// recorded in [`SurfaceMotionDiagnostics`](super::SurfaceMotionDiagnostics),
/// and the next tick tries again.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceMotionError {
    #[error("planet center is not assigned")]
    MissingCenter,
    #[error("planet center {0} has no GlobalTransform")]
    UnresolvedCenter(Entity),
    #[error("no single camera is tagged as MainCamera")]
    MissingCamera,
    #[error("move action is not enabled, reading no input")]
    InputUnavailable,
}
