use super::*;

/// Accelerates every [`RadialGravityField`] body toward its center.
///
/// Bodies whose center is unset or cannot be resolved are skipped for the tick.
pub fn apply_radial_gravities(
    time: Res<Time>,
    center_query: Query<&GlobalTransform>,
    mut query: Query<(&RadialGravityField, &GlobalTransform, &mut LinearVelocity)>,
) {
    let delta_seconds = time.delta_secs();
    for (field, transform, mut linear_velocity) in query.iter_mut() {
        let Some(center) = field
            .center
            .and_then(|center| center_query.get(center).ok())
        else {
            continue;
        };
        linear_velocity.0 +=
            field.acceleration(center.translation(), transform.translation()) * delta_seconds;
    }
}
