use super::*;
use bevy::utils::HashSet;

/// Entities whose [`RadialGravityField`] currently points at an unresolvable center.
#[derive(Resource, Default, Debug)]
pub struct DanglingGravityCenters(pub HashSet<Entity>);

/// Warns once for every [`RadialGravityField`] whose center reference cannot be resolved.
///
/// The entity is forgotten again as soon as its center resolves, so a second
/// breakage is reported too.
pub fn check_radial_gravity_has_valid_center(
    field_query: Query<(Entity, &RadialGravityField, Option<&Name>)>,
    center_query: Query<(), With<GlobalTransform>>,
    mut already_diagnosed: ResMut<DanglingGravityCenters>,
) {
    already_diagnosed
        .0
        .retain(|entity| field_query.contains(*entity));
    for (entity, field, name) in &field_query {
        let Some(center) = field.center else {
            already_diagnosed.0.remove(&entity);
            continue;
        };
        if center_query.contains(center) {
            already_diagnosed.0.remove(&entity);
        } else if already_diagnosed.0.insert(entity) {
            warn!(
                "{name} has a RadialGravityField whose center {center} has no GlobalTransform.\n\
                It will not be pulled until the center is valid again.",
                name = name.map_or_else(|| format!("Entity {}", entity), |s| format!("The {s} entity")),
            );
        }
    }
}

#[derive(Default)]
/// Print a warning for each `Entity` whose [`RadialGravityField`] points at a center
/// that does not exist or has no [`GlobalTransform`].
///
/// See [`check_radial_gravity_has_valid_center`] for details.
pub struct ValidGravityCenterCheckPlugin;

impl Plugin for ValidGravityCenterCheckPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DanglingGravityCenters>()
            .add_systems(Last, check_radial_gravity_has_valid_center);
    }
}
