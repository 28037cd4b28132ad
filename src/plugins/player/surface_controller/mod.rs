pub mod config;
pub mod error;
pub mod input;
pub mod movement;
pub mod orientation;

use avian3d::{
    math::{Scalar, Vector, Vector2},
    prelude::*,
};
use bevy::{
    ecs::{component::ComponentId, world::DeferredWorld},
    prelude::*,
};
use bevy_inspector_egui::inspector_options::{InspectorOptions, ReflectInspectorOptions};

use crate::constants::physics::UP_ALIGNMENT_RATE;
use crate::plugins::camera::MainCamera;
use crate::plugins::physics::gravity::{radial_acceleration, surface_up, GravitySet};
use crate::plugins::physics::sweep::{
    move_and_collide, ColliderSweep, MoveOutcome, ShapeSweep, Unobstructed,
};
use config::{GRAVITY_MULTIPLIER, GROUND_CHECK_OFFSET, MOVE_SPEED, ROTATION_SPEED, VERBOSE_LOGS};
use error::SurfaceMotionError;
use input::{sample_gamepad_move, sample_keyboard_move, MoveAction};
use movement::{plan_step, CameraBasis, SurfaceStep};
use orientation::{align_up, turn_toward};

/// Stages of the surface controller.
///
/// `Input` runs in `Update`, the others in `FixedUpdate` after [`GravitySet`].
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub enum SurfaceMotionSet {
    /// Lifecycle changes are applied and devices are sampled into [`MoveAction`]s.
    Input,
    /// Radial pull and up-axis alignment.
    Gravity,
    /// Camera relative movement over the surface.
    Movement,
}

pub struct SurfaceMotionPlugin;

impl Plugin for SurfaceMotionPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<SurfaceMotionController>()
            .register_type::<SurfaceControllerToggle>()
            .register_type::<SurfaceVelocity>()
            .register_type::<MoveAction>()
            .add_systems(
                Update,
                (
                    sync_controller_lifecycle,
                    sample_keyboard_move.run_if(resource_exists::<ButtonInput<KeyCode>>),
                    sample_gamepad_move,
                )
                    .chain()
                    .in_set(SurfaceMotionSet::Input),
            )
            .configure_sets(
                FixedUpdate,
                (SurfaceMotionSet::Gravity, SurfaceMotionSet::Movement)
                    .chain()
                    .after(GravitySet),
            )
            .add_systems(
                FixedUpdate,
                (
                    // Fixed ticks can run before `Update` in a controller's first frame.
                    sync_controller_lifecycle.before(SurfaceMotionSet::Gravity),
                    apply_surface_gravity.in_set(SurfaceMotionSet::Gravity),
                    drive_surface_motion.in_set(SurfaceMotionSet::Movement),
                ),
            );
    }
}

/// Walks a body over the surface of a planet.
///
/// Every fixed tick the controller
///
/// * pulls the body toward `planet_center` with `gravity_multiplier / r²`,
/// * tilts the body so its local +Y tracks the radial direction,
/// * moves it along the tangent plane according to its [`MoveAction`] and the
///   [`MainCamera`], and turns it to face where it is going.
///
/// The radial up is recomputed from the positions every tick and never
/// integrated. Without a center or a camera the affected step is skipped for
/// that tick and a diagnostic is recorded in [`SurfaceMotionDiagnostics`].
///
/// Adding this component sets the body's [`GravityScale`] to zero. Removing it
/// releases the move binding.
#[derive(Component, Reflect, Debug, Clone, PartialEq, InspectorOptions)]
#[reflect(Component, InspectorOptions)]
#[require(
    Transform,
    LinearVelocity,
    MoveAction,
    SurfaceVelocity,
    SurfaceControllerToggle,
    SurfaceMotionDiagnostics
)]
#[component(on_add = on_add_surface_controller, on_remove = on_remove_surface_controller)]
pub struct SurfaceMotionController {
    pub planet_center: Option<Entity>,
    #[inspector(min = 0.0)]
    pub move_speed: Scalar,
    /// How fast the body turns to face its move direction, per second.
    #[inspector(min = 0.0)]
    pub rotation_speed: Scalar,
    /// Acceleration toward the center at unit distance.
    #[inspector(min = 0.0)]
    pub gravity_multiplier: Scalar,
    /// Reserved for a ground probe, nothing reads it yet.
    #[inspector(min = 0.0)]
    pub ground_check_offset: Scalar,
    pub verbose_logs: bool,
}

impl Default for SurfaceMotionController {
    fn default() -> Self {
        Self {
            planet_center: None,
            move_speed: MOVE_SPEED,
            rotation_speed: ROTATION_SPEED,
            gravity_multiplier: GRAVITY_MULTIPLIER,
            ground_check_offset: GROUND_CHECK_OFFSET,
            verbose_logs: VERBOSE_LOGS,
        }
    }
}

fn on_add_surface_controller(mut world: DeferredWorld, entity: Entity, _id: ComponentId) {
    world.commands().entity(entity).insert(GravityScale(0.0));
}

fn on_remove_surface_controller(mut world: DeferredWorld, entity: Entity, _id: ComponentId) {
    // The binding may already be gone when the whole entity is despawned.
    if let Some(mut action) = world.get_mut::<MoveAction>(entity) {
        action.disable();
    }
}

impl SurfaceMotionController {
    pub fn new(planet_center: Entity) -> Self {
        Self {
            planet_center: Some(planet_center),
            ..default()
        }
    }

    /// Acquires the move binding.
    pub fn start(&self, entity: Entity, action: &mut MoveAction) {
        action.enable();
        if self.verbose_logs {
            info!("[Input] move action enabled for {entity}");
        }
    }

    /// Releases the move binding.
    pub fn stop(&self, entity: Entity, action: &mut MoveAction) {
        action.disable();
        if self.verbose_logs {
            info!("[Input] move action released for {entity}");
        }
    }

    /// Pulls the body toward `center` and tilts its up axis toward the radial direction.
    pub fn apply_gravity(
        &self,
        center: Vector,
        transform: &mut Transform,
        linear_velocity: &mut LinearVelocity,
        delta_seconds: Scalar,
    ) {
        let position = transform.translation;
        linear_velocity.0 +=
            radial_acceleration(center, position, self.gravity_multiplier) * delta_seconds;

        let up = surface_up(center, position);
        transform.rotation = align_up(transform.rotation, up, delta_seconds * UP_ALIGNMENT_RATE);
    }

    /// Moves the body along the tangent plane and turns it toward the move direction.
    ///
    /// The planned displacement and then the [`SurfaceVelocity`] displacement
    /// are both resolved against `sweeper`. The returned outcome holds the
    /// combined translation and every contact of both moves.
    #[allow(clippy::too_many_arguments)]
    pub fn apply_movement(
        &self,
        center: Vector,
        input: Vector2,
        camera: &CameraBasis,
        velocity: &SurfaceVelocity,
        transform: &mut Transform,
        sweeper: &impl ShapeSweep,
        delta_seconds: Scalar,
    ) -> SurfaceMove {
        let up = surface_up(center, transform.translation);
        let step = plan_step(input, camera, up, self.move_speed, delta_seconds);

        let mut outcome = move_and_collide(
            sweeper,
            transform.translation,
            transform.rotation,
            step.displacement,
        );
        transform.translation += outcome.translation;

        if step.faces_direction() {
            transform.rotation = turn_toward(
                transform.rotation,
                step.direction,
                up,
                self.rotation_speed * delta_seconds,
            );
        }

        let secondary = move_and_collide(
            sweeper,
            transform.translation,
            transform.rotation,
            velocity.0 * delta_seconds,
        );
        transform.translation += secondary.translation;
        outcome.translation += secondary.translation;
        outcome.contacts.extend(secondary.contacts);

        SurfaceMove { step, outcome }
    }
}

/// One tick of [`SurfaceMotionController::apply_movement`].
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMove {
    pub step: SurfaceStep,
    pub outcome: MoveOutcome,
}

/// Switches a [`SurfaceMotionController`] on or off.
///
/// A disabled controller releases its [`MoveAction`] and stops driving the
/// body until it is enabled again.
#[derive(Component, Reflect, Default, Debug, PartialEq, Eq, Clone, Copy)]
#[reflect(Component)]
pub enum SurfaceControllerToggle {
    #[default]
    Enabled,
    Disabled,
}

impl SurfaceControllerToggle {
    pub fn is_enabled(&self) -> bool {
        matches!(self, SurfaceControllerToggle::Enabled)
    }

    pub fn toggled(&self) -> Self {
        match self {
            SurfaceControllerToggle::Enabled => SurfaceControllerToggle::Disabled,
            SurfaceControllerToggle::Disabled => SurfaceControllerToggle::Enabled,
        }
    }
}

/// Extra velocity moved through after the planned step.
///
/// Nothing in this crate writes it. It is the place to integrate vertical
/// motion such as a jump.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct SurfaceVelocity(pub Vector);

/// Every diagnostic a controller has emitted.
#[derive(Component, Default, Debug, Clone, PartialEq)]
pub struct SurfaceMotionDiagnostics {
    pub last_error: Option<SurfaceMotionError>,
    /// Number of reports, not of skipped ticks. A missing center is reported
    /// by both the gravity and the movement step, so it adds two per tick.
    pub reports: u64,
}

impl SurfaceMotionDiagnostics {
    fn report(&mut self, entity: Entity, verbose: bool, error: SurfaceMotionError) {
        if verbose {
            error!("[PlanetController] {entity}: {error}");
        }
        self.last_error = Some(error);
        self.reports += 1;
    }
}

fn resolve_center(
    planet_center: Option<Entity>,
    center_query: &Query<&GlobalTransform>,
) -> Result<Vector, SurfaceMotionError> {
    let center = planet_center.ok_or(SurfaceMotionError::MissingCenter)?;
    center_query
        .get(center)
        .map(GlobalTransform::translation)
        .map_err(|_| SurfaceMotionError::UnresolvedCenter(center))
}

pub fn sync_controller_lifecycle(
    mut query: Query<
        (
            Entity,
            &SurfaceMotionController,
            &SurfaceControllerToggle,
            &mut MoveAction,
        ),
        Or<(Changed<SurfaceControllerToggle>, Added<SurfaceMotionController>)>,
    >,
) {
    for (entity, controller, toggle, mut action) in query.iter_mut() {
        match (toggle.is_enabled(), action.is_enabled()) {
            (true, false) => controller.start(entity, &mut action),
            (false, true) => controller.stop(entity, &mut action),
            _ => {}
        }
    }
}

#[allow(clippy::type_complexity)]
pub fn apply_surface_gravity(
    time: Res<Time>,
    center_query: Query<&GlobalTransform>,
    mut query: Query<(
        Entity,
        &SurfaceMotionController,
        &SurfaceControllerToggle,
        &mut Transform,
        &mut LinearVelocity,
        &mut SurfaceMotionDiagnostics,
    )>,
) {
    let delta_seconds = time.delta_secs();
    for (entity, controller, toggle, mut transform, mut linear_velocity, mut diagnostics) in
        query.iter_mut()
    {
        if !toggle.is_enabled() {
            continue;
        }
        match resolve_center(controller.planet_center, &center_query) {
            Ok(center) => controller.apply_gravity(
                center,
                &mut transform,
                &mut linear_velocity,
                delta_seconds,
            ),
            Err(error) => diagnostics.report(entity, controller.verbose_logs, error),
        }
    }
}

#[allow(clippy::type_complexity)]
pub fn drive_surface_motion(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    camera_query: Query<&GlobalTransform, With<MainCamera>>,
    center_query: Query<&GlobalTransform>,
    mut query: Query<(
        Entity,
        &SurfaceMotionController,
        &SurfaceControllerToggle,
        &MoveAction,
        &SurfaceVelocity,
        &mut Transform,
        Option<&Collider>,
        &mut SurfaceMotionDiagnostics,
    )>,
) {
    let delta_seconds = time.delta_secs();
    let camera = camera_query.get_single().ok().map(CameraBasis::from_transform);

    for (
        entity,
        controller,
        toggle,
        action,
        velocity,
        mut transform,
        collider,
        mut diagnostics,
    ) in query.iter_mut()
    {
        if !toggle.is_enabled() {
            continue;
        }
        let center = match resolve_center(controller.planet_center, &center_query) {
            Ok(center) => center,
            Err(error) => {
                diagnostics.report(entity, controller.verbose_logs, error);
                continue;
            }
        };
        let Some(camera) = camera else {
            diagnostics.report(entity, controller.verbose_logs, SurfaceMotionError::MissingCamera);
            continue;
        };
        let input = action.read().unwrap_or_else(|| {
            diagnostics.report(entity, controller.verbose_logs, SurfaceMotionError::InputUnavailable);
            Vector2::ZERO
        });
        if controller.verbose_logs && input.length_squared() > 0.0001 {
            debug!("[Input] {entity} move value: {input}");
        }

        let movement = match collider {
            Some(collider) => controller.apply_movement(
                center,
                input,
                &camera,
                velocity,
                &mut transform,
                &ColliderSweep::new(&spatial_query, collider, entity),
                delta_seconds,
            ),
            None => controller.apply_movement(
                center,
                input,
                &camera,
                velocity,
                &mut transform,
                &Unobstructed,
                delta_seconds,
            ),
        };
        if controller.verbose_logs && movement.outcome.collided() {
            debug!(
                "[Movement] {entity} touched {} obstacle(s)",
                movement.outcome.contacts.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::physics::sweep::SweepHit;
    use approx::assert_relative_eq;
    use avian3d::math::Quaternion;
    use bevy::ecs::{schedule::ExecutorKind, system::RunSystemOnce};
    use std::time::Duration;

    const TICK: Scalar = 0.1;

    fn world_with_tick() -> World {
        let mut world = World::new();
        let mut time = Time::<()>::default();
        time.advance_by(Duration::from_secs_f32(TICK));
        world.insert_resource(time);
        world
    }

    fn spawn_body(world: &mut World, controller: SurfaceMotionController, transform: Transform) -> Entity {
        let entity = world.spawn((controller, transform)).id();
        world.flush();
        entity
    }

    fn quiet(center: Option<Entity>) -> SurfaceMotionController {
        SurfaceMotionController {
            planet_center: center,
            verbose_logs: false,
            ..default()
        }
    }

    fn north_camera() -> CameraBasis {
        CameraBasis::new(Vector::NEG_Z, Vector::X)
    }

    #[test]
    fn adding_controller_disables_global_gravity() {
        let mut world = World::new();
        let body = spawn_body(&mut world, quiet(None), Transform::default());

        assert_eq!(world.get::<GravityScale>(body).map(|scale| scale.0), Some(0.0));
        assert!(world.get::<MoveAction>(body).is_some());
        assert_eq!(
            world.get::<SurfaceControllerToggle>(body),
            Some(&SurfaceControllerToggle::Enabled)
        );
    }

    #[test]
    fn gravity_pulls_with_inverse_square_and_aligns_up() {
        let mut world = world_with_tick();
        let center = world.spawn(GlobalTransform::IDENTITY).id();
        let tilted = Quaternion::from_rotation_z(0.4);
        let body = spawn_body(
            &mut world,
            quiet(Some(center)),
            Transform::from_xyz(0.0, 10.0, 0.0).with_rotation(tilted),
        );

        world
            .run_system_once(apply_surface_gravity)
            .expect("gravity system should run");

        let velocity = world.get::<LinearVelocity>(body).unwrap().0;
        assert_relative_eq!(velocity, Vector::NEG_Y * (25.0 / 100.0) * TICK, epsilon = 1e-6);

        // dt * 10 = 1, so the up axis lands on the radial direction in one tick.
        let rotation = world.get::<Transform>(body).unwrap().rotation;
        assert_relative_eq!(rotation * Vector::Y, Vector::Y, epsilon = 1e-5);
    }

    #[test]
    fn aligned_body_keeps_its_rotation() {
        let mut world = world_with_tick();
        let center = world.spawn(GlobalTransform::IDENTITY).id();
        let heading = Quaternion::from_rotation_y(2.0);
        let body = spawn_body(
            &mut world,
            quiet(Some(center)),
            Transform::from_xyz(0.0, 10.0, 0.0).with_rotation(heading),
        );

        world
            .run_system_once(apply_surface_gravity)
            .expect("gravity system should run");

        assert_relative_eq!(world.get::<Transform>(body).unwrap().rotation, heading, epsilon = 1e-6);
    }

    #[test]
    fn cleared_center_stops_gravity_and_reports_every_tick() {
        let mut world = world_with_tick();
        let center = world.spawn(GlobalTransform::IDENTITY).id();
        let start = Transform::from_xyz(3.0, 4.0, 0.0);
        let body = spawn_body(&mut world, quiet(Some(center)), start);

        world
            .run_system_once(apply_surface_gravity)
            .expect("gravity system should run");
        assert_eq!(world.get::<SurfaceMotionDiagnostics>(body).unwrap().reports, 0);

        world.get_mut::<SurfaceMotionController>(body).unwrap().planet_center = None;
        world.get_mut::<LinearVelocity>(body).unwrap().0 = Vector::ZERO;
        let before = *world.get::<Transform>(body).unwrap();

        for tick in 1..=3 {
            world
                .run_system_once(apply_surface_gravity)
                .expect("gravity system should run");

            let diagnostics = world.get::<SurfaceMotionDiagnostics>(body).unwrap();
            assert_eq!(diagnostics.reports, tick);
            assert_eq!(diagnostics.last_error, Some(SurfaceMotionError::MissingCenter));
        }
        assert_eq!(world.get::<LinearVelocity>(body).unwrap().0, Vector::ZERO);
        assert_eq!(*world.get::<Transform>(body).unwrap(), before);
    }

    #[test]
    fn despawned_center_is_reported() {
        let mut world = world_with_tick();
        let center = world.spawn(GlobalTransform::IDENTITY).id();
        let body = spawn_body(&mut world, quiet(Some(center)), Transform::from_xyz(0.0, 5.0, 0.0));
        world.despawn(center);

        world
            .run_system_once(apply_surface_gravity)
            .expect("gravity system should run");

        let diagnostics = world.get::<SurfaceMotionDiagnostics>(body).unwrap();
        assert_eq!(diagnostics.last_error, Some(SurfaceMotionError::UnresolvedCenter(center)));
    }

    #[test]
    fn disabled_controller_is_not_pulled() {
        let mut world = world_with_tick();
        let center = world.spawn(GlobalTransform::IDENTITY).id();
        let body = spawn_body(&mut world, quiet(Some(center)), Transform::from_xyz(0.0, 5.0, 0.0));
        world.entity_mut(body).insert(SurfaceControllerToggle::Disabled);

        world
            .run_system_once(apply_surface_gravity)
            .expect("gravity system should run");

        assert_eq!(world.get::<LinearVelocity>(body).unwrap().0, Vector::ZERO);
    }

    #[test]
    fn lifecycle_acquires_and_releases_binding() {
        let mut world = World::new();
        let body = spawn_body(&mut world, quiet(None), Transform::default());
        assert!(!world.get::<MoveAction>(body).unwrap().is_enabled());

        world
            .run_system_once(sync_controller_lifecycle)
            .expect("lifecycle system should run");
        assert!(world.get::<MoveAction>(body).unwrap().is_enabled());

        world.entity_mut(body).insert(SurfaceControllerToggle::Disabled);
        world
            .run_system_once(sync_controller_lifecycle)
            .expect("lifecycle system should run");
        assert_eq!(world.get::<MoveAction>(body).unwrap().read(), None);

        world.entity_mut(body).insert(SurfaceControllerToggle::Enabled);
        world
            .run_system_once(sync_controller_lifecycle)
            .expect("lifecycle system should run");
        assert!(world.get::<MoveAction>(body).unwrap().is_enabled());

        world.entity_mut(body).remove::<SurfaceMotionController>();
        assert!(!world.get::<MoveAction>(body).unwrap().is_enabled());

    }

    #[test]
    fn reinserted_controller_reacquires_binding() {
        let mut world = World::new();
        let body = spawn_body(&mut world, quiet(None), Transform::default());
        let mut schedule = Schedule::default();
        schedule
            .set_executor_kind(ExecutorKind::SingleThreaded)
            .add_systems(sync_controller_lifecycle);
        schedule.run(&mut world);

        world.entity_mut(body).remove::<SurfaceMotionController>();
        schedule.run(&mut world);
        assert!(!world.get::<MoveAction>(body).unwrap().is_enabled());

        // The toggle is untouched, only the controller comes back.
        world.entity_mut(body).insert(quiet(None));
        schedule.run(&mut world);
        assert!(world.get::<MoveAction>(body).unwrap().is_enabled());
    }

    #[test]
    fn controller_spawned_disabled_keeps_binding_released() {
        let mut world = World::new();
        let body = world
            .spawn((quiet(None), SurfaceControllerToggle::Disabled))
            .id();

        world
            .run_system_once(sync_controller_lifecycle)
            .expect("lifecycle system should run");

        assert_eq!(world.get::<MoveAction>(body).unwrap().read(), None);
    }

    #[test]
    fn forward_input_walks_north_and_turns_to_face_it() {
        let controller = quiet(None);
        let mut transform = Transform::from_xyz(0.0, 10.0, 0.0)
            .with_rotation(Quaternion::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let facing_before = transform.rotation * Vector::NEG_Z;

        let movement = controller.apply_movement(
            Vector::ZERO,
            Vector2::Y,
            &north_camera(),
            &SurfaceVelocity::default(),
            &mut transform,
            &Unobstructed,
            TICK,
        );

        assert_relative_eq!(
            movement.step.displacement,
            Vector::NEG_Z * MOVE_SPEED * TICK,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            transform.translation,
            Vector::new(0.0, 10.0, -MOVE_SPEED * TICK),
            epsilon = 1e-6
        );
        assert!(!movement.outcome.collided());

        // rotation_speed * dt = 1, the body now faces north with the radial up.
        let facing = transform.rotation * Vector::NEG_Z;
        assert!(facing.dot(Vector::NEG_Z) > facing_before.dot(Vector::NEG_Z));
        assert_relative_eq!(facing, Vector::NEG_Z, epsilon = 1e-5);
        assert_relative_eq!(transform.rotation * Vector::Y, Vector::Y, epsilon = 1e-5);
    }

    #[test]
    fn idle_input_leaves_body_in_place() {
        let controller = quiet(None);
        let start = Transform::from_xyz(0.0, 0.0, 7.0).with_rotation(Quaternion::from_rotation_x(1.0));
        let mut transform = start;

        let movement = controller.apply_movement(
            Vector::ZERO,
            Vector2::ZERO,
            &north_camera(),
            &SurfaceVelocity::default(),
            &mut transform,
            &Unobstructed,
            TICK,
        );

        assert_eq!(movement.step, SurfaceStep::IDLE);
        assert_eq!(transform, start);
    }

    #[test]
    fn movement_stays_on_tangent_plane() {
        let controller = quiet(None);
        let mut transform = Transform::from_xyz(4.0, 0.0, 3.0);
        let up = Vector::new(0.8, 0.0, 0.6);
        let camera = CameraBasis::new(Vector::new(0.1, -0.5, -0.9).normalize(), Vector::X);

        let movement = controller.apply_movement(
            Vector::ZERO,
            Vector2::new(0.7, 0.7),
            &camera,
            &SurfaceVelocity::default(),
            &mut transform,
            &Unobstructed,
            TICK,
        );

        let displacement = movement.step.displacement;
        assert_relative_eq!(displacement.dot(up), 0.0, epsilon = 1e-5);
        assert_relative_eq!(displacement.length(), MOVE_SPEED * TICK, epsilon = 1e-5);
    }

    #[test]
    fn surface_velocity_is_moved_through_after_step() {
        let controller = quiet(None);
        let mut transform = Transform::from_xyz(0.0, 10.0, 0.0);

        let movement = controller.apply_movement(
            Vector::ZERO,
            Vector2::ZERO,
            &north_camera(),
            &SurfaceVelocity(Vector::Y * 2.0),
            &mut transform,
            &Unobstructed,
            TICK,
        );

        assert_relative_eq!(transform.translation, Vector::new(0.0, 10.2, 0.0), epsilon = 1e-5);
        assert_relative_eq!(movement.outcome.translation, Vector::Y * 0.2, epsilon = 1e-5);
    }

    /// Stops every sweep dead, pushing straight back against it.
    struct Blocker;

    impl ShapeSweep for Blocker {
        fn sweep(
            &self,
            _origin: Vector,
            _rotation: Quaternion,
            direction: Dir3,
            _max_distance: Scalar,
        ) -> Option<SweepHit> {
            Some(SweepHit {
                entity: Entity::PLACEHOLDER,
                distance: 0.0,
                normal: -*direction,
            })
        }
    }

    #[test]
    fn blocked_movement_reports_contacts_of_both_moves() {
        let controller = quiet(None);
        let start = Transform::from_xyz(0.0, 10.0, 0.0);
        let mut transform = start;

        let movement = controller.apply_movement(
            Vector::ZERO,
            Vector2::Y,
            &north_camera(),
            &SurfaceVelocity(Vector::Y),
            &mut transform,
            &Blocker,
            TICK,
        );

        assert_eq!(transform.translation, start.translation);
        assert_eq!(movement.outcome.translation, Vector::ZERO);
        assert!(movement.outcome.collided());
        assert_eq!(movement.outcome.contacts.len(), 2);
        assert_eq!(movement.outcome.contacts[0].normal, Vector::Z);
        assert_eq!(movement.outcome.contacts[1].normal, Vector::NEG_Y);
    }

    fn movement_world() -> World {
        let mut world = world_with_tick();
        world.init_resource::<SpatialQueryPipeline>();
        world
    }

    /// A started body standing on top of a planet centered at the origin, pushing forward.
    fn spawn_walker(world: &mut World, center: Option<Entity>) -> Entity {
        let body = spawn_body(world, quiet(center), Transform::from_xyz(0.0, 10.0, 0.0));
        world
            .run_system_once(sync_controller_lifecycle)
            .expect("lifecycle system should run");
        world.get_mut::<MoveAction>(body).unwrap().write(Vector2::Y);
        body
    }

    fn run_movement(world: &mut World) {
        world
            .run_system_once(drive_surface_motion)
            .expect("movement system should run");
    }

    #[test]
    fn walker_moves_on_its_first_tick() {
        let mut world = movement_world();
        let center = world.spawn(GlobalTransform::IDENTITY).id();
        world.spawn((MainCamera, GlobalTransform::IDENTITY));
        let body = spawn_walker(&mut world, Some(center));

        run_movement(&mut world);

        assert_relative_eq!(
            world.get::<Transform>(body).unwrap().translation,
            Vector::new(0.0, 10.0, -MOVE_SPEED * TICK),
            epsilon = 1e-6
        );
        assert_eq!(world.get::<SurfaceMotionDiagnostics>(body).unwrap().reports, 0);
    }

    #[test]
    fn first_fixed_tick_reads_an_acquired_binding() {
        let mut world = movement_world();
        let center = world.spawn(GlobalTransform::IDENTITY).id();
        world.spawn((MainCamera, GlobalTransform::IDENTITY));
        let body = spawn_body(&mut world, quiet(Some(center)), Transform::from_xyz(0.0, 10.0, 0.0));

        let mut fixed_tick = Schedule::default();
        fixed_tick.set_executor_kind(ExecutorKind::SingleThreaded).add_systems(
            (sync_controller_lifecycle, apply_surface_gravity, drive_surface_motion).chain(),
        );
        fixed_tick.run(&mut world);

        let diagnostics = world.get::<SurfaceMotionDiagnostics>(body).unwrap();
        assert_eq!(diagnostics.last_error, None);
        assert_eq!(diagnostics.reports, 0);
        assert!(world.get::<MoveAction>(body).unwrap().is_enabled());
    }

    #[test]
    fn missing_camera_aborts_movement() {
        let mut world = movement_world();
        let center = world.spawn(GlobalTransform::IDENTITY).id();
        let body = spawn_walker(&mut world, Some(center));
        let before = *world.get::<Transform>(body).unwrap();

        run_movement(&mut world);

        assert_eq!(*world.get::<Transform>(body).unwrap(), before);
        let diagnostics = world.get::<SurfaceMotionDiagnostics>(body).unwrap();
        assert_eq!(diagnostics.last_error, Some(SurfaceMotionError::MissingCamera));
        assert_eq!(diagnostics.reports, 1);
    }

    #[test]
    fn two_main_cameras_count_as_missing() {
        let mut world = movement_world();
        let center = world.spawn(GlobalTransform::IDENTITY).id();
        world.spawn((MainCamera, GlobalTransform::IDENTITY));
        world.spawn((MainCamera, GlobalTransform::from_xyz(0.0, 20.0, 0.0)));
        let body = spawn_walker(&mut world, Some(center));
        let before = *world.get::<Transform>(body).unwrap();

        run_movement(&mut world);

        assert_eq!(*world.get::<Transform>(body).unwrap(), before);
        assert_eq!(
            world.get::<SurfaceMotionDiagnostics>(body).unwrap().last_error,
            Some(SurfaceMotionError::MissingCamera)
        );
    }

    #[test]
    fn cleared_center_freezes_walker_every_tick() {
        let mut world = movement_world();
        world.spawn((MainCamera, GlobalTransform::IDENTITY));
        let body = spawn_walker(&mut world, None);
        let before = *world.get::<Transform>(body).unwrap();

        for tick in 1..=3 {
            world
                .run_system_once(apply_surface_gravity)
                .expect("gravity system should run");
            run_movement(&mut world);

            let diagnostics = world.get::<SurfaceMotionDiagnostics>(body).unwrap();
            assert_eq!(diagnostics.reports, 2 * tick);
            assert_eq!(diagnostics.last_error, Some(SurfaceMotionError::MissingCenter));
        }
        assert_eq!(*world.get::<Transform>(body).unwrap(), before);
        assert_eq!(world.get::<LinearVelocity>(body).unwrap().0, Vector::ZERO);
    }

    #[test]
    fn released_binding_walks_with_zero_input() {
        let mut world = movement_world();
        let center = world.spawn(GlobalTransform::IDENTITY).id();
        world.spawn((MainCamera, GlobalTransform::IDENTITY));
        let body = spawn_walker(&mut world, Some(center));
        world.get_mut::<MoveAction>(body).unwrap().disable();
        let before = *world.get::<Transform>(body).unwrap();

        run_movement(&mut world);

        assert_eq!(*world.get::<Transform>(body).unwrap(), before);
        let diagnostics = world.get::<SurfaceMotionDiagnostics>(body).unwrap();
        assert_eq!(diagnostics.last_error, Some(SurfaceMotionError::InputUnavailable));
        assert_eq!(diagnostics.reports, 1);
    }

    #[test]
    fn disabled_controller_does_not_walk() {
        let mut world = movement_world();
        let center = world.spawn(GlobalTransform::IDENTITY).id();
        world.spawn((MainCamera, GlobalTransform::IDENTITY));
        let body = spawn_walker(&mut world, Some(center));
        world.entity_mut(body).insert(SurfaceControllerToggle::Disabled);
        let before = *world.get::<Transform>(body).unwrap();

        run_movement(&mut world);

        assert_eq!(*world.get::<Transform>(body).unwrap(), before);
        assert_eq!(world.get::<SurfaceMotionDiagnostics>(body).unwrap().reports, 0);
    }
    #[test]
    fn resolving_center_reports_what_is_missing() {
        let mut world = World::new();
        let center = world.spawn(GlobalTransform::from_xyz(1.0, 2.0, 3.0)).id();
        let bare = world.spawn_empty().id();

        let resolved = world
            .run_system_once(move |query: Query<&GlobalTransform>| {
                (
                    resolve_center(Some(center), &query),
                    resolve_center(Some(bare), &query),
                    resolve_center(None, &query),
                )
            })
            .expect("resolver should run");

        assert_eq!(resolved.0, Ok(Vector::new(1.0, 2.0, 3.0)));
        assert_eq!(resolved.1, Err(SurfaceMotionError::UnresolvedCenter(bare)));
        assert_eq!(resolved.2, Err(SurfaceMotionError::MissingCenter));
    }
}
