//! Collision-aware displacement for kinematically driven bodies.
//!
//! [`move_and_collide`] sweeps the body's shape along the requested
//! displacement, stops just short of the first obstacle and slides the
//! remainder along the obstacle's surface. The sweep itself is abstracted
//! behind [`ShapeSweep`] so the algorithm does not depend on a live
//! [`SpatialQuery`].

use avian3d::{
    math::{Quaternion, Scalar, Vector},
    prelude::*,
};
use bevy::prelude::*;
use smallvec::SmallVec;

/// Gap kept between the swept shape and whatever it hits.
pub const SKIN_WIDTH: Scalar = 0.01;

/// Maximum number of sweeps used to resolve a single displacement.
pub const MAX_SLIDES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    pub entity: Entity,
    /// Distance travelled along the sweep direction before touching.
    pub distance: Scalar,
    /// World space surface normal of the obstacle at the contact.
    pub normal: Vector,
}

pub trait ShapeSweep {
    fn sweep(
        &self,
        origin: Vector,
        rotation: Quaternion,
        direction: Dir3,
        max_distance: Scalar,
    ) -> Option<SweepHit>;
}

/// The result of [`move_and_collide`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveOutcome {
    /// Translation that can be applied without penetrating anything.
    pub translation: Vector,
    /// Every obstacle touched while resolving the move, in order.
    pub contacts: SmallVec<[SweepHit; MAX_SLIDES]>,
}

impl MoveOutcome {
    pub fn collided(&self) -> bool {
        !self.contacts.is_empty()
    }
}

/// Moves a shape from `origin` along `displacement`, sliding along obstacles.
pub fn move_and_collide(
    sweeper: &impl ShapeSweep,
    origin: Vector,
    rotation: Quaternion,
    displacement: Vector,
) -> MoveOutcome {
    let mut outcome = MoveOutcome::default();
    let mut remaining = displacement;

    for _ in 0..MAX_SLIDES {
        let Ok((direction, distance)) = Dir3::new_and_length(remaining) else {
            break;
        };
        if distance <= Scalar::EPSILON {
            break;
        }

        let position = origin + outcome.translation;
        let Some(hit) = sweeper.sweep(position, rotation, direction, distance + SKIN_WIDTH) else {
            outcome.translation += remaining;
            break;
        };

        let travelled = (hit.distance - SKIN_WIDTH).clamp(0.0, distance);
        outcome.translation += direction * travelled;
        outcome.contacts.push(hit);

        // Whatever is left slides along the obstacle.
        let leftover = direction * (distance - travelled);
        remaining = leftover.reject_from_normalized(hit.normal.normalize_or_zero());
    }

    outcome
}

/// [`ShapeSweep`] backed by avian's spatial query pipeline.
pub struct ColliderSweep<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    shape: &'a Collider,
    filter: SpatialQueryFilter,
}

impl<'a, 'w, 's> ColliderSweep<'a, 'w, 's> {
    /// Sweeps `shape` while ignoring the body that owns it.
    pub fn new(spatial_query: &'a SpatialQuery<'w, 's>, shape: &'a Collider, owner: Entity) -> Self {
        Self {
            spatial_query,
            shape,
            filter: SpatialQueryFilter::from_excluded_entities([owner]),
        }
    }
}

impl ShapeSweep for ColliderSweep<'_, '_, '_> {
    fn sweep(
        &self,
        origin: Vector,
        rotation: Quaternion,
        direction: Dir3,
        max_distance: Scalar,
    ) -> Option<SweepHit> {
        let config = ShapeCastConfig {
            max_distance,
            ignore_origin_penetration: true,
            ..default()
        };
        self.spatial_query
            .cast_shape(self.shape, origin, rotation, direction, &config, &self.filter)
            .map(|hit| SweepHit {
                entity: hit.entity,
                distance: hit.distance,
                normal: hit.normal1,
            })
    }
}

/// Nothing to collide with.
pub struct Unobstructed;

impl ShapeSweep for Unobstructed {
    fn sweep(&self, _: Vector, _: Quaternion, _: Dir3, _: Scalar) -> Option<SweepHit> {
        None
    }
}
