//! Movement domain: ray queries against the world.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::GameLayer;

/// Extra ray length below the collider used by the ground probe.
pub const GROUND_PROBE_MARGIN: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
}

/// Single-ray world query. The movement core never sees the physics world
/// through anything else.
pub trait RayProbe {
    fn cast(&self, origin: Vec2, direction: Dir2, max_distance: f32) -> Option<RayHit>;
}

/// [`RayProbe`] backed by the avian2d spatial query pipeline. Only ground and
/// wall colliders are considered so an actor never hits its own body.
pub struct WorldProbe<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    filter: SpatialQueryFilter,
}

impl<'a, 'w, 's> WorldProbe<'a, 'w, 's> {
    pub fn new(spatial_query: &'a SpatialQuery<'w, 's>) -> Self {
        Self {
            spatial_query,
            filter: SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]),
        }
    }
}

impl RayProbe for WorldProbe<'_, '_, '_> {
    fn cast(&self, origin: Vec2, direction: Dir2, max_distance: f32) -> Option<RayHit> {
        self.spatial_query
            .cast_ray(origin, direction, max_distance, true, &self.filter)
            .map(|hit| RayHit {
                distance: hit.distance,
            })
    }
}
