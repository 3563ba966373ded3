//! Core domain: shared configuration loading, frame ordering and world setup.

pub mod config;


pub use config::{ConfigLoadError, load_config_or_default, sanitize};

use avian2d::prelude::*;
use bevy::prelude::*;

/// World units per meter. Tuning values are expressed in pixels.
pub const PIXELS_PER_METER: f32 = 32.0;

/// Magnitude of the world gravity that `GravityScale` multiplies.
pub const BASE_GRAVITY: f32 = 9.81 * PIXELS_PER_METER;

/// Per-frame ordering: input is sampled before any actor moves, and the camera
/// follows after every actor has moved.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Input,
    Movement,
    Camera,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Gravity(Vec2::NEG_Y * BASE_GRAVITY))
            .configure_sets(
                Update,
                (FrameSet::Input, FrameSet::Movement, FrameSet::Camera).chain(),
            );
    }
}
