//! Camera domain: tuning resource.

use bevy::prelude::*;
use serde::Deserialize;

use crate::camera::{CameraState, MAX_FREEZE_SECS};
use crate::core::sanitize;

/// How a new shake request combines with a shake already in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ShakePolicy {
    /// Sum the magnitudes.
    #[default]
    Additive,
    /// Keep the larger magnitude.
    Priority,
    /// Replace the magnitude.
    Override,
}

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    pub initial_state: CameraState,
    /// Leave the camera's x where it is while tracking.
    pub ignore_x: bool,
    /// Leave the camera's y where it is while tracking.
    pub ignore_y: bool,
    pub shake_policy: ShakePolicy,
    /// Shake magnitude removed per second.
    pub shake_stabilizer: f32,
    /// Seed for shake randomness. Random when absent.
    pub rng_seed: Option<u64>,
    pub debug_shake_amount: f32,
    pub debug_freeze_duration: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            initial_state: CameraState::TrackingSingle,
            ignore_x: false,
            ignore_y: false,
            shake_policy: ShakePolicy::Additive,
            shake_stabilizer: 40.0,
            rng_seed: None,
            debug_shake_amount: 16.0,
            debug_freeze_duration: 0.1,
        }
    }
}

impl CameraTuning {
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        Self {
            shake_stabilizer: sanitize(self.shake_stabilizer, d.shake_stabilizer, 0.0, f32::MAX),
            debug_shake_amount: sanitize(
                self.debug_shake_amount,
                d.debug_shake_amount,
                0.0,
                f32::MAX,
            ),
            debug_freeze_duration: sanitize(
                self.debug_freeze_duration,
                d.debug_freeze_duration,
                0.0,
                MAX_FREEZE_SECS,
            ),
            ..self
        }
    }
}
