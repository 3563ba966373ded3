//! Camera domain: follow/shake state machine.
//!
//! The controller is an owned resource handed the camera translation and the
//! followed target's position each frame, so it runs without a scene.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use thiserror::Error;

use crate::camera::{CameraTuning, ShakePolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum CameraState {
    Inactive,
    #[default]
    TrackingSingle,
    /// Not implemented; falls back to `TrackingSingle`.
    TrackingMultiple,
    /// Not implemented; falls back to `TrackingSingle`.
    MoveToTarget,
    Shaking,
}

impl CameraState {
    /// States that end up following a target, directly or via fallback.
    fn needs_target(self) -> bool {
        matches!(
            self,
            CameraState::TrackingSingle | CameraState::TrackingMultiple | CameraState::MoveToTarget
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CameraConfigError {
    #[error("camera state {state:?} needs a follow target, but none was found")]
    MissingFollowTarget { state: CameraState },
    #[error("camera state cannot be set to {0:?} directly")]
    InvalidState(CameraState),
}

#[derive(Resource, Debug)]
pub struct CameraController {
    pub(super) state: CameraState,
    /// Mode to return to once a shake runs out. Never `Shaking`.
    pub(super) previous_state: CameraState,
    follow: Option<Entity>,
    /// Last tracked position; ignored axes keep their value.
    center: Vec2,
    shake_left: f32,
    /// Zero means a random direction every frame.
    pub(super) shake_direction: Vec2,
    ignore_x: bool,
    ignore_y: bool,
    policy: ShakePolicy,
    stabilizer: f32,
    rng: ChaCha8Rng,
}

impl CameraController {
    /// Build the controller, failing if the initial state needs a target that
    /// was not supplied. `anchor` seeds the position kept on ignored axes.
    pub fn new(
        tuning: &CameraTuning,
        follow: Option<Entity>,
        anchor: Vec2,
    ) -> Result<Self, CameraConfigError> {
        let state = tuning.initial_state;
        if state == CameraState::Shaking {
            return Err(CameraConfigError::InvalidState(state));
        }
        if state.needs_target() && follow.is_none() {
            return Err(CameraConfigError::MissingFollowTarget { state });
        }

        let seed = tuning.rng_seed.unwrap_or_else(rand::random);

        Ok(Self {
            state,
            previous_state: state,
            follow,
            center: anchor,
            shake_left: 0.0,
            shake_direction: Vec2::ZERO,
            ignore_x: tuning.ignore_x,
            ignore_y: tuning.ignore_y,
            policy: tuning.shake_policy,
            stabilizer: tuning.shake_stabilizer,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn previous_state(&self) -> CameraState {
        self.previous_state
    }

    pub fn follow(&self) -> Option<Entity> {
        self.follow
    }

    pub fn shake_left(&self) -> f32 {
        self.shake_left
    }

    /// Switch the camera mode. While shaking, the new mode is where the shake
    /// returns to.
    pub fn set_state(&mut self, state: CameraState) -> Result<(), CameraConfigError> {
        if state == CameraState::Shaking {
            return Err(CameraConfigError::InvalidState(state));
        }
        if state.needs_target() && self.follow.is_none() {
            return Err(CameraConfigError::MissingFollowTarget { state });
        }

        if self.state == CameraState::Shaking {
            self.previous_state = state;
        } else {
            self.state = state;
        }
        Ok(())
    }

    /// Add a shake in a random direction, combined with any shake in progress
    /// per the configured policy. Returns whether the camera is now shaking.
    pub fn request_shake(&mut self, amount: f32) -> bool {
        let amount = if amount.is_finite() {
            amount.max(0.0)
        } else {
            0.0
        };

        self.shake_left = match self.policy {
            ShakePolicy::Additive => self.shake_left + amount,
            ShakePolicy::Priority => self.shake_left.max(amount),
            ShakePolicy::Override => amount,
        };

        if self.shake_left <= 0.0 && self.state != CameraState::Shaking {
            return false;
        }

        if self.state != CameraState::Shaking {
            self.previous_state = self.state;
            self.state = CameraState::Shaking;
            debug!(
                "Shake started: amount={}, returning to {:?}",
                self.shake_left, self.previous_state
            );
        }
        true
    }

    /// Like [`Self::request_shake`], but every offset points along
    /// `direction` and never behind it.
    pub fn request_directional_shake(&mut self, amount: f32, direction: Vec2) -> bool {
        let accepted = self.request_shake(amount);
        if accepted {
            self.shake_direction = direction.normalize_or_zero();
        }
        accepted
    }

    /// Step the state machine once. `camera` keeps its own depth.
    pub fn update(&mut self, camera: &mut Vec3, target: Option<Vec2>, dt: f32) {
        match self.state {
            CameraState::Inactive => {}
            CameraState::TrackingSingle => self.track_single(camera, target),
            CameraState::TrackingMultiple | CameraState::MoveToTarget => {
                self.state = fallback(self.state);
            }
            CameraState::Shaking => self.shake(camera, target, dt),
        }
    }

    fn track_single(&mut self, camera: &mut Vec3, target: Option<Vec2>) {
        let Some(target) = target else {
            warn_once!("Camera follow target is gone, holding position");
            return;
        };

        if !self.ignore_x {
            self.center.x = target.x;
        }
        if !self.ignore_y {
            self.center.y = target.y;
        }

        camera.x = self.center.x;
        camera.y = self.center.y;
    }

    fn shake(&mut self, camera: &mut Vec3, target: Option<Vec2>, dt: f32) {
        // Long shakes should not pin the camera in place
        match self.previous_state {
            CameraState::Inactive => {}
            CameraState::TrackingSingle => self.track_single(camera, target),
            CameraState::TrackingMultiple | CameraState::MoveToTarget => {
                self.previous_state = fallback(self.previous_state);
            }
            CameraState::Shaking => {
                error!("Shake has no mode to return to, switching camera to Inactive");
                self.state = CameraState::Inactive;
                self.previous_state = CameraState::Inactive;
                self.shake_left = 0.0;
                self.shake_direction = Vec2::ZERO;
                return;
            }
        }

        let (direction, amount) = self.shake_offset();
        camera.x += direction.x * amount;
        camera.y += direction.y * amount;

        self.shake_left -= self.stabilizer * dt;
        if self.shake_left <= 0.0 {
            self.shake_left = 0.0;
            self.state = self.previous_state;
            self.shake_direction = Vec2::ZERO;
            debug!("Shake finished, back to {:?}", self.state);
        }
    }

    /// Unit direction and signed magnitude for this frame's offset.
    fn shake_offset(&mut self) -> (Vec2, f32) {
        let amount = if self.shake_left > 0.0 {
            self.rng.random_range(-self.shake_left..=self.shake_left)
        } else {
            0.0
        };

        if self.shake_direction != Vec2::ZERO {
            (self.shake_direction, amount.abs())
        } else {
            let angle = self.rng.random_range(0.0..TAU);
            (Vec2::from_angle(angle), amount)
        }
    }
}

fn fallback(state: CameraState) -> CameraState {
    info!("{:?} not implemented yet, tracking single target", state);
    CameraState::TrackingSingle
}
