//! Camera domain: requests other systems send to the camera.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::camera::CameraState;

/// Ask for a screen shake. `direction: None` shakes in random directions.
#[derive(Debug, Clone, Copy)]
pub struct ShakeRequest {
    pub amount: f32,
    pub direction: Option<Vec2>,
}

impl Message for ShakeRequest {}

impl ShakeRequest {
    pub fn random(amount: f32) -> Self {
        Self {
            amount,
            direction: None,
        }
    }

    pub fn towards(amount: f32, direction: Vec2) -> Self {
        Self {
            amount,
            direction: Some(direction),
        }
    }
}

/// Ask for simulation time to stop for `duration` real seconds.
#[derive(Debug, Clone, Copy)]
pub struct FreezeRequest {
    pub duration: f32,
}

impl Message for FreezeRequest {}

/// Drop any pending or running freeze.
#[derive(Debug, Clone, Copy)]
pub struct CancelFreeze;

impl Message for CancelFreeze {}

/// Switch the camera mode. While a shake runs, this is the mode it returns to.
#[derive(Debug, Clone, Copy)]
pub struct CameraModeRequest {
    pub state: CameraState,
}

impl Message for CameraModeRequest {}
