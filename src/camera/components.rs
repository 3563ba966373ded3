//! Camera domain: marker components.

use bevy::prelude::*;

/// The camera driven by the [`CameraController`](crate::camera::CameraController).
#[derive(Component, Debug)]
pub struct MainCamera;

/// The entity the camera follows while tracking.
#[derive(Component, Debug)]
pub struct CameraTarget;
