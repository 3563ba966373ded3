//! Camera domain: follow camera with screen shake and time freeze.

mod components;
mod controller;
#[cfg(feature = "dev-tools")]
mod dev;
mod events;
mod freeze;
mod resources;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{CameraTarget, MainCamera};
pub use controller::{CameraConfigError, CameraController, CameraState};
pub use events::{CameraModeRequest, CancelFreeze, FreezeRequest, ShakeRequest};
pub use freeze::{FreezeTransition, MAX_FREEZE_SECS, TimeFreeze};
pub use resources::{CameraTuning, ShakePolicy};

use bevy::prelude::*;

use crate::camera::systems::{
    drive_time_freeze, handle_camera_requests, init_camera_controller, setup_camera,
    update_camera,
};
use crate::core::{FrameSet, load_config_or_default};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        let tuning = load_config_or_default::<CameraTuning>("camera.ron").sanitized();

        app.insert_resource(tuning)
            .init_resource::<TimeFreeze>()
            .add_message::<ShakeRequest>()
            .add_message::<FreezeRequest>()
            .add_message::<CancelFreeze>()
            .add_message::<CameraModeRequest>()
            .add_systems(Startup, setup_camera)
            .add_systems(PostStartup, init_camera_controller)
            .add_systems(
                Update,
                (handle_camera_requests, drive_time_freeze, update_camera)
                    .chain()
                    .in_set(FrameSet::Camera),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(
            Update,
            dev::debug_camera_hotkeys.in_set(FrameSet::Input),
        );
    }
}
