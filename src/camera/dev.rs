//! Camera domain: debug hotkeys for shakes and freezes.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::camera::{
    CameraController, CameraModeRequest, CameraState, CameraTarget, CameraTuning, CancelFreeze,
    FreezeRequest, MainCamera, ShakeRequest,
};

/// `Escape` ends a freeze early. The rest only work while time runs: `C`
/// toggles follow on and off, `K` shakes randomly, and Ctrl + left click
/// shakes from the target toward the cursor and freezes time briefly.
pub(crate) fn debug_camera_hotkeys(
    time: Res<Time<Virtual>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    tuning: Res<CameraTuning>,
    controller: Option<Res<CameraController>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    targets: Query<&Transform, With<CameraTarget>>,
    mut modes: MessageWriter<CameraModeRequest>,
    mut shakes: MessageWriter<ShakeRequest>,
    mut freezes: MessageWriter<FreezeRequest>,
    mut cancels: MessageWriter<CancelFreeze>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        cancels.write(CancelFreeze);
    }

    if time.relative_speed() == 0.0 {
        return;
    }

    if keyboard.just_pressed(KeyCode::KeyC) {
        if let Some(controller) = controller {
            // While shaking, toggle the mode the shake returns to
            let mode = match controller.state() {
                CameraState::Shaking => controller.previous_state(),
                state => state,
            };
            let state = match mode {
                CameraState::Inactive => CameraState::TrackingSingle,
                _ => CameraState::Inactive,
            };
            modes.write(CameraModeRequest { state });
        }
    }

    if keyboard.just_pressed(KeyCode::KeyK) {
        shakes.write(ShakeRequest::random(tuning.debug_shake_amount));
    }

    if !(keyboard.pressed(KeyCode::ControlLeft) && mouse.just_pressed(MouseButton::Left)) {
        return;
    }

    let Some(cursor) = windows.iter().next().and_then(|w| w.cursor_position()) else {
        return;
    };
    let Some((camera, camera_transform)) = cameras.iter().next() else {
        return;
    };
    let Ok(cursor_world) = camera.viewport_to_world_2d(camera_transform, cursor) else {
        return;
    };
    let Some(target) = targets.iter().next() else {
        return;
    };

    let direction = cursor_world - target.translation.truncate();
    shakes.write(ShakeRequest::towards(tuning.debug_shake_amount, direction));
    freezes.write(FreezeRequest {
        duration: tuning.debug_freeze_duration,
    });
}
