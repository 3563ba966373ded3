//! Camera domain: systems driving the controller and the time freeze.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::camera::{
    CameraController, CameraModeRequest, CameraTarget, CameraTuning, CancelFreeze, FreezeRequest,
    FreezeTransition, MainCamera, ShakeRequest, TimeFreeze,
};

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera));
}

/// Runs after startup spawns so the follow target exists. A missing target is
/// a configuration error and aborts startup.
pub(crate) fn init_camera_controller(
    mut commands: Commands,
    tuning: Res<CameraTuning>,
    targets: Query<Entity, With<CameraTarget>>,
    cameras: Query<&Transform, With<MainCamera>>,
) -> bevy::ecs::error::Result {
    let follow = targets.iter().next();
    let anchor = cameras
        .iter()
        .next()
        .map(|transform| transform.translation.truncate())
        .unwrap_or_default();

    let controller = CameraController::new(&tuning, follow, anchor)?;
    info!(
        "Camera controller ready: state={:?}, policy={:?}, follow={:?}",
        controller.state(),
        tuning.shake_policy,
        follow
    );
    commands.insert_resource(controller);
    Ok(())
}

/// Drain queued requests so the controller has a single writer per frame.
pub(crate) fn handle_camera_requests(
    mut modes: MessageReader<CameraModeRequest>,
    mut shakes: MessageReader<ShakeRequest>,
    mut freezes: MessageReader<FreezeRequest>,
    mut cancels: MessageReader<CancelFreeze>,
    mut controller: ResMut<CameraController>,
    mut freeze: ResMut<TimeFreeze>,
) {
    for request in modes.read() {
        match controller.set_state(request.state) {
            Ok(()) => info!(
                "Camera mode: state={:?}, after shake={:?}",
                controller.state(),
                controller.previous_state()
            ),
            Err(err) => warn!("Camera mode request rejected: {err}"),
        }
    }

    for request in shakes.read() {
        match request.direction {
            Some(direction) => {
                controller.request_directional_shake(request.amount, direction);
            }
            None => {
                controller.request_shake(request.amount);
            }
        }
    }

    for request in freezes.read() {
        freeze.request(request.duration);
    }

    if cancels.read().count() > 0 {
        if freeze.is_frozen() {
            debug!("Freeze cancelled with {:?} left", freeze.remaining());
        }
        freeze.cancel();
    }
}

pub(crate) fn drive_time_freeze(
    real_time: Res<Time<Real>>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut freeze: ResMut<TimeFreeze>,
) {
    match freeze.tick(real_time.delta()) {
        Some(FreezeTransition::Begin) => {
            debug!("Freezing simulation for {:?}", freeze.remaining());
            virtual_time.set_relative_speed(0.0);
        }
        Some(FreezeTransition::End) => {
            // Always back to normal speed, not to the speed before the freeze
            virtual_time.set_relative_speed(1.0);
            debug!("Freeze over");
        }
        None => {}
    }
}

pub(crate) fn update_camera(
    time: Res<Time<Virtual>>,
    mut controller: ResMut<CameraController>,
    targets: Query<&Transform, (With<CameraTarget>, Without<MainCamera>)>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
) {
    // The state machine does not step while simulation time is stopped
    if time.relative_speed() == 0.0 {
        return;
    }

    let Ok(mut camera) = cameras.single_mut() else {
        return;
    };

    let target = controller
        .follow()
        .and_then(|entity| targets.get(entity).ok())
        .map(|transform| transform.translation.truncate());

    controller.update(&mut camera.translation, target, time.delta_secs());
}
