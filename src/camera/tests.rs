//! Camera domain: unit tests for the follow/shake state machine and freezes.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::{TimePlugin, TimeUpdateStrategy};

use super::systems::{drive_time_freeze, handle_camera_requests};
use super::{
    CameraConfigError, CameraController, CameraModeRequest, CameraState, CameraTuning,
    CancelFreeze, FreezeRequest, FreezeTransition, MAX_FREEZE_SECS, ShakePolicy, ShakeRequest,
    TimeFreeze,
};

const DT: f32 = 0.1;

fn tuning(policy: ShakePolicy) -> CameraTuning {
    CameraTuning {
        shake_policy: policy,
        shake_stabilizer: 5.0,
        rng_seed: Some(1234),
        ..default()
    }
}

fn tracking(policy: ShakePolicy) -> CameraController {
    CameraController::new(&tuning(policy), Some(Entity::PLACEHOLDER), Vec2::ZERO).unwrap()
}

fn inactive(policy: ShakePolicy) -> CameraController {
    let tuning = CameraTuning {
        initial_state: CameraState::Inactive,
        ..tuning(policy)
    };
    CameraController::new(&tuning, None, Vec2::ZERO).unwrap()
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}

// -----------------------------------------------------------------------------
// Construction
// -----------------------------------------------------------------------------

#[test]
fn test_tracking_without_target_fails_at_configuration() {
    let result = CameraController::new(&CameraTuning::default(), None, Vec2::ZERO);
    assert_eq!(
        result.unwrap_err(),
        CameraConfigError::MissingFollowTarget {
            state: CameraState::TrackingSingle
        }
    );

    let fallback_state = CameraTuning {
        initial_state: CameraState::MoveToTarget,
        ..default()
    };
    assert!(CameraController::new(&fallback_state, None, Vec2::ZERO).is_err());
}

#[test]
fn test_cannot_start_in_shaking() {
    let tuning = CameraTuning {
        initial_state: CameraState::Shaking,
        ..default()
    };
    assert_eq!(
        CameraController::new(&tuning, Some(Entity::PLACEHOLDER), Vec2::ZERO).unwrap_err(),
        CameraConfigError::InvalidState(CameraState::Shaking)
    );
}

#[test]
fn test_inactive_needs_no_target() {
    let controller = inactive(ShakePolicy::Additive);
    assert_eq!(controller.state(), CameraState::Inactive);

    let mut controller = controller;
    assert!(controller.set_state(CameraState::TrackingSingle).is_err());
}

// -----------------------------------------------------------------------------
// Tracking
// -----------------------------------------------------------------------------

#[test]
fn test_tracking_snaps_to_target_and_keeps_depth() {
    let mut controller = tracking(ShakePolicy::Additive);
    let mut camera = Vec3::new(0.0, 0.0, 999.0);

    controller.update(&mut camera, Some(Vec2::new(40.0, -12.0)), DT);

    assert_eq!(camera, Vec3::new(40.0, -12.0, 999.0));
}

#[test]
fn test_tracking_ignored_axis_keeps_anchor() {
    let tuning = CameraTuning {
        ignore_y: true,
        ..tuning(ShakePolicy::Additive)
    };
    let mut controller =
        CameraController::new(&tuning, Some(Entity::PLACEHOLDER), Vec2::new(0.0, 50.0)).unwrap();
    let mut camera = Vec3::new(0.0, 0.0, 10.0);

    controller.update(&mut camera, Some(Vec2::new(40.0, -12.0)), DT);
    assert_eq!(camera, Vec3::new(40.0, 50.0, 10.0));

    controller.update(&mut camera, Some(Vec2::new(-5.0, 300.0)), DT);
    assert_eq!(camera, Vec3::new(-5.0, 50.0, 10.0));
}

#[test]
fn test_tracking_holds_position_when_target_missing() {
    let mut controller = tracking(ShakePolicy::Additive);
    let mut camera = Vec3::new(7.0, 8.0, 9.0);

    controller.update(&mut camera, None, DT);

    assert_eq!(camera, Vec3::new(7.0, 8.0, 9.0));
    assert_eq!(controller.state(), CameraState::TrackingSingle);
}

#[test]
fn test_unimplemented_states_fall_back_to_tracking_single() {
    for state in [CameraState::TrackingMultiple, CameraState::MoveToTarget] {
        let mut controller = tracking(ShakePolicy::Additive);
        controller.set_state(state).unwrap();
        let mut camera = Vec3::ZERO;

        controller.update(&mut camera, Some(Vec2::new(5.0, 5.0)), DT);
        assert_eq!(controller.state(), CameraState::TrackingSingle);

        controller.update(&mut camera, Some(Vec2::new(5.0, 5.0)), DT);
        assert_eq!(camera, Vec3::new(5.0, 5.0, 0.0));
    }
}

// -----------------------------------------------------------------------------
// Shake accumulation
// -----------------------------------------------------------------------------

#[test]
fn test_additive_policy_sums_requests() {
    let mut controller = tracking(ShakePolicy::Additive);
    controller.request_shake(2.0);
    controller.request_shake(2.0);
    assert_close(controller.shake_left(), 4.0);
}

#[test]
fn test_additive_policy_accounts_for_decay_between_requests() {
    let mut controller = tracking(ShakePolicy::Additive);
    let mut camera = Vec3::ZERO;

    controller.request_shake(2.0);
    controller.update(&mut camera, Some(Vec2::ZERO), DT);
    controller.request_shake(2.0);

    assert_close(controller.shake_left(), 3.5);
}

#[test]
fn test_priority_policy_keeps_largest() {
    let mut controller = tracking(ShakePolicy::Priority);
    controller.request_shake(1.0);
    controller.request_shake(3.0);
    controller.request_shake(1.0);
    assert_close(controller.shake_left(), 3.0);
}

#[test]
fn test_override_policy_replaces() {
    let mut controller = tracking(ShakePolicy::Override);
    controller.request_shake(3.0);
    controller.request_shake(1.0);
    assert_close(controller.shake_left(), 1.0);
}

#[test]
fn test_empty_requests_do_not_start_shaking() {
    let mut controller = tracking(ShakePolicy::Additive);

    assert!(!controller.request_shake(0.0));
    assert!(!controller.request_shake(-4.0));
    assert!(!controller.request_shake(f32::NAN));
    assert!(!controller.request_directional_shake(0.0, Vec2::X));

    assert_eq!(controller.state(), CameraState::TrackingSingle);
    assert_eq!(controller.shake_left(), 0.0);
    assert_eq!(controller.shake_direction, Vec2::ZERO);
}

#[test]
fn test_repeated_requests_keep_return_mode() {
    let mut controller = tracking(ShakePolicy::Additive);

    controller.request_shake(1.0);
    controller.request_shake(1.0);

    assert_eq!(controller.state(), CameraState::Shaking);
    assert_eq!(controller.previous_state(), CameraState::TrackingSingle);
}

#[test]
fn test_plain_request_keeps_fixed_direction() {
    let mut controller = tracking(ShakePolicy::Additive);

    controller.request_directional_shake(2.0, Vec2::new(0.0, 3.0));
    controller.request_shake(1.0);

    assert_eq!(controller.shake_direction, Vec2::Y);
}

// -----------------------------------------------------------------------------
// Shaking
// -----------------------------------------------------------------------------

#[test]
fn test_shake_restores_previous_state_and_resumes_tracking() {
    let mut controller = tracking(ShakePolicy::Additive);
    let target = Vec2::new(10.0, 20.0);
    let mut camera = Vec3::new(0.0, 0.0, 5.0);

    controller.request_directional_shake(1.0, Vec2::X);

    let mut frames = 0;
    while controller.state() == CameraState::Shaking {
        controller.update(&mut camera, Some(target), DT);
        frames += 1;
        assert!(frames < 10, "shake never decayed");
    }

    assert_eq!(controller.state(), CameraState::TrackingSingle);
    assert_eq!(controller.shake_left(), 0.0);
    assert_eq!(controller.shake_direction, Vec2::ZERO);

    controller.update(&mut camera, Some(target), DT);
    assert_eq!(camera, Vec3::new(10.0, 20.0, 5.0));
}

#[test]
fn test_shake_from_inactive_returns_to_inactive() {
    let mut controller = inactive(ShakePolicy::Additive);
    let mut camera = Vec3::ZERO;

    controller.request_shake(0.5);
    controller.update(&mut camera, None, DT);

    assert_eq!(controller.state(), CameraState::Inactive);
}

#[test]
fn test_shake_offset_bounded_by_remaining_budget() {
    let mut controller = tracking(ShakePolicy::Additive);
    let target = Vec2::new(-3.0, 4.0);
    controller.request_shake(2.0);

    while controller.state() == CameraState::Shaking {
        let budget = controller.shake_left();
        let mut camera = Vec3::ZERO;
        controller.update(&mut camera, Some(target), DT);

        let offset = camera.truncate() - target;
        assert!(offset.length() <= budget + 1e-4);
    }
}

#[test]
fn test_directional_shake_never_reverses() {
    let mut controller = tracking(ShakePolicy::Additive);
    controller.request_directional_shake(3.0, Vec2::new(0.0, -2.0));

    while controller.state() == CameraState::Shaking {
        let mut camera = Vec3::ZERO;
        controller.update(&mut camera, Some(Vec2::ZERO), DT);

        assert_eq!(camera.x, 0.0);
        assert!(camera.y <= 0.0);
    }
}

#[test]
fn test_same_seed_shakes_identically() {
    let mut a = tracking(ShakePolicy::Additive);
    let mut b = tracking(ShakePolicy::Additive);
    a.request_shake(2.0);
    b.request_shake(2.0);

    for _ in 0..3 {
        let mut camera_a = Vec3::ZERO;
        let mut camera_b = Vec3::ZERO;
        a.update(&mut camera_a, Some(Vec2::ZERO), DT);
        b.update(&mut camera_b, Some(Vec2::ZERO), DT);
        assert_eq!(camera_a, camera_b);
    }
}

#[test]
fn test_set_state_while_shaking_changes_return_mode() {
    let mut controller = tracking(ShakePolicy::Additive);
    let mut camera = Vec3::ZERO;
    controller.request_shake(0.5);

    controller.set_state(CameraState::Inactive).unwrap();
    assert_eq!(controller.state(), CameraState::Shaking);

    controller.update(&mut camera, Some(Vec2::ZERO), DT);
    assert_eq!(controller.state(), CameraState::Inactive);

    assert_eq!(
        controller.set_state(CameraState::Shaking),
        Err(CameraConfigError::InvalidState(CameraState::Shaking))
    );
}

#[test]
fn test_fallback_state_under_shake_keeps_shaking() {
    let mut controller = tracking(ShakePolicy::Additive);
    controller.set_state(CameraState::MoveToTarget).unwrap();
    controller.request_shake(2.0);
    let mut camera = Vec3::ZERO;

    controller.update(&mut camera, Some(Vec2::ZERO), DT);

    assert_eq!(controller.state(), CameraState::Shaking);
    assert_eq!(controller.previous_state(), CameraState::TrackingSingle);
}

#[test]
fn test_shake_without_return_mode_deactivates_camera() {
    let mut controller = tracking(ShakePolicy::Additive);
    controller.request_shake(2.0);
    controller.previous_state = CameraState::Shaking;
    let mut camera = Vec3::new(1.0, 2.0, 3.0);

    controller.update(&mut camera, Some(Vec2::ZERO), DT);

    assert_eq!(controller.state(), CameraState::Inactive);
    assert_eq!(controller.shake_left(), 0.0);
    assert_eq!(camera, Vec3::new(1.0, 2.0, 3.0));
}

// -----------------------------------------------------------------------------
// Freeze
// -----------------------------------------------------------------------------

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[test]
fn test_freeze_lasts_requested_real_time() {
    let mut freeze = TimeFreeze::default();
    freeze.request(0.1);
    assert!(!freeze.is_frozen());

    assert_eq!(freeze.tick(ms(16)), Some(FreezeTransition::Begin));
    assert!(freeze.is_frozen());

    assert_eq!(freeze.tick(ms(40)), None);
    assert_eq!(freeze.tick(ms(40)), None);
    assert_eq!(freeze.tick(ms(40)), Some(FreezeTransition::End));
    assert!(!freeze.is_frozen());
    assert_eq!(freeze.tick(ms(40)), None);
}

#[test]
fn test_overlapping_freeze_keeps_later_end() {
    let mut freeze = TimeFreeze::default();
    freeze.request(0.1);
    freeze.tick(ms(16));
    freeze.tick(ms(50));

    freeze.request(0.3);
    assert!(freeze.remaining() > ms(250));

    freeze.request(0.01);
    assert!(freeze.remaining() > ms(250));
}

#[test]
fn test_cancel_freeze() {
    let mut freeze = TimeFreeze::default();
    freeze.request(1.0);
    freeze.cancel();
    assert_eq!(freeze.tick(ms(16)), None);

    freeze.request(1.0);
    assert_eq!(freeze.tick(ms(16)), Some(FreezeTransition::Begin));
    freeze.cancel();
    assert!(freeze.is_frozen());
    assert_eq!(freeze.tick(ms(16)), Some(FreezeTransition::End));
    assert!(!freeze.is_frozen());
}

#[test]
fn test_freeze_ignores_empty_durations() {
    let mut freeze = TimeFreeze::default();
    freeze.request(0.0);
    freeze.request(-1.0);
    freeze.request(f32::NAN);
    assert_eq!(freeze.tick(ms(16)), None);
}

#[test]
fn test_freeze_caps_oversized_durations() {
    let mut freeze = TimeFreeze::default();
    freeze.request(1.0e30);
    assert_eq!(freeze.remaining(), Duration::from_secs_f32(MAX_FREEZE_SECS));

    freeze.request(f32::MAX);
    assert_eq!(freeze.tick(ms(16)), Some(FreezeTransition::Begin));
    assert_eq!(
        freeze.tick(Duration::from_secs_f32(MAX_FREEZE_SECS)),
        Some(FreezeTransition::End)
    );
}

#[test]
fn test_sanitized_tuning_caps_debug_freeze() {
    let tuning = CameraTuning {
        debug_freeze_duration: 1.0e30,
        ..default()
    }
    .sanitized();
    assert_eq!(tuning.debug_freeze_duration, MAX_FREEZE_SECS);

    let mut freeze = TimeFreeze::default();
    freeze.request(tuning.debug_freeze_duration);
    assert_eq!(freeze.tick(ms(16)), Some(FreezeTransition::Begin));
}

// -----------------------------------------------------------------------------
// Request handling in a running app
// -----------------------------------------------------------------------------

const FRAME: Duration = Duration::from_millis(20);

fn camera_app(controller: CameraController) -> App {
    let mut app = App::new();
    app.add_plugins(TimePlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .insert_resource(controller)
        .init_resource::<TimeFreeze>()
        .add_message::<CameraModeRequest>()
        .add_message::<ShakeRequest>()
        .add_message::<FreezeRequest>()
        .add_message::<CancelFreeze>()
        .add_systems(Update, (handle_camera_requests, drive_time_freeze).chain());
    // The first frame only records the starting instant
    app.update();
    app
}

fn relative_speed(app: &App) -> f32 {
    app.world().resource::<Time<Virtual>>().relative_speed()
}

#[test]
fn test_freeze_stops_virtual_time_then_restores_normal_speed() {
    let mut app = camera_app(inactive(ShakePolicy::Additive));
    app.world_mut()
        .resource_mut::<Time<Virtual>>()
        .set_relative_speed(0.5);

    app.world_mut().write_message(FreezeRequest { duration: 0.1 });
    app.update();
    assert_eq!(relative_speed(&app), 0.0);

    // 60ms of real time into a 100ms freeze
    for _ in 0..3 {
        app.update();
        assert_eq!(relative_speed(&app), 0.0);
    }

    for _ in 0..5 {
        app.update();
    }
    assert_eq!(relative_speed(&app), 1.0);
    assert!(!app.world().resource::<TimeFreeze>().is_frozen());
}

#[test]
fn test_cancel_message_resumes_time() {
    let mut app = camera_app(inactive(ShakePolicy::Additive));

    app.world_mut().write_message(FreezeRequest { duration: 1.0 });
    app.update();
    assert_eq!(relative_speed(&app), 0.0);

    app.world_mut().write_message(CancelFreeze);
    app.update();
    assert_eq!(relative_speed(&app), 1.0);
}

#[test]
fn test_mode_requests_switch_camera_state() {
    let mut app = camera_app(tracking(ShakePolicy::Additive));

    app.world_mut().write_message(CameraModeRequest {
        state: CameraState::Inactive,
    });
    app.update();
    assert_eq!(
        app.world().resource::<CameraController>().state(),
        CameraState::Inactive
    );

    app.world_mut().write_message(CameraModeRequest {
        state: CameraState::Shaking,
    });
    app.update();
    assert_eq!(
        app.world().resource::<CameraController>().state(),
        CameraState::Inactive
    );

    app.world_mut().write_message(ShakeRequest::random(2.0));
    app.world_mut().write_message(CameraModeRequest {
        state: CameraState::TrackingSingle,
    });
    app.update();
    let controller = app.world().resource::<CameraController>();
    assert_eq!(controller.state(), CameraState::Shaking);
    assert_eq!(controller.previous_state(), CameraState::TrackingSingle);
}

#[cfg(feature = "dev-tools")]
#[test]
fn test_debug_hotkeys_wait_while_time_is_frozen() {
    use bevy::ecs::message::Messages;

    let mut app = App::new();
    app.init_resource::<Time<Virtual>>()
        .init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<ButtonInput<MouseButton>>()
        .insert_resource(CameraTuning::default())
        .add_message::<CameraModeRequest>()
        .add_message::<ShakeRequest>()
        .add_message::<FreezeRequest>()
        .add_message::<CancelFreeze>()
        .add_systems(Update, super::dev::debug_camera_hotkeys);

    app.world_mut()
        .resource_mut::<Time<Virtual>>()
        .set_relative_speed(0.0);
    let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    keyboard.press(KeyCode::KeyK);
    keyboard.press(KeyCode::Escape);

    app.update();
    let world = app.world_mut();
    assert_eq!(world.resource_mut::<Messages<ShakeRequest>>().drain().count(), 0);
    assert_eq!(world.resource_mut::<Messages<CancelFreeze>>().drain().count(), 1);

    app.world_mut()
        .resource_mut::<Time<Virtual>>()
        .set_relative_speed(1.0);
    app.update();
    let shakes = app
        .world_mut()
        .resource_mut::<Messages<ShakeRequest>>()
        .drain()
        .count();
    assert_eq!(shakes, 1);
}
