//! Movement domain: player bootstrap.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::camera::CameraTarget;
use crate::core::BASE_GRAVITY;
use crate::movement::{GameLayer, MovementState, MovementTuning, Player};

const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 48.0);

pub(crate) fn spawn_player(mut commands: Commands, tuning: Res<MovementTuning>) {
    info!(
        "Spawning player: ground_speed_max={}, jump_force={}, double_jumps={}, buffered={}",
        tuning.ground_speed_max, tuning.jump_force, tuning.double_jumps, tuning.buffer_jump_input
    );
    info!(
        "Jump reach: single={:.1}px, with double jumps={:.1}px",
        tuning.single_jump_height(BASE_GRAVITY),
        tuning.max_reachable_height(BASE_GRAVITY)
    );

    commands.spawn((
        // Identity & Movement
        (Player, CameraTarget, MovementState::default()),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(0.0, 100.0, 0.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(tuning.jump_gravity),
            // Friction is handled by the fixed tick
            Friction::new(0.0),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground, GameLayer::Wall]),
        ),
    ));
}
