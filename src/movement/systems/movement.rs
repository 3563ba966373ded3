//! Movement domain: locomotion systems bridging the core to avian2d.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::{
    Body, MovementInput, MovementState, MovementTuning, Player, PlayerStateChanged, WorldProbe,
};

/// Fallback extents when the collider is not a cuboid.
const DEFAULT_PLAYER_SIZE: Vec2 = Vec2::new(24.0, 48.0);

pub(crate) fn collider_size(collider: &Collider) -> Vec2 {
    match collider.shape_scaled().as_cuboid() {
        Some(c) => Vec2::new(c.half_extents.x, c.half_extents.y) * 2.0,
        None => DEFAULT_PLAYER_SIZE,
    }
}

/// Variable-rate frame step for every player.
pub(crate) fn drive_player_frame(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<
        (
            &mut Transform,
            &Collider,
            &mut LinearVelocity,
            &mut GravityScale,
            &mut MovementState,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();
    let probe = WorldProbe::new(&spatial_query);

    for (mut transform, collider, mut velocity, mut gravity_scale, mut state) in &mut query {
        let start = transform.translation.truncate();
        let mut body = Body {
            position: start,
            velocity: velocity.0,
            gravity_scale: gravity_scale.0,
            size: collider_size(collider),
        };

        state.step_frame(&mut body, &tuning, &input, &probe, dt);

        // Only touch the transform on a corner snap so avian keeps ownership
        // of the position otherwise
        if body.position != start {
            transform.translation.x = body.position.x;
            transform.translation.y = body.position.y;
        }
        velocity.0 = body.velocity;
        gravity_scale.0 = body.gravity_scale;
    }
}

/// Fixed-rate friction, decoupled from the frame step.
pub(crate) fn apply_friction(
    tuning: Res<MovementTuning>,
    mut query: Query<(&MovementState, &mut LinearVelocity), With<Player>>,
) {
    for (state, mut velocity) in &mut query {
        velocity.x = state.apply_friction(&tuning, velocity.x);
    }
}

/// Late step: mirror the sprite every frame and notify on state edges.
pub(crate) fn publish_player_state(
    mut events: MessageWriter<PlayerStateChanged>,
    mut query: Query<(Entity, &mut MovementState, &mut Sprite), With<Player>>,
) {
    for (entity, mut state, mut sprite) in &mut query {
        let facing_left = state.facing_left();
        if sprite.flip_x != facing_left {
            sprite.flip_x = facing_left;
        }

        if let Some((previous, current)) = state.take_state_change() {
            debug!("Player state {:?} -> {:?}", previous, current);
            events.write(PlayerStateChanged {
                entity,
                previous,
                current,
            });
        }
    }
}
