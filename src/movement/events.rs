//! Movement domain: notifications for animation consumers.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::movement::PlayerState;

/// Fired once when an actor's classified state differs from the previous frame.
#[derive(Debug, Clone, Copy)]
pub struct PlayerStateChanged {
    pub entity: Entity,
    pub previous: PlayerState,
    pub current: PlayerState,
}

impl Message for PlayerStateChanged {}
