//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Discrete player state published to animation.
///
/// Only `Idle`, `Run`, `Jump` and `Fall` are produced by the movement core.
/// `Walk` is reserved for a speed threshold that does not exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
    #[default]
    Idle,
    Walk,
    Run,
    Crouch,
    Jump,
    Fall,
    Dead,
    Attack,
    Dash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

/// Per-actor locomotion state, mutated every frame by exactly one actor.
#[derive(Component, Debug, Default, Clone)]
pub struct MovementState {
    /// Stored ground speed, ramps toward `ground_speed_max`.
    pub ground_speed: f32,
    /// Stored air speed, ramps toward `air_speed_max`.
    pub air_speed: f32,
    /// Seconds of coyote time left. Never negative.
    pub coyote_timer: f32,
    /// Frames left after the press frame while a jump is buffered.
    pub jump_buffer: Option<u32>,
    pub on_ground: bool,
    /// Double jumps spent since the last ground contact.
    pub jumps_used: u32,
    /// Raw horizontal input seen by the last frame, read by the friction tick.
    pub axis_x: f32,
    pub state: PlayerState,
    /// State published on the previous frame, for edge detection.
    pub last_state: PlayerState,
    pub facing: Facing,
}

impl MovementState {
    pub fn current_state(&self) -> PlayerState {
        self.state
    }

    pub fn facing_left(&self) -> bool {
        self.facing == Facing::Left
    }

    /// Returns `(previous, current)` when the state differs from the last
    /// published one, and marks the current state as published.
    pub fn take_state_change(&mut self) -> Option<(PlayerState, PlayerState)> {
        let current = self.current_state();
        if current == self.last_state {
            return None;
        }
        let previous = self.last_state;
        self.last_state = current;
        Some((previous, current))
    }
}
