//! Movement domain: discrete state classification and facing.

use bevy::prelude::*;

use crate::movement::{Facing, FlipMode, MovementState, MovementTuning, PlayerState};

impl MovementState {
    /// Derive the animation state and facing from the final velocity of the
    /// frame. An airborne actor with zero vertical velocity keeps its state.
    pub fn classify(&mut self, tuning: &MovementTuning, velocity: Vec2) {
        if !self.on_ground {
            if velocity.y > 0.0 {
                self.state = PlayerState::Jump;
            } else if velocity.y < 0.0 {
                self.state = PlayerState::Fall;
            }
        } else if self.axis_x == 0.0 {
            self.state = PlayerState::Idle;
        } else {
            self.state = PlayerState::Run;
        }

        let reading = match tuning.flip_mode {
            FlipMode::Input => self.axis_x,
            FlipMode::Velocity => velocity.x,
        };
        if reading > 0.0 {
            self.facing = Facing::Right;
        } else if reading < 0.0 {
            self.facing = Facing::Left;
        }
    }
}
