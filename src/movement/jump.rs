//! Movement domain: jump admission, coyote time, buffering and variable height.

use bevy::prelude::*;

use crate::movement::{MovementInput, MovementState, MovementTuning};

/// Which path admitted a jump. Exactly one is taken per admitted jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    Coyote,
    Double,
}

impl MovementState {
    /// Tick the coyote timer, run the configured admission policy, then apply
    /// the early-release cut. Returns the admitted jump, if any.
    pub fn resolve_jump(
        &mut self,
        tuning: &MovementTuning,
        input: &MovementInput,
        dt: f32,
        velocity: &mut Vec2,
    ) -> Option<JumpKind> {
        self.coyote_timer = (self.coyote_timer - dt).max(0.0);

        let admitted = if tuning.buffer_jump_input {
            self.tick_jump_buffer(tuning, input.jump_pressed_this_frame());
            self.jump_buffer.and_then(|_| self.admissible_jump(tuning))
        } else if input.jump_pressed_this_frame() {
            self.admissible_jump(tuning)
        } else {
            None
        };

        if let Some(kind) = admitted {
            self.jump(tuning, kind, velocity);
        }

        if tuning.hold_to_jump_higher && input.jump_released_this_frame() && velocity.y > 0.0 {
            velocity.y *= tuning.shorten_jump_percentage.clamp(0.0, 1.0);
        }

        admitted
    }

    /// A buffered press stays live on its own frame plus `input_buffer_frames`
    /// later frames.
    fn tick_jump_buffer(&mut self, tuning: &MovementTuning, pressed: bool) {
        self.jump_buffer = match self.jump_buffer {
            Some(frames) if frames > 0 => Some(frames - 1),
            _ => None,
        };

        if pressed {
            self.jump_buffer = Some(tuning.input_buffer_frames);
        }
    }

    /// Ground before coyote before double jump.
    pub fn admissible_jump(&self, tuning: &MovementTuning) -> Option<JumpKind> {
        if self.on_ground {
            Some(JumpKind::Ground)
        } else if tuning.use_coyote_time && self.coyote_timer > 0.0 {
            Some(JumpKind::Coyote)
        } else if self.jumps_used < tuning.double_jumps {
            Some(JumpKind::Double)
        } else {
            None
        }
    }

    fn jump(&mut self, tuning: &MovementTuning, kind: JumpKind, velocity: &mut Vec2) {
        self.jump_buffer = None;
        self.coyote_timer = 0.0;
        if kind == JumpKind::Double {
            self.jumps_used += 1;
        }
        velocity.y = tuning.jump_force;

        debug!(
            "{:?} jump: jumps_used={}/{}",
            kind, self.jumps_used, tuning.double_jumps
        );
    }
}
