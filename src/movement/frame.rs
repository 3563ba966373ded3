//! Movement domain: the per-frame locomotion pipeline.

use bevy::prelude::*;

use crate::movement::probe::GROUND_PROBE_MARGIN;
use crate::movement::{MovementInput, MovementState, MovementTuning, RayProbe};

/// The actor as seen by the movement core for one frame. Copied in from and
/// back out to the physics components by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Collider center.
    pub position: Vec2,
    pub velocity: Vec2,
    pub gravity_scale: f32,
    /// Full collider extents.
    pub size: Vec2,
}

impl MovementState {
    /// Run one variable-rate frame: ground probe, horizontal motion, jump
    /// admission, gravity scale, corner correction, then state classification.
    pub fn step_frame(
        &mut self,
        body: &mut Body,
        tuning: &MovementTuning,
        input: &MovementInput,
        probe: &impl RayProbe,
        dt: f32,
    ) {
        self.probe_ground(body, tuning, probe);
        self.resolve_horizontal(tuning, input.axis_x(), dt, &mut body.velocity);
        self.resolve_jump(tuning, input, dt, &mut body.velocity);
        body.gravity_scale = gravity_scale_for(tuning, body.velocity.y);
        self.correct_corner(body, tuning, probe);
        self.classify(tuning, body.velocity);
    }

    /// Cast straight down from the collider center. The probe result is the
    /// only source of the grounded flag; nothing is carried over.
    pub fn probe_ground(&mut self, body: &Body, tuning: &MovementTuning, probe: &impl RayProbe) {
        let was_on_ground = self.on_ground;
        let distance = body.size.y * 0.5 + GROUND_PROBE_MARGIN;
        self.on_ground = probe.cast(body.position, Dir2::NEG_Y, distance).is_some();

        if self.on_ground {
            self.coyote_timer = tuning.coyote_time;
            self.jumps_used = 0;
        }

        if self.on_ground && !was_on_ground {
            debug!("Landed: coyote_timer={}", self.coyote_timer);
        } else if !self.on_ground && was_on_ground {
            debug!("Left ground: jumps_used={}", self.jumps_used);
        }
    }
}

/// Ascent and descent use different gravity scales. Recomputed every frame.
pub fn gravity_scale_for(tuning: &MovementTuning, vertical_velocity: f32) -> f32 {
    if vertical_velocity < 0.0 {
        tuning.fall_gravity
    } else {
        tuning.jump_gravity
    }
}
