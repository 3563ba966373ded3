//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::sanitize;

/// Which reading drives the facing flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum FlipMode {
    /// Face the raw input direction.
    #[default]
    Input,
    /// Face the direction of horizontal velocity.
    Velocity,
}

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    /// Ramp stored speed by `acceleration`/s instead of snapping to max.
    pub use_acceleration: bool,
    pub acceleration: f32,
    /// Drain rate of the stored speeds while no input is held.
    pub deceleration: f32,
    pub ground_speed_max: f32,
    pub air_speed_max: f32,
    /// Velocity multiplier per fixed tick on the ground without input.
    pub grounded_deceleration: f32,
    /// Velocity multiplier per fixed tick in the air.
    pub air_deceleration: f32,
    /// Restrict air friction to ticks without input.
    pub only_decelerate_in_air_without_input: bool,
    pub jump_force: f32,
    /// Double jumps allowed in the air. Ground and coyote jumps are free.
    pub double_jumps: u32,
    pub use_coyote_time: bool,
    pub coyote_time: f32,
    pub jump_gravity: f32,
    pub fall_gravity: f32,
    pub hold_to_jump_higher: bool,
    /// Fraction of upward velocity kept when jump is released early.
    pub shorten_jump_percentage: f32,
    pub buffer_jump_input: bool,
    /// Extra frames after the press frame during which a jump stays buffered.
    pub input_buffer_frames: u32,
    pub use_corner_correction: bool,
    /// Height above the collider bottom of the upper corner probe.
    pub corner_correction_leniency: f32,
    pub flip_mode: FlipMode,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            use_acceleration: false,
            acceleration: 640.0,
            deceleration: 640.0,
            ground_speed_max: 320.0,
            air_speed_max: 320.0,
            grounded_deceleration: 0.7,
            air_deceleration: 0.975,
            only_decelerate_in_air_without_input: true,
            jump_force: 600.0,
            double_jumps: 1,
            use_coyote_time: true,
            coyote_time: 0.3,
            jump_gravity: 4.0,
            fall_gravity: 8.0,
            hold_to_jump_higher: false,
            shorten_jump_percentage: 0.2,
            buffer_jump_input: true,
            input_buffer_frames: 2,
            use_corner_correction: true,
            corner_correction_leniency: 6.0,
            flip_mode: FlipMode::Input,
        }
    }
}

impl MovementTuning {
    /// Clamp every tunable into its valid range so bad tuning can never
    /// produce NaN or divergent velocity.
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        Self {
            acceleration: sanitize(self.acceleration, d.acceleration, 0.0, f32::MAX),
            deceleration: sanitize(self.deceleration, d.deceleration, 0.0, f32::MAX),
            ground_speed_max: sanitize(self.ground_speed_max, d.ground_speed_max, 0.0, f32::MAX),
            air_speed_max: sanitize(self.air_speed_max, d.air_speed_max, 0.0, f32::MAX),
            grounded_deceleration: sanitize(
                self.grounded_deceleration,
                d.grounded_deceleration,
                0.0,
                1.0,
            ),
            air_deceleration: sanitize(self.air_deceleration, d.air_deceleration, 0.0, 1.0),
            jump_force: sanitize(self.jump_force, d.jump_force, f32::MIN, f32::MAX),
            coyote_time: sanitize(self.coyote_time, d.coyote_time, 0.0, f32::MAX),
            jump_gravity: sanitize(self.jump_gravity, d.jump_gravity, f32::MIN, f32::MAX),
            fall_gravity: sanitize(self.fall_gravity, d.fall_gravity, f32::MIN, f32::MAX),
            shorten_jump_percentage: sanitize(
                self.shorten_jump_percentage,
                d.shorten_jump_percentage,
                0.0,
                1.0,
            ),
            corner_correction_leniency: sanitize(
                self.corner_correction_leniency,
                d.corner_correction_leniency,
                0.0,
                f32::MAX,
            ),
            ..self
        }
    }

    /// Apex height of a single jump for a world gravity of `base_gravity`.
    /// Uses h = v² / (2g) with the ascent gravity scale.
    pub fn single_jump_height(&self, base_gravity: f32) -> f32 {
        let g = base_gravity * self.jump_gravity;
        if g <= 0.0 {
            return f32::INFINITY;
        }
        self.jump_force * self.jump_force / (2.0 * g)
    }

    /// Height reachable with the ground jump plus every double jump taken at
    /// the apex of the previous one.
    pub fn max_reachable_height(&self, base_gravity: f32) -> f32 {
        self.single_jump_height(base_gravity) * (1.0 + self.double_jumps as f32)
    }
}

/// Per-frame input snapshot. Sampled once per frame before any actor moves.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct MovementInput {
    pub axis_x: f32,
    pub jump_just_pressed: bool,
    pub jump_just_released: bool,
}

impl MovementInput {
    /// Raw horizontal axis in [-1, 1].
    pub fn axis_x(&self) -> f32 {
        if self.axis_x.is_finite() {
            self.axis_x.clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn jump_pressed_this_frame(&self) -> bool {
        self.jump_just_pressed
    }

    pub fn jump_released_this_frame(&self) -> bool {
        self.jump_just_released
    }
}
