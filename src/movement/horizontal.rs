//! Movement domain: horizontal speed ramp and fixed-tick friction.

use bevy::prelude::*;

use crate::movement::{MovementState, MovementTuning};

impl MovementState {
    /// Ramp or drain the stored ground/air speeds and, while input is held,
    /// write the horizontal velocity for the current grounded flag.
    pub fn resolve_horizontal(
        &mut self,
        tuning: &MovementTuning,
        axis_x: f32,
        dt: f32,
        velocity: &mut Vec2,
    ) {
        self.axis_x = axis_x;

        if axis_x != 0.0 {
            if tuning.use_acceleration {
                self.ground_speed += tuning.acceleration * dt;
                self.air_speed += tuning.acceleration * dt;
            } else {
                self.ground_speed = tuning.ground_speed_max;
                self.air_speed = tuning.air_speed_max;
            }
            self.clamp_speeds(tuning);

            let speed = if self.on_ground {
                self.ground_speed
            } else {
                self.air_speed
            };
            velocity.x = axis_x.signum() * speed;
        } else {
            // Velocity is left to friction; only the stored speeds drain so the
            // next press ramps up from zero.
            self.ground_speed -= tuning.deceleration * dt;
            self.air_speed -= tuning.deceleration * dt;
            self.clamp_speeds(tuning);
        }
    }

    fn clamp_speeds(&mut self, tuning: &MovementTuning) {
        self.ground_speed = self.ground_speed.clamp(0.0, tuning.ground_speed_max.max(0.0));
        self.air_speed = self.air_speed.clamp(0.0, tuning.air_speed_max.max(0.0));
    }

    /// Multiplicative damping applied once per fixed physics tick, using the
    /// grounded flag and input from the latest frame.
    pub fn apply_friction(&self, tuning: &MovementTuning, horizontal_velocity: f32) -> f32 {
        let no_input = self.axis_x == 0.0;

        if self.on_ground {
            if no_input {
                return decelerate(horizontal_velocity, tuning.grounded_deceleration);
            }
        } else if no_input || !tuning.only_decelerate_in_air_without_input {
            return decelerate(horizontal_velocity, tuning.air_deceleration);
        }

        horizontal_velocity
    }
}

fn decelerate(velocity: f32, factor: f32) -> f32 {
    velocity * factor.clamp(0.0, 1.0)
}
